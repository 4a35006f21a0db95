// Init command for writing a fresh mod configuration

use crate::config::Config;
use crate::constants;
use crate::error::Error;
use crate::minecraft;
use crate::models::{Loader, ReleaseType};
use crate::platforms::transport;
use crate::ui;
use log::warn;
use std::str::FromStr;

fn parse_release_types(raw: &str) -> anyhow::Result<Vec<ReleaseType>> {
    raw.split(',')
        .map(|part| match part.trim() {
            "release" => Ok(ReleaseType::Release),
            "beta" => Ok(ReleaseType::Beta),
            "alpha" => Ok(ReleaseType::Alpha),
            other => anyhow::bail!("unknown release type \"{}\"", other),
        })
        .collect()
}

pub async fn init(
    loader: String,
    game_version: Option<String>,
    allow_fallback: bool,
    release_types: String,
    mods_folder: String,
) -> anyhow::Result<()> {
    if Config::load().is_ok() {
        ui::dim("Configuration detected. Skipping initialization.");
        return Ok(());
    }

    let loader = Loader::from_str(&loader)?;
    let allowed = parse_release_types(&release_types)?;
    let transport = transport::shared_transport();

    let game_version = match game_version {
        Some(version) => {
            if !minecraft::verify_version(&transport, &version).await {
                return Err(Error::InvalidGameVersion(version).into());
            }
            version
        }
        None => minecraft::latest_release(&transport).await.unwrap_or_else(|_| {
            warn!("could not fetch the Minecraft version list, using the built-in default");
            constants::DEFAULT_GAME_VERSION.to_string()
        }),
    };

    let config = Config {
        loader,
        game_version: game_version.clone(),
        default_allowed_release_types: allowed,
        allow_version_fallback: allow_fallback,
        mods_folder,
        mods: Vec::new(),
    };
    config.save()?;

    ui::success(&format!(
        "Initialized {} for Minecraft {} with {}",
        constants::CONFIG_FILE,
        game_version,
        loader
    ));
    Ok(())
}
