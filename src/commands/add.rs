// Add command for resolving, installing and recording a mod

use crate::config::{Config, ModEntry};
use crate::download;
use crate::lockfile::{LockedMod, Lockfile};
use crate::models::Platform;
use crate::resolver::ModResolver;
use crate::ui;
use log::debug;
use std::str::FromStr;

pub async fn add(platform: String, id: String, version: Option<String>) -> anyhow::Result<()> {
    // Platform and loader are validated before anything touches the network.
    let platform = Platform::from_str(&platform)?;

    let mut config = Config::load()
        .map_err(|_| anyhow::anyhow!("Configuration not found. Run 'mmm init' first."))?;

    if config.find_mod(platform, &id).is_some() {
        debug!("mod '{id}' for {platform} already configured");
        ui::dim(&format!("{} is already managed, nothing to do", id));
        return Ok(());
    }

    let entry = ModEntry {
        platform,
        id: id.clone(),
        name: id.clone(),
        version,
        allowed_release_types: None,
    };
    let request = config.request_for(&entry);

    let pb = ui::spinner(&format!("Resolving {} on {}", id, platform));
    let resolver = ModResolver::with_shared_transport();
    let descriptor = match resolver.resolve(platform, &request).await {
        Ok(descriptor) => descriptor,
        Err(err) => {
            ui::finish_spinner_error(&pb, &err.to_string());
            return Err(err.into());
        }
    };
    ui::finish_spinner_resolved(&pb, &descriptor.name, &descriptor.file_name);

    let mods_folder = crate::config::mods_folder_path(&config);
    download::download_mod(&descriptor, &mods_folder).await?;
    ui::success(&format!("Installed {}", descriptor.file_name));

    let mut lockfile = Lockfile::load_or_default();
    lockfile.upsert(LockedMod::from_descriptor(platform, &id, &descriptor));
    lockfile.sort_by_name();
    lockfile.save()?;

    config.mods.push(ModEntry {
        name: descriptor.name.clone(),
        ..entry
    });
    config.save()?;

    Ok(())
}
