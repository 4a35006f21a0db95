// Configuration file handling (mods.toml)

use crate::constants;
use crate::models::{Loader, Platform, ReleaseType};
use crate::platforms::candidate::ResolutionRequest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub loader: Loader,
    pub game_version: String,
    pub default_allowed_release_types: Vec<ReleaseType>,
    pub allow_version_fallback: bool,
    pub mods_folder: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mods: Vec<ModEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModEntry {
    pub platform: Platform,
    pub id: String,
    pub name: String,
    /// Pin to an exact version label instead of tracking the latest match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Per-mod override of the default release tiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_release_types: Option<Vec<ReleaseType>>,
}

pub fn config_dir() -> String {
    std::env::var("MMM_DIR").unwrap_or_else(|_| ".".to_string())
}

pub fn config_path() -> String {
    let dir = config_dir();
    if dir == "." {
        constants::CONFIG_FILE.to_string()
    } else {
        format!("{}/{}", dir, constants::CONFIG_FILE)
    }
}

pub fn lockfile_path() -> String {
    let dir = config_dir();
    if dir == "." {
        constants::LOCKFILE_FILE.to_string()
    } else {
        format!("{}/{}", dir, constants::LOCKFILE_FILE)
    }
}

pub fn mods_folder_path(config: &Config) -> String {
    let dir = config_dir();
    if dir == "." {
        config.mods_folder.clone()
    } else {
        format!("{}/{}", dir, config.mods_folder)
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(config_path())?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let dir = config_dir();
        std::fs::create_dir_all(&dir)?;
        let text = toml::to_string_pretty(self)?;
        std::fs::write(config_path(), text)?;
        Ok(())
    }

    pub fn find_mod(&self, platform: Platform, id: &str) -> Option<&ModEntry> {
        self.mods
            .iter()
            .find(|entry| entry.platform == platform && entry.id == id)
    }

    /// Remove a mod by id (any platform). Returns the removed entry.
    pub fn remove_mod(&mut self, id: &str) -> Option<ModEntry> {
        let index = self.mods.iter().position(|entry| entry.id == id)?;
        Some(self.mods.remove(index))
    }

    /// Build the resolution request for one configured mod, applying per-mod
    /// overrides on top of the configuration defaults.
    pub fn request_for(&self, entry: &ModEntry) -> ResolutionRequest {
        ResolutionRequest {
            mod_id: entry.id.clone(),
            allowed_release_types: entry
                .allowed_release_types
                .clone()
                .unwrap_or_else(|| self.default_allowed_release_types.clone()),
            game_version: self.game_version.clone(),
            loader: self.loader,
            allow_fallback: self.allow_version_fallback,
            version: entry.version.clone(),
        }
    }
}
