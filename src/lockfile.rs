// Lockfile module for the installed-mod records (mods.lock)

use crate::config;
use crate::models::Platform;
use crate::platforms::candidate::ModDescriptor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Lockfile {
    #[serde(default)]
    pub mods: Vec<LockedMod>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockedMod {
    pub name: String,
    pub platform: Platform,
    pub id: String,
    pub file_name: String,
    pub released_on: String,
    pub hash: String,
    pub download_url: String,
}

impl LockedMod {
    pub fn from_descriptor(platform: Platform, id: &str, descriptor: &ModDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            platform,
            id: id.to_string(),
            file_name: descriptor.file_name.clone(),
            released_on: descriptor.release_date.clone(),
            hash: descriptor.hash.clone(),
            download_url: descriptor.download_url.clone(),
        }
    }
}

impl Lockfile {
    pub fn load() -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(config::lockfile_path())?;
        Ok(toml::from_str(&text)?)
    }

    /// Missing lockfile reads as empty; it is created on first save.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(config::config_dir())?;
        let text = toml::to_string_pretty(self)?;
        std::fs::write(config::lockfile_path(), text)?;
        Ok(())
    }

    pub fn find(&self, platform: Platform, id: &str) -> Option<&LockedMod> {
        self.mods
            .iter()
            .find(|entry| entry.platform == platform && entry.id == id)
    }

    /// Insert or replace the record for (platform, id).
    pub fn upsert(&mut self, locked: LockedMod) {
        match self
            .mods
            .iter_mut()
            .find(|entry| entry.platform == locked.platform && entry.id == locked.id)
        {
            Some(existing) => *existing = locked,
            None => self.mods.push(locked),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<LockedMod> {
        let index = self.mods.iter().position(|entry| entry.id == id)?;
        Some(self.mods.remove(index))
    }

    pub fn sort_by_name(&mut self) {
        self.mods.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked(name: &str, id: &str) -> LockedMod {
        LockedMod {
            name: name.to_string(),
            platform: Platform::Modrinth,
            id: id.to_string(),
            file_name: format!("{id}.jar"),
            released_on: "2022-08-01T00:00:00Z".to_string(),
            hash: "ab12".to_string(),
            download_url: format!("https://cdn.modrinth.com/{id}.jar"),
        }
    }

    #[test]
    fn test_upsert_replaces_existing_record() {
        let mut lockfile = Lockfile::default();
        lockfile.upsert(locked("Sodium", "sodium"));
        let mut updated = locked("Sodium", "sodium");
        updated.hash = "cd34".to_string();
        lockfile.upsert(updated);

        assert_eq!(lockfile.mods.len(), 1);
        assert_eq!(lockfile.mods[0].hash, "cd34");
    }

    #[test]
    fn test_sort_by_name() {
        let mut lockfile = Lockfile::default();
        lockfile.upsert(locked("Zoomify", "zoomify"));
        lockfile.upsert(locked("Sodium", "sodium"));
        lockfile.sort_by_name();
        assert_eq!(lockfile.mods[0].name, "Sodium");
    }

    #[test]
    fn test_toml_round_trip() {
        let mut lockfile = Lockfile::default();
        lockfile.upsert(locked("Sodium", "sodium"));
        let text = toml::to_string_pretty(&lockfile).unwrap();
        let parsed: Lockfile = toml::from_str(&text).unwrap();
        assert_eq!(parsed.mods.len(), 1);
        assert_eq!(parsed.mods[0].file_name, "sodium.jar");
    }
}
