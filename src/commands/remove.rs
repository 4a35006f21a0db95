// Remove command for dropping a mod from the configuration

use crate::config::{self, Config};
use crate::download;
use crate::lockfile::Lockfile;
use crate::ui;

pub async fn remove(id: String) -> anyhow::Result<()> {
    let mut config = Config::load()
        .map_err(|_| anyhow::anyhow!("Configuration not found. Run 'mmm init' first."))?;

    let Some(entry) = config.remove_mod(&id) else {
        anyhow::bail!("Mod '{}' is not in the configuration", id);
    };
    config.save()?;

    let mut lockfile = Lockfile::load_or_default();
    if let Some(locked) = lockfile.remove(&id) {
        download::remove_installed(&config::mods_folder_path(&config), &locked.file_name)?;
        lockfile.save()?;
    }

    ui::success(&format!("Removed {}", entry.name));
    Ok(())
}
