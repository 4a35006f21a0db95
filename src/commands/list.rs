// List command for printing the configured mods

use crate::config::Config;
use crate::lockfile::Lockfile;
use crate::ui;

pub fn list() -> anyhow::Result<()> {
    let config = Config::load()
        .map_err(|_| anyhow::anyhow!("Configuration not found. Run 'mmm init' first."))?;

    if config.mods.is_empty() {
        ui::dim("No mods configured yet. Add one with 'mmm add <platform> <id>'.");
        return Ok(());
    }

    let lockfile = Lockfile::load_or_default();

    ui::header(&format!(
        "{} mod(s) for Minecraft {} ({})",
        config.mods.len(),
        config.game_version,
        config.loader
    ));
    for entry in &config.mods {
        match lockfile.find(entry.platform, &entry.id) {
            Some(locked) => ui::action(&format!(
                "{} [{}] {} (released {})",
                entry.name, entry.platform, locked.file_name, locked.released_on
            )),
            None => ui::action(&format!("{} [{}] not installed", entry.name, entry.platform)),
        }
    }
    Ok(())
}
