// Update command for re-resolving every configured mod

use crate::config::{self, Config, ModEntry};
use crate::download;
use crate::lockfile::{LockedMod, Lockfile};
use crate::platforms::candidate::ModDescriptor;
use crate::resolver::ModResolver;
use crate::ui;
use futures::future::join_all;
use log::debug;

pub async fn update() -> anyhow::Result<()> {
    let config = Config::load()
        .map_err(|_| anyhow::anyhow!("Configuration not found. Run 'mmm init' first."))?;

    if config.mods.is_empty() {
        ui::dim("No mods configured yet. Add one with 'mmm add <platform> <id>'.");
        return Ok(());
    }

    // Resolutions run concurrently but all pace through the one shared
    // transport; one failure must not take down the batch.
    let resolver = ModResolver::with_shared_transport();
    let resolutions = join_all(config.mods.iter().map(|entry| {
        let resolver = &resolver;
        let request = config.request_for(entry);
        async move { (entry, resolver.resolve(entry.platform, &request).await) }
    }))
    .await;

    let mut lockfile = Lockfile::load_or_default();
    let mods_folder = config::mods_folder_path(&config);
    let mut updated = 0usize;
    let mut failed = 0usize;

    for (entry, resolution) in resolutions {
        match resolution {
            Ok(descriptor) => {
                if is_current(&lockfile, entry, &descriptor) {
                    debug!("'{}' is up to date", entry.id);
                    continue;
                }
                if let Some(previous) = lockfile.find(entry.platform, &entry.id)
                    && previous.file_name != descriptor.file_name
                {
                    download::remove_installed(&mods_folder, &previous.file_name)?;
                }
                download::download_mod(&descriptor, &mods_folder).await?;
                ui::action(&format!("{} → {}", entry.name, descriptor.file_name));
                lockfile.upsert(LockedMod::from_descriptor(
                    entry.platform,
                    &entry.id,
                    &descriptor,
                ));
                updated += 1;
            }
            Err(err) => {
                ui::warning(&format!("{}: {}", entry.name, err));
                failed += 1;
            }
        }
    }

    lockfile.sort_by_name();
    lockfile.save()?;

    if updated == 0 && failed == 0 {
        ui::success("Everything is up to date");
    } else {
        ui::success(&format!("Updated {} mod(s), {} failed", updated, failed));
    }
    if failed > 0 {
        anyhow::bail!("{} mod(s) could not be updated", failed);
    }
    Ok(())
}

fn is_current(lockfile: &Lockfile, entry: &ModEntry, descriptor: &ModDescriptor) -> bool {
    lockfile
        .find(entry.platform, &entry.id)
        .is_some_and(|locked| {
            locked.hash == descriptor.hash && locked.file_name == descriptor.file_name
        })
}
