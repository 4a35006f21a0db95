// Constants module for shared string constants

pub const CONFIG_FILE: &str = "mods.toml";
pub const LOCKFILE_FILE: &str = "mods.lock";
pub const DEFAULT_MODS_FOLDER: &str = "mods";

/// Used when the Mojang version manifest cannot be reached during init.
pub const DEFAULT_GAME_VERSION: &str = "1.21.4";
