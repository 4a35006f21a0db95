// CLI module for handling command-line interface

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mmm")]
#[command(about = "Deterministic mod manager for Minecraft", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a mod configuration
    Init {
        /// Mod loader to resolve against (forge, fabric, quilt, neoforge, liteloader, cauldron)
        #[arg(long, default_value = "fabric")]
        loader: String,
        /// Exact Minecraft version (defaults to the latest release)
        #[arg(long)]
        game_version: Option<String>,
        /// Also accept files published for a close-by game version
        #[arg(long)]
        allow_fallback: bool,
        /// Comma separated release tiers to consider (release, beta, alpha)
        #[arg(long, default_value = "release,beta")]
        release_types: String,
        /// Folder the mod files are installed into
        #[arg(long, default_value = crate::constants::DEFAULT_MODS_FOLDER)]
        mods_folder: String,
    },
    /// Add a mod and install its matching file
    Add {
        /// Hosting platform (curseforge, modrinth)
        platform: String,
        /// Platform-specific mod id
        id: String,
        /// Pin to an exact version label instead of the latest match
        #[arg(long)]
        version: Option<String>,
    },
    /// Remove a mod and its installed file
    Remove {
        /// Mod id to remove
        id: String,
    },
    /// List configured mods and their locked files
    List,
    /// Re-resolve every mod and install what changed
    Update,
}
