mod cli;
mod commands;
mod config;
mod constants;
mod download;
mod error;
mod lockfile;
mod minecraft;
mod models;
mod platforms;
mod resolver;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            loader,
            game_version,
            allow_fallback,
            release_types,
            mods_folder,
        } => commands::init::init(loader, game_version, allow_fallback, release_types, mods_folder).await,
        Commands::Add {
            platform,
            id,
            version,
        } => commands::add::add(platform, id, version).await,
        Commands::Remove { id } => commands::remove::remove(id).await,
        Commands::List => commands::list::list(),
        Commands::Update => commands::update::update().await,
    }
}
