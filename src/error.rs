// Typed failure taxonomy for mod resolution

use crate::models::Platform;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The mod id does not exist on the platform, or the existence check
    /// itself failed at the transport level.
    #[error("could not find the mod \"{mod_id}\" on {platform}")]
    CouldNotFindMod { mod_id: String, platform: Platform },

    /// The mod exists but no file survived the matching pipeline for the
    /// requested loader, game version and release types.
    #[error("no remote file found for \"{name}\" on {platform}")]
    NoRemoteFileFound { name: String, platform: Platform },

    #[error("unknown platform \"{0}\", expected one of: curseforge, modrinth")]
    UnknownPlatform(String),

    #[error("unknown loader \"{0}\", expected one of: forge, fabric, quilt, neoforge, liteloader, cauldron")]
    UnknownLoader(String),

    /// The selected file carries no download url.
    #[error("{platform} did not provide a download url for \"{name}\"")]
    MissingDownloadUrl { name: String, platform: Platform },

    /// A pinned version label matched more than one file.
    #[error("version \"{label}\" of \"{name}\" matches {count} files, expected exactly one")]
    AmbiguousVersion {
        label: String,
        name: String,
        count: usize,
    },

    #[error("\"{0}\" is not a known Minecraft version")]
    InvalidGameVersion(String),

    #[error("the list of Minecraft versions could not be fetched")]
    MinecraftVersionsUnavailable,

    #[error("hash mismatch for {file_name}: expected {expected}, got {actual}")]
    HashMismatch {
        file_name: String,
        expected: String,
        actual: String,
    },
}
