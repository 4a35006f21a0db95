// Mojang version manifest lookup

use crate::error::Error;
use crate::platforms::transport::Fetch;
use serde::Deserialize;
use std::sync::Arc;

const VERSION_MANIFEST_URL: &str = "https://launchermeta.mojang.com/mc/game/version_manifest.json";

#[derive(Debug, Deserialize)]
struct VersionManifest {
    latest: LatestVersions,
    versions: Vec<VersionInfo>,
}

#[derive(Debug, Deserialize)]
struct LatestVersions {
    release: String,
}

#[derive(Debug, Deserialize)]
struct VersionInfo {
    id: String,
}

async fn fetch_manifest(transport: &Arc<dyn Fetch>) -> Result<VersionManifest, Error> {
    let response = transport
        .fetch(VERSION_MANIFEST_URL, &[])
        .await
        .map_err(|_| Error::MinecraftVersionsUnavailable)?;
    if !response.ok {
        return Err(Error::MinecraftVersionsUnavailable);
    }
    response
        .json()
        .map_err(|_| Error::MinecraftVersionsUnavailable)
}

/// The id of the latest stable Minecraft release.
pub async fn latest_release(transport: &Arc<dyn Fetch>) -> Result<String, Error> {
    Ok(fetch_manifest(transport).await?.latest.release)
}

/// Whether the version id exists upstream. An unreachable version list
/// reads as valid: it must not block initialization.
pub async fn verify_version(transport: &Arc<dyn Fetch>, version: &str) -> bool {
    match fetch_manifest(transport).await {
        Ok(manifest) => manifest.versions.iter().any(|v| v.id == version),
        Err(_) => true,
    }
}
