// Canonical data model shared by all platform adapters

use crate::error::Error;
use crate::models::{Loader, Platform, ReleaseType};

/// One downloadable artifact, normalized out of a platform's own schema.
/// Files with an unusable shape (unknown release-type code, no sha1 hash)
/// never make it into one of these; a missing download url is kept as `None`
/// because it only becomes an error if the file wins selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ModCandidate {
    /// Display name of the mod, shared by all of its candidates.
    pub name: String,
    /// The label a pinned-version request is compared against: the file name
    /// on CurseForge, the version number on Modrinth.
    pub version_label: String,
    pub file_name: String,
    /// ISO-8601 publication timestamp; ordering is lexicographic.
    pub release_date: String,
    /// sha1 digest of the artifact.
    pub hash: String,
    pub download_url: Option<String>,
    pub release_type: ReleaseType,
    /// Loader identifiers, lower-cased for case-insensitive matching.
    pub loader_tags: Vec<String>,
    pub game_versions: Vec<String>,
    /// Health flag: false for withdrawn or not-yet-approved files.
    pub available: bool,
}

impl ModCandidate {
    /// Finalize a selected candidate into the caller-facing descriptor.
    /// Fails if the platform omitted the download url.
    pub fn into_descriptor(self, platform: Platform) -> Result<ModDescriptor, Error> {
        let Some(download_url) = self.download_url else {
            return Err(Error::MissingDownloadUrl {
                name: self.name,
                platform,
            });
        };
        Ok(ModDescriptor {
            name: self.name,
            file_name: self.file_name,
            release_date: self.release_date,
            hash: self.hash,
            download_url,
        })
    }
}

/// The resolution result. Invariant: `hash` and `download_url` are always
/// present and non-empty; resolution errors out instead of producing a
/// partial descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModDescriptor {
    pub name: String,
    pub file_name: String,
    pub release_date: String,
    pub hash: String,
    pub download_url: String,
}

/// Immutable input for one resolution call.
#[derive(Debug, Clone)]
pub struct ResolutionRequest {
    pub mod_id: String,
    pub allowed_release_types: Vec<ReleaseType>,
    pub game_version: String,
    pub loader: Loader,
    pub allow_fallback: bool,
    /// Pin to one exact version label instead of the most recent match.
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(download_url: Option<&str>) -> ModCandidate {
        ModCandidate {
            name: "Sodium".to_string(),
            version_label: "sodium-0.5.8.jar".to_string(),
            file_name: "sodium-0.5.8.jar".to_string(),
            release_date: "2024-02-14T10:00:00Z".to_string(),
            hash: "d9a5c8e1".to_string(),
            download_url: download_url.map(String::from),
            release_type: ReleaseType::Release,
            loader_tags: vec!["fabric".to_string()],
            game_versions: vec!["1.20.4".to_string()],
            available: true,
        }
    }

    #[test]
    fn test_descriptor_from_complete_candidate() {
        let descriptor = candidate(Some("https://cdn.example/sodium.jar"))
            .into_descriptor(Platform::Modrinth)
            .unwrap();
        assert_eq!(descriptor.file_name, "sodium-0.5.8.jar");
        assert_eq!(descriptor.download_url, "https://cdn.example/sodium.jar");
    }

    #[test]
    fn test_descriptor_requires_download_url() {
        let err = candidate(None)
            .into_descriptor(Platform::Curseforge)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingDownloadUrl { name, platform: Platform::Curseforge } if name == "Sodium"
        ));
    }
}
