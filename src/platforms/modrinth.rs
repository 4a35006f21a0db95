// Modrinth platform adapter

use crate::error::Error;
use crate::models::{Platform, ReleaseType};
use crate::platforms::candidate::ModCandidate;
use crate::platforms::platform_trait::{ModListing, ModPlatform};
use crate::platforms::transport::Fetch;
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use std::sync::Arc;

const API_BASE: &str = "https://api.modrinth.com/v2";

#[derive(Debug, Deserialize)]
struct Project {
    title: String,
}

#[derive(Debug, Deserialize)]
struct Version {
    version_number: String,
    version_type: String,
    loaders: Vec<String>,
    game_versions: Vec<String>,
    date_published: String,
    files: Vec<VersionFile>,
}

#[derive(Debug, Deserialize)]
struct VersionFile {
    url: String,
    filename: String,
    hashes: FileHashes,
}

#[derive(Debug, Deserialize)]
struct FileHashes {
    sha1: Option<String>,
}

pub struct ModrinthPlatform {
    transport: Arc<dyn Fetch>,
}

impl ModrinthPlatform {
    pub fn new(transport: Arc<dyn Fetch>) -> Self {
        Self { transport }
    }

    fn not_found(&self, mod_id: &str) -> Error {
        Error::CouldNotFindMod {
            mod_id: mod_id.to_string(),
            platform: Platform::Modrinth,
        }
    }

    /// The artifact is the first listed file of a version; versions with no
    /// files, an unknown version type or no sha1 digest are unusable.
    fn normalize(version: Version, mod_name: &str) -> Option<ModCandidate> {
        let release_type = ReleaseType::from_label(&version.version_type)?;
        let file = version.files.into_iter().next()?;
        let hash = file.hashes.sha1?;

        Some(ModCandidate {
            name: mod_name.to_string(),
            version_label: version.version_number,
            file_name: file.filename,
            release_date: version.date_published,
            hash,
            download_url: Some(file.url),
            release_type,
            loader_tags: version.loaders.iter().map(|l| l.to_lowercase()).collect(),
            game_versions: version.game_versions,
            // Modrinth only lists live versions; there is no health flag.
            available: true,
        })
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        mod_id: &str,
    ) -> Result<T, Error> {
        let response = self
            .transport
            .fetch(url, &[])
            .await
            .map_err(|_| self.not_found(mod_id))?;
        if !response.ok {
            return Err(self.not_found(mod_id));
        }
        response.json().map_err(|_| self.not_found(mod_id))
    }
}

#[async_trait]
impl ModPlatform for ModrinthPlatform {
    fn platform(&self) -> Platform {
        Platform::Modrinth
    }

    async fn fetch_candidates(&self, mod_id: &str) -> Result<ModListing, Error> {
        let id = urlencoding::encode(mod_id);
        let project: Project = self
            .fetch_json(&format!("{API_BASE}/project/{id}"), mod_id)
            .await?;
        let versions: Vec<Version> = self
            .fetch_json(&format!("{API_BASE}/project/{id}/version"), mod_id)
            .await?;
        debug!("modrinth: {} versions listed for '{mod_id}'", versions.len());

        let candidates: Vec<ModCandidate> = versions
            .into_iter()
            .filter_map(|version| Self::normalize(version, &project.title))
            .collect();
        Ok(ModListing {
            name: project.title,
            candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Loader;
    use crate::platforms::transport::scripted::ScriptedFetch;
    use crate::platforms::version_matcher::select_candidate;
    use serde_json::json;

    fn version_json(overrides: serde_json::Value) -> serde_json::Value {
        let mut version = json!({
            "version_number": "2.1.0",
            "version_type": "release",
            "loaders": ["fabric"],
            "game_versions": ["1.19.2"],
            "date_published": "2022-06-10T08:00:00Z",
            "files": [{
                "url": "https://cdn.modrinth.com/data/AABBCC/versions/2.1.0/testmod-2.1.0.jar",
                "filename": "testmod-2.1.0.jar",
                "hashes": { "sha1": "0a1b2c3d4e", "sha512": "deadbeef" }
            }]
        });
        version
            .as_object_mut()
            .unwrap()
            .extend(overrides.as_object().unwrap().clone());
        version
    }

    fn adapter_with(responses: Vec<crate::platforms::transport::FetchResponse>) -> ModrinthPlatform {
        ModrinthPlatform {
            transport: ScriptedFetch::new(responses),
        }
    }

    fn successful_fetch(
        title: &str,
        versions: Vec<serde_json::Value>,
    ) -> Vec<crate::platforms::transport::FetchResponse> {
        vec![
            ScriptedFetch::ok(&json!({ "title": title })),
            ScriptedFetch::ok(&serde_json::Value::Array(versions)),
        ]
    }

    #[tokio::test]
    async fn test_failed_project_lookup_is_could_not_find() {
        let adapter = adapter_with(vec![ScriptedFetch::failed()]);
        let err = adapter.fetch_candidates("sodium").await.unwrap_err();
        assert!(matches!(
            err,
            Error::CouldNotFindMod { mod_id, platform: Platform::Modrinth } if mod_id == "sodium"
        ));
    }

    #[tokio::test]
    async fn test_failed_versions_lookup_is_could_not_find() {
        let adapter = adapter_with(vec![
            ScriptedFetch::ok(&json!({ "title": "Sodium" })),
            ScriptedFetch::failed(),
        ]);
        let err = adapter.fetch_candidates("sodium").await.unwrap_err();
        assert!(matches!(err, Error::CouldNotFindMod { .. }));
    }

    #[tokio::test]
    async fn test_candidates_carry_title_and_first_file() {
        let adapter = adapter_with(successful_fetch("Sodium", vec![version_json(json!({}))]));
        let listing = adapter.fetch_candidates("sodium").await.unwrap();
        assert_eq!(listing.name, "Sodium");
        let candidate = &listing.candidates[0];
        assert_eq!(candidate.version_label, "2.1.0");
        assert_eq!(candidate.file_name, "testmod-2.1.0.jar");
        assert_eq!(candidate.hash, "0a1b2c3d4e");
        assert!(candidate.available);
        assert!(candidate.download_url.is_some());
    }

    #[tokio::test]
    async fn test_unknown_version_type_excludes_the_version() {
        let adapter = adapter_with(successful_fetch(
            "Sodium",
            vec![version_json(json!({ "version_type": "something" }))],
        ));
        let listing = adapter.fetch_candidates("sodium").await.unwrap();
        assert!(listing.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_empty_files_list_excludes_the_version() {
        let adapter = adapter_with(successful_fetch(
            "Sodium",
            vec![version_json(json!({ "files": [] }))],
        ));
        let listing = adapter.fetch_candidates("sodium").await.unwrap();
        assert!(listing.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_missing_sha1_digest_excludes_the_version() {
        let adapter = adapter_with(successful_fetch(
            "Sodium",
            vec![version_json(json!({
                "files": [{
                    "url": "https://cdn.modrinth.com/file.jar",
                    "filename": "file.jar",
                    "hashes": { "sha512": "deadbeef" }
                }]
            }))],
        ));
        let listing = adapter.fetch_candidates("sodium").await.unwrap();
        assert!(listing.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_loader_tags_are_lowercased() {
        let adapter = adapter_with(successful_fetch(
            "Sodium",
            vec![version_json(json!({ "loaders": ["Fabric", "Quilt"] }))],
        ));
        let listing = adapter.fetch_candidates("sodium").await.unwrap();
        assert_eq!(
            listing.candidates[0].loader_tags,
            vec!["fabric".to_string(), "quilt".to_string()]
        );
    }

    #[tokio::test]
    async fn test_recency_selection_end_to_end() {
        let adapter = adapter_with(successful_fetch(
            "Sodium",
            vec![
                version_json(json!({ "version_number": "1.0.0", "date_published": "2021-01-01" })),
                version_json(json!({ "version_number": "1.2.0", "date_published": "2021-01-03" })),
                version_json(json!({ "version_number": "1.1.0", "date_published": "2021-01-02" })),
            ],
        ));
        let listing = adapter.fetch_candidates("sodium").await.unwrap();
        let selected = select_candidate(
            &listing.candidates,
            &[ReleaseType::Release],
            Loader::Fabric,
            "1.19.2",
            false,
            None,
        )
        .unwrap();
        assert_eq!(selected.version_label, "1.2.0");
    }

    #[tokio::test]
    async fn test_pinned_version_number_selection_end_to_end() {
        let adapter = adapter_with(successful_fetch(
            "Sodium",
            vec![
                version_json(json!({ "version_number": "1.0.0", "date_published": "2021-01-03" })),
                version_json(json!({ "version_number": "2.0.1", "date_published": "2023-01-01" })),
                version_json(json!({ "version_number": "1.0.2", "date_published": "2021-01-12" })),
            ],
        ));
        let listing = adapter.fetch_candidates("sodium").await.unwrap();
        let selected = select_candidate(
            &listing.candidates,
            &[ReleaseType::Release],
            Loader::Fabric,
            "1.19.2",
            true,
            Some("1.0.0"),
        )
        .unwrap();
        assert_eq!(selected.version_label, "1.0.0");
        assert_eq!(selected.release_date, "2021-01-03");
    }
}
