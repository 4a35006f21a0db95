// Mod resolution service: platform dispatch and error translation

use crate::error::Error;
use crate::models::Platform;
use crate::platforms;
use crate::platforms::candidate::{ModDescriptor, ResolutionRequest};
use crate::platforms::transport::{self, Fetch};
use crate::platforms::version_matcher::{self, MatchError};
use log::debug;
use std::sync::Arc;

/// Drives the fetch → normalize → match pipeline for one platform and
/// translates the outcomes into the typed error taxonomy. Holds no state
/// besides the transport, so concurrent resolutions cannot affect each
/// other.
pub struct ModResolver {
    transport: Arc<dyn Fetch>,
}

impl ModResolver {
    pub fn new(transport: Arc<dyn Fetch>) -> Self {
        Self { transport }
    }

    /// Resolver on the process-wide rate-limited transport.
    pub fn with_shared_transport() -> Self {
        Self::new(transport::shared_transport())
    }

    pub async fn resolve(
        &self,
        platform: Platform,
        request: &ResolutionRequest,
    ) -> Result<ModDescriptor, Error> {
        let adapter = platforms::adapter_for(platform, self.transport.clone());
        let listing = adapter.fetch_candidates(&request.mod_id).await?;
        debug!(
            "resolver: {} candidates for '{}' on {}",
            listing.candidates.len(),
            request.mod_id,
            adapter.platform()
        );

        let selected = version_matcher::select_candidate(
            &listing.candidates,
            &request.allowed_release_types,
            request.loader,
            &request.game_version,
            request.allow_fallback,
            request.version.as_deref(),
        )
        .map_err(|err| match err {
            MatchError::NoMatch => Error::NoRemoteFileFound {
                name: listing.name.clone(),
                platform,
            },
            MatchError::AmbiguousVersion { label, count } => Error::AmbiguousVersion {
                label,
                name: listing.name.clone(),
                count,
            },
        })?;

        selected.clone().into_descriptor(platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Loader, ReleaseType};
    use crate::platforms::transport::scripted::ScriptedFetch;
    use serde_json::json;

    fn request() -> ResolutionRequest {
        ResolutionRequest {
            mod_id: "sodium".to_string(),
            allowed_release_types: vec![ReleaseType::Release, ReleaseType::Beta],
            game_version: "1.19.2".to_string(),
            loader: Loader::Fabric,
            allow_fallback: false,
            version: None,
        }
    }

    #[tokio::test]
    async fn test_resolves_a_modrinth_descriptor() {
        let transport = ScriptedFetch::new(vec![
            ScriptedFetch::ok(&json!({ "title": "Sodium" })),
            ScriptedFetch::ok(&json!([{
                "version_number": "0.4.10",
                "version_type": "release",
                "loaders": ["fabric"],
                "game_versions": ["1.19.2"],
                "date_published": "2022-08-01T00:00:00Z",
                "files": [{
                    "url": "https://cdn.modrinth.com/sodium-0.4.10.jar",
                    "filename": "sodium-0.4.10.jar",
                    "hashes": { "sha1": "ab12cd34" }
                }]
            }])),
        ]);
        let resolver = ModResolver::new(transport);
        let descriptor = resolver
            .resolve(Platform::Modrinth, &request())
            .await
            .unwrap();
        assert_eq!(
            descriptor,
            ModDescriptor {
                name: "Sodium".to_string(),
                file_name: "sodium-0.4.10.jar".to_string(),
                release_date: "2022-08-01T00:00:00Z".to_string(),
                hash: "ab12cd34".to_string(),
                download_url: "https://cdn.modrinth.com/sodium-0.4.10.jar".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_adapter_failure_passes_through_untouched() {
        let transport = ScriptedFetch::new(vec![ScriptedFetch::failed()]);
        let resolver = ModResolver::new(transport);
        let err = resolver
            .resolve(Platform::Modrinth, &request())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::CouldNotFindMod { mod_id, platform: Platform::Modrinth } if mod_id == "sodium"
        ));
    }

    #[tokio::test]
    async fn test_empty_match_becomes_no_remote_file_found_with_name() {
        let transport = ScriptedFetch::new(vec![
            ScriptedFetch::ok(&json!({ "title": "Sodium" })),
            ScriptedFetch::ok(&json!([{
                "version_number": "0.4.10",
                "version_type": "release",
                "loaders": ["forge"],
                "game_versions": ["1.19.2"],
                "date_published": "2022-08-01T00:00:00Z",
                "files": [{
                    "url": "https://cdn.modrinth.com/sodium-0.4.10.jar",
                    "filename": "sodium-0.4.10.jar",
                    "hashes": { "sha1": "ab12cd34" }
                }]
            }])),
        ]);
        let resolver = ModResolver::new(transport);
        let err = resolver
            .resolve(Platform::Modrinth, &request())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NoRemoteFileFound { name, platform: Platform::Modrinth } if name == "Sodium"
        ));
    }

    #[tokio::test]
    async fn test_winning_candidate_without_url_is_a_url_error() {
        let transport = ScriptedFetch::new(vec![
            ScriptedFetch::ok(&json!({ "data": { "name": "Iron Chests" } })),
            ScriptedFetch::ok(&json!({
                "data": [{
                    "fileName": "ironchests-1.0.jar",
                    "fileDate": "2019-08-24T14:15:22Z",
                    "releaseType": 1,
                    "fileStatus": 10,
                    "isAvailable": true,
                    "downloadUrl": null,
                    "hashes": [{ "algo": 1, "value": "aa11" }],
                    "sortableGameVersions": [
                        { "gameVersionName": "Fabric", "gameVersion": "" },
                        { "gameVersionName": "1.19.2", "gameVersion": "1.19.2" }
                    ]
                }],
                "pagination": { "index": 0, "pageSize": 50, "totalCount": 1 }
            })),
        ]);
        let resolver = ModResolver::new(transport);
        let err = resolver
            .resolve(Platform::Curseforge, &request())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingDownloadUrl { name, platform: Platform::Curseforge } if name == "Iron Chests"
        ));
    }

    #[tokio::test]
    async fn test_ambiguous_pinned_version_is_reported_as_such() {
        let file = json!({
            "version_number": "1.0.0",
            "version_type": "release",
            "loaders": ["fabric"],
            "game_versions": ["1.19.2"],
            "date_published": "2022-08-01T00:00:00Z",
            "files": [{
                "url": "https://cdn.modrinth.com/sodium-1.0.0.jar",
                "filename": "sodium-1.0.0.jar",
                "hashes": { "sha1": "ab12cd34" }
            }]
        });
        let transport = ScriptedFetch::new(vec![
            ScriptedFetch::ok(&json!({ "title": "Sodium" })),
            ScriptedFetch::ok(&json!([file.clone(), file])),
        ]);
        let resolver = ModResolver::new(transport);
        let mut pinned = request();
        pinned.version = Some("1.0.0".to_string());
        let err = resolver
            .resolve(Platform::Modrinth, &pinned)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::AmbiguousVersion { label, count: 2, .. } if label == "1.0.0"
        ));
    }
}
