// CurseForge platform adapter

use crate::error::Error;
use crate::models::{Platform, ReleaseType};
use crate::platforms::candidate::ModCandidate;
use crate::platforms::platform_trait::{ModListing, ModPlatform};
use crate::platforms::transport::Fetch;
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use std::sync::Arc;

const API_BASE: &str = "https://api.curseforge.com/v1";
const PAGE_SIZE: u32 = 50;
/// File-status codes that count as released: 4 (approved) and 10 (released).
/// Everything else (pending review, rejected, deleted, ...) is unhealthy.
const HEALTHY_FILE_STATUSES: [u8; 2] = [4, 10];
/// CurseForge hash-algorithm code for sha1.
const SHA1_ALGO: u8 = 1;

#[derive(Debug, Deserialize)]
struct ModResponse {
    data: ModData,
}

#[derive(Debug, Deserialize)]
struct ModData {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FilesResponse {
    data: Vec<ModFile>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    total_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModFile {
    file_name: String,
    file_date: String,
    release_type: u8,
    file_status: u8,
    is_available: bool,
    download_url: Option<String>,
    hashes: Vec<FileHash>,
    sortable_game_versions: Vec<SortableGameVersion>,
}

#[derive(Debug, Deserialize)]
struct FileHash {
    algo: u8,
    value: String,
}

/// One row of `sortableGameVersions`: loader rows carry the loader name in
/// `gameVersionName` with an empty `gameVersion`, game-version rows carry
/// the version string in both.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SortableGameVersion {
    game_version_name: String,
    game_version: String,
}

pub struct CurseforgePlatform {
    transport: Arc<dyn Fetch>,
    api_key: String,
}

impl CurseforgePlatform {
    pub fn new(transport: Arc<dyn Fetch>) -> Self {
        // An absent key is sent as an empty header; the resulting 403
        // surfaces as an existence failure like any other non-success.
        let api_key = std::env::var("CURSEFORGE_API_KEY").unwrap_or_default();
        Self { transport, api_key }
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Accept", "application/json".to_string()),
            ("x-api-key", self.api_key.clone()),
        ]
    }

    fn not_found(&self, mod_id: &str) -> Error {
        Error::CouldNotFindMod {
            mod_id: mod_id.to_string(),
            platform: Platform::Curseforge,
        }
    }

    fn normalize(file: ModFile, mod_name: &str) -> Option<ModCandidate> {
        let release_type = ReleaseType::from_curseforge_code(file.release_type)?;
        let hash = file
            .hashes
            .iter()
            .find(|h| h.algo == SHA1_ALGO)
            .map(|h| h.value.clone())?;

        let mut loader_tags = Vec::new();
        let mut game_versions = Vec::new();
        for entry in &file.sortable_game_versions {
            loader_tags.push(entry.game_version_name.to_lowercase());
            if !entry.game_version.is_empty() {
                game_versions.push(entry.game_version.clone());
            }
        }

        Some(ModCandidate {
            name: mod_name.to_string(),
            version_label: file.file_name.clone(),
            file_name: file.file_name,
            release_date: file.file_date,
            hash,
            download_url: file.download_url,
            release_type,
            loader_tags,
            game_versions,
            available: file.is_available && HEALTHY_FILE_STATUSES.contains(&file.file_status),
        })
    }

    async fn fetch_name(&self, mod_id: &str) -> Result<String, Error> {
        let url = format!("{API_BASE}/mods/{}", urlencoding::encode(mod_id));
        let response = self
            .transport
            .fetch(&url, &self.headers())
            .await
            .map_err(|_| self.not_found(mod_id))?;
        if !response.ok {
            return Err(self.not_found(mod_id));
        }
        let details: ModResponse = response.json().map_err(|_| self.not_found(mod_id))?;
        Ok(details.data.name)
    }

    async fn fetch_files(&self, mod_id: &str) -> Result<Vec<ModFile>, Error> {
        let mut files: Vec<ModFile> = Vec::new();
        let mut index = 0u32;
        loop {
            let url = format!(
                "{API_BASE}/mods/{}/files?index={index}&pageSize={PAGE_SIZE}",
                urlencoding::encode(mod_id)
            );
            let response = self
                .transport
                .fetch(&url, &self.headers())
                .await
                .map_err(|_| self.not_found(mod_id))?;
            if !response.ok {
                return Err(self.not_found(mod_id));
            }
            let page: FilesResponse = response.json().map_err(|_| self.not_found(mod_id))?;

            let count = page.data.len() as u32;
            files.extend(page.data);

            if count < PAGE_SIZE || index + count >= page.pagination.total_count {
                break;
            }
            index += count;
        }
        Ok(files)
    }
}

#[async_trait]
impl ModPlatform for CurseforgePlatform {
    fn platform(&self) -> Platform {
        Platform::Curseforge
    }

    async fn fetch_candidates(&self, mod_id: &str) -> Result<ModListing, Error> {
        let name = self.fetch_name(mod_id).await?;
        let files = self.fetch_files(mod_id).await?;
        debug!("curseforge: {} files listed for '{mod_id}'", files.len());

        let candidates: Vec<ModCandidate> = files
            .into_iter()
            .filter_map(|file| Self::normalize(file, &name))
            .collect();
        Ok(ModListing { name, candidates })
    }
}
