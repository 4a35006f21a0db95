// Artifact download with sha1 verification

use crate::error::Error;
use crate::platforms::candidate::ModDescriptor;
use anyhow::Result;
use reqwest::Client;
use sha1::{Digest, Sha1};
use std::path::{Path, PathBuf};

/// User-Agent string for all HTTP requests
const USER_AGENT: &str = concat!("mmm/", env!("CARGO_PKG_VERSION"));

lazy_static::lazy_static! {
    /// CDN downloads bypass the platform-API rate limiter; they are served
    /// from edge hosts with no request quota.
    static ref CLIENT: Client = Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to create HTTP client");
}

/// Download a resolved artifact into the mods folder, verifying the payload
/// against the descriptor's sha1 digest. A mismatch leaves nothing on disk.
pub async fn download_mod(descriptor: &ModDescriptor, mods_folder: &str) -> Result<PathBuf> {
    let response = CLIENT.get(&descriptor.download_url).send().await?;
    if !response.status().is_success() {
        anyhow::bail!(
            "download failed: {} ({})",
            descriptor.download_url,
            response.status()
        );
    }

    let bytes = response.bytes().await?;
    verify_sha1(&bytes, &descriptor.hash, &descriptor.file_name)?;

    std::fs::create_dir_all(mods_folder)?;
    let target = Path::new(mods_folder).join(&descriptor.file_name);
    std::fs::write(&target, &bytes)?;
    Ok(target)
}

fn verify_sha1(data: &[u8], expected: &str, file_name: &str) -> Result<(), Error> {
    let mut hasher = Sha1::new();
    hasher.update(data);
    let actual = hex::encode(hasher.finalize());
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(Error::HashMismatch {
            file_name: file_name.to_string(),
            expected: expected.to_string(),
            actual,
        })
    }
}

/// Delete an installed file, ignoring one that is already gone.
pub fn remove_installed(mods_folder: &str, file_name: &str) -> Result<()> {
    let target = Path::new(mods_folder).join(file_name);
    match std::fs::remove_file(&target) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_sha1_accepts_matching_digest() {
        // sha1("hello world")
        let expected = "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed";
        assert!(verify_sha1(b"hello world", expected, "a.jar").is_ok());
    }

    #[test]
    fn test_verify_sha1_is_case_insensitive() {
        let expected = "2AAE6C35C94FCFB415DBE95F408B9CE91EE846ED";
        assert!(verify_sha1(b"hello world", expected, "a.jar").is_ok());
    }

    #[test]
    fn test_verify_sha1_rejects_mismatch() {
        let err = verify_sha1(b"hello world", "deadbeef", "a.jar").unwrap_err();
        assert!(matches!(
            err,
            Error::HashMismatch { file_name, .. } if file_name == "a.jar"
        ));
    }

    #[test]
    fn test_remove_installed_ignores_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(remove_installed(dir.path().to_str().unwrap(), "gone.jar").is_ok());
    }
}
