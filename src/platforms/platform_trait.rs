// Trait definition for mod hosting platforms

use crate::error::Error;
use crate::models::Platform;
use crate::platforms::candidate::ModCandidate;

/// A mod's listing on a platform: its display name plus every downloadable
/// artifact that survived normalization.
#[derive(Debug, Clone)]
pub struct ModListing {
    pub name: String,
    pub candidates: Vec<ModCandidate>,
}

/// Contract every platform adapter implements.
///
/// An adapter owns the platform's REST schema end to end: it fetches the raw
/// file list for a mod id through the injected transport and normalizes each
/// entry into a [`ModCandidate`]. Files that cannot be normalized (unknown
/// release-type code, no sha1 hash, no usable artifact) are dropped from the
/// listing, never surfaced as errors. Nothing platform-specific leaks past
/// this boundary.
#[async_trait::async_trait]
pub trait ModPlatform: Send + Sync {
    /// Fetch and normalize the candidate artifacts for a mod id.
    ///
    /// Fails with [`Error::CouldNotFindMod`] when the mod lookup itself does
    /// not succeed; an empty candidate list is a legitimate return value and
    /// becomes a matcher-level failure instead.
    async fn fetch_candidates(&self, mod_id: &str) -> Result<ModListing, Error>;

    fn platform(&self) -> Platform;
}
