// Platform layer: adapters, canonical models, matching and transport

use crate::models::Platform;
use std::sync::Arc;

pub mod candidate;
pub mod curseforge;
pub mod modrinth;
pub mod platform_trait;
pub mod transport;
pub mod version_matcher;

pub use platform_trait::{ModListing, ModPlatform};

use transport::Fetch;

/// Build the adapter for a platform tag. Adding a platform means adding a
/// variant here and an adapter module; the matcher is untouched.
pub fn adapter_for(platform: Platform, transport: Arc<dyn Fetch>) -> Box<dyn ModPlatform> {
    match platform {
        Platform::Curseforge => Box::new(curseforge::CurseforgePlatform::new(transport)),
        Platform::Modrinth => Box::new(modrinth::ModrinthPlatform::new(transport)),
    }
}
