// Closed enums shared across the configuration and platform layers

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A mod hosting platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Curseforge,
    Modrinth,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Curseforge => "curseforge",
            Platform::Modrinth => "modrinth",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_lowercase().as_str() {
            "curseforge" => Ok(Platform::Curseforge),
            "modrinth" => Ok(Platform::Modrinth),
            _ => Err(Error::UnknownPlatform(s.to_string())),
        }
    }
}

/// The mod-loading runtime an artifact declares compatibility with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loader {
    Forge,
    Fabric,
    Quilt,
    Neoforge,
    Liteloader,
    Cauldron,
}

impl Loader {
    pub fn as_str(&self) -> &'static str {
        match self {
            Loader::Forge => "forge",
            Loader::Fabric => "fabric",
            Loader::Quilt => "quilt",
            Loader::Neoforge => "neoforge",
            Loader::Liteloader => "liteloader",
            Loader::Cauldron => "cauldron",
        }
    }
}

impl fmt::Display for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Loader {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_lowercase().as_str() {
            "forge" => Ok(Loader::Forge),
            "fabric" => Ok(Loader::Fabric),
            "quilt" => Ok(Loader::Quilt),
            "neoforge" => Ok(Loader::Neoforge),
            "liteloader" => Ok(Loader::Liteloader),
            "cauldron" => Ok(Loader::Cauldron),
            _ => Err(Error::UnknownLoader(s.to_string())),
        }
    }
}

/// Stability tier of a release artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Alpha,
    Beta,
    Release,
}

impl ReleaseType {
    /// Map the CurseForge numeric release-type code. Unknown codes yield
    /// `None` so the file is excluded instead of crashing the fetch.
    pub fn from_curseforge_code(code: u8) -> Option<ReleaseType> {
        match code {
            1 => Some(ReleaseType::Release),
            2 => Some(ReleaseType::Beta),
            3 => Some(ReleaseType::Alpha),
            _ => None,
        }
    }

    /// Parse the Modrinth `version_type` label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<ReleaseType> {
        match label {
            "alpha" => Some(ReleaseType::Alpha),
            "beta" => Some(ReleaseType::Beta),
            "release" => Some(ReleaseType::Release),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Alpha => "alpha",
            ReleaseType::Beta => "beta",
            ReleaseType::Release => "release",
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
