use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Opaque identifier of a browser tab, generated when the tab is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(Uuid);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TabId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for TabId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Represents a browser tab with its last known url and cached thumbnail.
///
/// Whether a tab is active is owned by the registry, not the tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tab {
    pub id: TabId,
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

impl Tab {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: TabId::new(),
            url: url.into(),
            thumbnail: None,
        }
    }
}

/// Encoding of a captured thumbnail.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpg,
    Png,
}

/// A captured screenshot of a tab, shown by the tab switcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thumbnail {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

/// Partial update merged into a tab; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabUpdate {
    pub url: Option<String>,
    pub thumbnail: Option<Thumbnail>,
}

impl TabUpdate {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            thumbnail: None,
        }
    }

    pub fn snapshot(url: impl Into<String>, thumbnail: Thumbnail) -> Self {
        Self {
            url: Some(url.into()),
            thumbnail: Some(thumbnail),
        }
    }
}

mod base64_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
