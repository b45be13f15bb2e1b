//! Photo assets and their identifiers.
//!
//! An asset is a unit of photographic media owned by an external store.
//! The gallery never holds pixel data for an asset directly; it refers to
//! the asset by a stable identifier and asks the asset loader for decoded
//! renditions on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable, opaque identifier for a photo asset.
///
/// Two assets with the same identifier are the same logical photo. The
/// identifier's content is owned by the external asset store; the gallery
/// only requires it to be stable and hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Create an asset identifier from its raw string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for AssetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A photo asset as described by the enumeration source.
///
/// Carries the metadata the source supplies alongside the identifier:
/// creation time and native pixel dimensions. Identity is the identifier
/// alone; two `PhotoAsset` values with the same id refer to the same photo
/// even if their metadata snapshots differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoAsset {
    /// Stable identifier within the external asset store.
    pub id: AssetId,

    /// Capture/creation time, if the source knows it.
    pub created_at: Option<DateTime<Utc>>,

    /// Native width of the asset in pixels.
    pub pixel_width: u32,

    /// Native height of the asset in pixels.
    pub pixel_height: u32,
}

impl PhotoAsset {
    /// Create an asset record.
    pub fn new(
        id: impl Into<AssetId>,
        created_at: Option<DateTime<Utc>>,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            created_at,
            pixel_width,
            pixel_height,
        }
    }

    /// Width-over-height aspect ratio of the native asset.
    ///
    /// Returns `1.0` for degenerate zero-height metadata.
    pub fn aspect_ratio(&self) -> f64 {
        if self.pixel_height == 0 {
            return 1.0;
        }
        f64::from(self.pixel_width) / f64::from(self.pixel_height)
    }
}

impl PartialEq for PhotoAsset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PhotoAsset {}

impl std::hash::Hash for PhotoAsset {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_display_roundtrip() {
        let id = AssetId::new("album/IMG_0042");
        assert_eq!(id.as_str(), "album/IMG_0042");
        assert_eq!(id.to_string(), "album/IMG_0042");
    }

    #[test]
    fn test_asset_identity_is_the_identifier() {
        let a = PhotoAsset::new("photo-1", None, 4032, 3024);
        let b = PhotoAsset::new("photo-1", None, 100, 100);
        let c = PhotoAsset::new("photo-2", None, 4032, 3024);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_aspect_ratio() {
        let landscape = PhotoAsset::new("p", None, 4032, 3024);
        assert!((landscape.aspect_ratio() - 4032.0 / 3024.0).abs() < 1e-9);

        let degenerate = PhotoAsset::new("q", None, 4032, 0);
        assert_eq!(degenerate.aspect_ratio(), 1.0);
    }
}
