//! Cache key derivation.
//!
//! A cache key combines an asset identifier with a resolution tier so
//! that different renditions of the same asset occupy independent
//! entries. The tier tag comes first and is drawn from a closed,
//! colon-free set, so the first `:` always delimits the tag — asset
//! identifiers may contain any characters, including the separator,
//! without creating collisions between distinct (asset, tier) pairs.

use gallery_core::{AssetId, ResolutionTier};

/// Separator between the tier tag and the asset identifier.
const SEPARATOR: char = ':';

/// Derived cache identity for one rendition of one asset.
///
/// Equal (asset, tier) inputs always produce equal keys; unequal pairs
/// never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for an asset at a resolution tier.
    pub fn new(asset_id: &AssetId, tier: ResolutionTier) -> Self {
        Self(format!("{}{}{}", tier.tag(), SEPARATOR, asset_id))
    }

    /// The key's string form, `<tier-tag>:<asset-id>`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let id = AssetId::new("photo-1");
        let a = CacheKey::new(&id, ResolutionTier::Thumbnail);
        let b = CacheKey::new(&id, ResolutionTier::Thumbnail);
        assert_eq!(a, b);
    }

    #[test]
    fn test_tiers_never_collide() {
        let id = AssetId::new("photo-1");
        let thumb = CacheKey::new(&id, ResolutionTier::Thumbnail);
        let full = CacheKey::new(&id, ResolutionTier::Full);
        let hq = CacheKey::new(&id, ResolutionTier::HighQuality);

        assert_ne!(thumb, full);
        assert_ne!(thumb, hq);
        assert_ne!(full, hq);
    }

    #[test]
    fn test_ids_containing_separator_do_not_collide() {
        // "full:x" as an asset id at thumbnail tier must not equal
        // asset "x" at full tier.
        let tricky = AssetId::new("full:x");
        let plain = AssetId::new("x");

        let a = CacheKey::new(&tricky, ResolutionTier::Thumbnail);
        let b = CacheKey::new(&plain, ResolutionTier::Full);
        assert_ne!(a, b);

        // And the tag prefix still parses unambiguously.
        assert_eq!(a.as_str(), "thumb:full:x");
    }

    #[test]
    fn test_distinct_assets_distinct_keys() {
        let a = CacheKey::new(&AssetId::new("a"), ResolutionTier::Full);
        let b = CacheKey::new(&AssetId::new("b"), ResolutionTier::Full);
        assert_ne!(a, b);
    }
}
