//! Asset loader contract.
//!
//! The loader is the expensive, asynchronous boundary to the external
//! photo-asset store: given an asset identifier and a target rendition it
//! produces a decoded image, or nothing when the asset is deleted,
//! inaccessible, or fails to decode. Absence is the only failure signal;
//! the pipeline never surfaces loader errors to callers.

use async_trait::async_trait;

use gallery_core::{AssetId, DecodedImage, FitMode, PixelSize};

/// Asynchronous producer of decoded image renditions.
///
/// Implementations must be safe to call concurrently for different
/// assets; for any single cache key the pipeline guarantees at most one
/// concurrent `load` call. Timeout policy, if any, belongs to the
/// implementation — the pipeline imposes none.
#[async_trait]
pub trait AssetLoader: Send + Sync {
    /// Produce a decoded rendition of `asset_id`.
    ///
    /// `target_size` is the tier's bound, or `None` for the asset's
    /// native resolution; `fit_mode` says how the image is fitted into
    /// that bound. Returns `None` when no image can be produced.
    async fn load(
        &self,
        asset_id: &AssetId,
        target_size: Option<PixelSize>,
        fit_mode: FitMode,
    ) -> Option<DecodedImage>;
}
