//! Memory cost estimation for cached images.
//!
//! The estimate treats every image as uncompressed RGBA. It is an
//! approximation used to bound cache growth, not an exact accounting of
//! allocator behavior.

use gallery_core::DecodedImage;

/// Bytes per pixel of an uncompressed RGBA image.
pub const BYTES_PER_PIXEL: usize = 4;

/// Approximate memory footprint in bytes of a decoded image with the
/// given pixel dimensions.
pub fn estimated_cost(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

/// Cost of a decoded image, from its pixel dimensions.
pub fn image_cost(image: &DecodedImage) -> usize {
    estimated_cost(image.width(), image.height())
}
