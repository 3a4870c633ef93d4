//! Native size detection for shell icon bitmaps.
//!
//! The shell hands back every icon on a fixed canvas (256×256 for the jumbo
//! image list). Icons that only ship smaller frames are drawn in the top-left
//! corner and the rest of the canvas is left as uniform padding, so the real
//! resolution can be recovered by checking which canonical boundaries have
//! nothing but padding beyond them.

use image::RgbaImage;

use crate::error::{IconError, Result};

/// Canonical icon sizes, largest first.
pub const CANONICAL_SIZES: [u32; 6] = [256, 128, 64, 48, 32, 16];

pub const MAX_CANONICAL_SIZE: u32 = CANONICAL_SIZES[0];
pub const MIN_CANONICAL_SIZE: u32 = CANONICAL_SIZES[CANONICAL_SIZES.len() - 1];

/// Determine the native resolution of an icon drawn in the top-left corner
/// of `bitmap`.
///
/// Returns one of [`CANONICAL_SIZES`], or the bitmap's smaller dimension when
/// the canvas is too small to hold the canonical size that was reached.
pub fn detect_native_size(bitmap: &RgbaImage) -> Result<u32> {
    let (width, height) = bitmap.dimensions();
    if width < MIN_CANONICAL_SIZE || height < MIN_CANONICAL_SIZE {
        return Err(IconError::InvalidInput(format!(
            "bitmap is {}x{}, smaller than the {}px minimum",
            width, height, MIN_CANONICAL_SIZE
        )));
    }

    let mut size = MAX_CANONICAL_SIZE;
    for &next in &CANONICAL_SIZES[1..] {
        if !band_is_uniform(bitmap, next, size) {
            break;
        }
        size = next;
    }

    Ok(size.min(width.min(height)))
}

/// Whether every pixel of the L-shaped band between `inner` and `outer`
/// (clipped to the canvas) matches the band's bottom-right corner pixel.
///
/// A band that lies entirely outside the canvas is uniform.
fn band_is_uniform(bitmap: &RgbaImage, inner: u32, outer: u32) -> bool {
    let right = outer.min(bitmap.width());
    let bottom = outer.min(bitmap.height());
    if right <= inner && bottom <= inner {
        return true;
    }

    let reference = *bitmap.get_pixel(right - 1, bottom - 1);

    // Rows below `inner`, full clipped width.
    for y in inner..bottom {
        for x in 0..right {
            if *bitmap.get_pixel(x, y) != reference {
                return false;
            }
        }
    }

    // Columns right of `inner`, above the rows already checked.
    for y in 0..inner.min(bottom) {
        for x in inner..right {
            if *bitmap.get_pixel(x, y) != reference {
                return false;
            }
        }
    }

    true
}

/// Copy the top-left `size`×`size` region of `bitmap`.
pub fn crop_to_native(bitmap: &RgbaImage, size: u32) -> RgbaImage {
    let size = size.min(bitmap.width()).min(bitmap.height());
    image::imageops::crop_imm(bitmap, 0, 0, size, size).to_image()
}
