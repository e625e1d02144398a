//! Patch extraction.
//!
//! Slides a square window over a source image in row-major order and crops
//! one patch per position. A stride equal to the patch size gives
//! non-overlapping tiling; a smaller stride gives overlapping patches.

use image::imageops;
use image::RgbImage;

/// Extract all `patch_size` x `patch_size` patches from `image`.
///
/// Patches are produced left to right within a row, top to bottom across
/// rows, and never extend past the image bounds. An image smaller than
/// `patch_size` in either dimension yields no patches; the caller decides
/// how to report the skip.
pub fn extract_patches(image: &RgbImage, patch_size: u32, stride: u32) -> Vec<RgbImage> {
    let (width, height) = image.dimensions();
    let mut patches = Vec::new();

    if patch_size == 0 || stride == 0 || width < patch_size || height < patch_size {
        return patches;
    }

    let mut y = 0;
    while y + patch_size <= height {
        let mut x = 0;
        while x + patch_size <= width {
            patches.push(imageops::crop_imm(image, x, y, patch_size, patch_size).to_image());
            x += stride;
        }
        y += stride;
    }

    patches
}
