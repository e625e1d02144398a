//! Geometric augmentation of training patches.
//!
//! Expansion order is fixed: identity, flip_h, flip_v, then the three
//! rotations together when rotate_90 was requested. The order matters
//! because patch indices (and so output filenames) are positions in this
//! sequence.

use image::imageops;
use image::RgbImage;

use crate::config::Augmentation;

/// Expand one patch into its augmented variants, identity always first.
pub fn augment_patch(patch: &RgbImage, augmentations: &[Augmentation]) -> Vec<RgbImage> {
    let mut variants = vec![patch.clone()];

    if augmentations.contains(&Augmentation::FlipH) {
        variants.push(imageops::flip_horizontal(patch));
    }

    if augmentations.contains(&Augmentation::FlipV) {
        variants.push(imageops::flip_vertical(patch));
    }

    if augmentations.contains(&Augmentation::Rotate90) {
        variants.push(imageops::rotate90(patch));
        variants.push(imageops::rotate180(patch));
        variants.push(imageops::rotate270(patch));
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    /// 2x2 patch with four distinct corner colors.
    fn corner_patch() -> RgbImage {
        let mut img = ImageBuffer::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.put_pixel(1, 1, Rgb([255, 255, 255]));
        img
    }

    #[test]
    fn test_no_augmentations_keeps_identity_only() {
        let patch = corner_patch();
        let variants = augment_patch(&patch, &[]);
        assert_eq!(variants.len(), 1);
        assert_eq!(&variants[0], &patch);
    }

    #[test]
    fn test_rotate_90_always_yields_three_rotations() {
        let patch = corner_patch();
        let variants = augment_patch(&patch, &[Augmentation::Rotate90]);
        assert_eq!(variants.len(), 4);

        // rotate90 moves the top-left corner to the top-right.
        assert_eq!(*variants[1].get_pixel(1, 0), Rgb([255, 0, 0]));
        // rotate180 moves it to the bottom-right.
        assert_eq!(*variants[2].get_pixel(1, 1), Rgb([255, 0, 0]));
        // rotate270 moves it to the bottom-left.
        assert_eq!(*variants[3].get_pixel(0, 1), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_full_set_has_six_variants_in_order() {
        let patch = corner_patch();
        let variants = augment_patch(
            &patch,
            &[
                Augmentation::FlipH,
                Augmentation::FlipV,
                Augmentation::Rotate90,
            ],
        );
        assert_eq!(variants.len(), 6);

        // identity, flip_h, flip_v, then the rotations.
        assert_eq!(&variants[0], &patch);
        assert_eq!(*variants[1].get_pixel(1, 0), Rgb([255, 0, 0]));
        assert_eq!(*variants[2].get_pixel(0, 1), Rgb([255, 0, 0]));
        assert_eq!(*variants[3].get_pixel(1, 0), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_request_order_does_not_change_output_order() {
        let patch = corner_patch();
        let a = augment_patch(&patch, &[Augmentation::FlipH, Augmentation::FlipV]);
        let b = augment_patch(&patch, &[Augmentation::FlipV, Augmentation::FlipH]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_requests_do_not_duplicate_variants() {
        let patch = corner_patch();
        let variants = augment_patch(&patch, &[Augmentation::FlipH, Augmentation::FlipH]);
        assert_eq!(variants.len(), 2);
    }
}
