//! Variance filtering of low-information patches.
//!
//! Near-uniform patches (sky, flat backgrounds) carry almost no training
//! signal, so they are rejected when their pixel standard deviation falls
//! below a threshold. The statistic is the population standard deviation
//! over every channel sample of the patch.

use image::RgbImage;

/// Population standard deviation across all RGB samples of the patch.
pub fn patch_std(patch: &RgbImage) -> f64 {
    let samples = patch.as_raw();
    if samples.is_empty() {
        return 0.0;
    }

    let n = samples.len() as f64;
    let mean = samples.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = samples
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    variance.sqrt()
}

/// Whether a patch passes the variance filter.
///
/// A threshold of zero or below disables filtering entirely.
pub fn accepts(patch: &RgbImage, min_std: f64) -> bool {
    if min_std <= 0.0 {
        return true;
    }
    patch_std(patch) >= min_std
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn uniform_patch(value: u8) -> RgbImage {
        ImageBuffer::from_pixel(16, 16, Rgb([value, value, value]))
    }

    fn checkerboard_patch() -> RgbImage {
        ImageBuffer::from_fn(16, 16, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn test_uniform_patch_has_zero_std() {
        assert_eq!(patch_std(&uniform_patch(128)), 0.0);
    }

    #[test]
    fn test_checkerboard_std() {
        // Half the samples at 0, half at 255: std is 127.5.
        let std = patch_std(&checkerboard_patch());
        assert!((std - 127.5).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_patch_rejected_with_positive_threshold() {
        assert!(!accepts(&uniform_patch(200), 10.0));
    }

    #[test]
    fn test_textured_patch_accepted() {
        assert!(accepts(&checkerboard_patch(), 10.0));
    }

    #[test]
    fn test_zero_threshold_accepts_everything() {
        assert!(accepts(&uniform_patch(0), 0.0));
        assert!(accepts(&uniform_patch(255), 0.0));
        assert!(accepts(&checkerboard_patch(), 0.0));
    }

    #[test]
    fn test_rejection_is_strictly_less_than() {
        let patch = checkerboard_patch();
        let std = patch_std(&patch);
        // A threshold exactly at the measured std still accepts.
        assert!(accepts(&patch, std));
        assert!(!accepts(&patch, std + 0.1));
    }
}
