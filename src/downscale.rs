//! Low-resolution counterpart generation.

use image::imageops;
use image::RgbImage;

use crate::config::ResampleKernel;

/// Downscale a patch by an integer factor using the given kernel.
///
/// Output dimensions are `(w / scale, h / scale)` with integer floor
/// division; a patch size not divisible by the scale simply produces a
/// slightly smaller LR image. Callers wanting exact ratios should pick a
/// divisible patch size.
pub fn downscale(patch: &RgbImage, scale: u32, kernel: ResampleKernel) -> RgbImage {
    let (width, height) = patch.dimensions();
    imageops::resize(patch, width / scale, height / scale, kernel.filter_type())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn gradient_patch(size: u32) -> RgbImage {
        ImageBuffer::from_fn(size, size, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        })
    }

    #[test]
    fn test_output_dimensions() {
        let lr = downscale(&gradient_patch(100), 2, ResampleKernel::Bicubic);
        assert_eq!(lr.dimensions(), (50, 50));

        let lr = downscale(&gradient_patch(96), 4, ResampleKernel::Bicubic);
        assert_eq!(lr.dimensions(), (24, 24));
    }

    #[test]
    fn test_non_divisible_size_floors() {
        // 97 // 4 == 24, accepted rather than an error.
        let lr = downscale(&gradient_patch(97), 4, ResampleKernel::Bilinear);
        assert_eq!(lr.dimensions(), (24, 24));
    }

    #[test]
    fn test_uniform_patch_stays_uniform() {
        let patch = ImageBuffer::from_pixel(64, 64, Rgb([40, 90, 200]));
        for kernel in [
            ResampleKernel::Nearest,
            ResampleKernel::Bilinear,
            ResampleKernel::Bicubic,
            ResampleKernel::Lanczos,
        ] {
            let lr = downscale(&patch, 2, kernel);
            assert_eq!(lr.dimensions(), (32, 32));
            for pixel in lr.pixels() {
                assert_eq!(*pixel, Rgb([40, 90, 200]));
            }
        }
    }

    #[test]
    fn test_nearest_kernel_samples_source_pixels() {
        let patch = ImageBuffer::from_fn(4, 4, |x, _| {
            if x < 2 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let lr = downscale(&patch, 2, ResampleKernel::Nearest);
        assert_eq!(lr.dimensions(), (2, 2));
        assert_eq!(*lr.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*lr.get_pixel(1, 0), Rgb([255, 255, 255]));
    }
}
