//! Synthetic test-image generation.
//!
//! Produces noisy gradient images decorated with random filled shapes, for
//! exercising the pipeline without a real photo collection. Sizes are
//! randomized so tiling sees a mix of patch-grid shapes.

use anyhow::{Context, Result};
use image::{ImageBuffer, Rgb, RgbImage};
use rand::Rng;
use std::fs;
use std::path::Path;

/// One synthetic image: a per-channel gradient with pixel noise, overlaid
/// with a handful of random rectangles and ellipses.
pub fn generate_test_image<R: Rng>(rng: &mut R) -> RgbImage {
    let size = rng.gen_range(256..=512);

    let mut img: RgbImage = {
        let noise: Vec<i32> = (0..(size * size * 3))
            .map(|_| rng.gen_range(-20..=20))
            .collect();
        ImageBuffer::from_fn(size, size, |x, y| {
            let idx = ((y * size + x) * 3) as usize;
            let r = (x as i32 * 255 / size as i32) + noise[idx];
            let g = (y as i32 * 255 / size as i32) + noise[idx + 1];
            let b = ((x + y) as i32 * 255 / (2 * size) as i32) + noise[idx + 2];
            Rgb([
                r.clamp(0, 255) as u8,
                g.clamp(0, 255) as u8,
                b.clamp(0, 255) as u8,
            ])
        })
    };

    for _ in 0..rng.gen_range(3..=8) {
        let color = Rgb([rng.gen(), rng.gen(), rng.gen()]);
        let x1 = rng.gen_range(0..size / 2);
        let y1 = rng.gen_range(0..size / 2);
        let x2 = rng.gen_range(size / 2..size);
        let y2 = rng.gen_range(size / 2..size);
        if rng.gen_bool(0.5) {
            fill_rect(&mut img, x1, y1, x2, y2, color);
        } else {
            fill_ellipse(&mut img, x1, y1, x2, y2, color);
        }
    }

    img
}

fn fill_rect(img: &mut RgbImage, x1: u32, y1: u32, x2: u32, y2: u32, color: Rgb<u8>) {
    for y in y1..=y2 {
        for x in x1..=x2 {
            img.put_pixel(x, y, color);
        }
    }
}

/// Fill the ellipse inscribed in the bounding box (x1, y1)..(x2, y2).
fn fill_ellipse(img: &mut RgbImage, x1: u32, y1: u32, x2: u32, y2: u32, color: Rgb<u8>) {
    let cx = (x1 + x2) as f64 / 2.0;
    let cy = (y1 + y2) as f64 / 2.0;
    let rx = ((x2 - x1) as f64 / 2.0).max(1.0);
    let ry = ((y2 - y1) as f64 / 2.0).max(1.0);

    for y in y1..=y2 {
        for x in x1..=x2 {
            let dx = (x as f64 - cx) / rx;
            let dy = (y as f64 - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Write `count` synthetic images into `output_dir` as
/// `test_image_{i:03}.png`.
pub fn generate_test_images<R: Rng>(output_dir: &Path, count: usize, rng: &mut R) -> Result<()> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create test image directory: {}",
            output_dir.display()
        )
    })?;

    println!("Creating {} synthetic test images...", count);
    for i in 0..count {
        let img = generate_test_image(rng);
        let path = output_dir.join(format!("test_image_{:03}.png", i));
        img.save(&path)
            .with_context(|| format!("Failed to save test image: {}", path.display()))?;
    }
    println!("Test images saved to: {}", output_dir.display());

    Ok(())
}
