#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Gray level of the synthetic empty scene
pub const SCENE_GRAY: u8 = 128;

/// Uniform `size x size` RGB scene.
pub fn uniform_scene(size: u32, level: u8) -> RgbImage {
    RgbImage::from_pixel(size, size, Rgb([level, level, level]))
}

/// Paint an axis-aligned filled square of `side` pixels centered on `center`.
pub fn paint_square(img: &mut RgbImage, center: (u32, u32), side: u32, color: Rgb<u8>) {
    let x0 = center.0 - side / 2;
    let y0 = center.1 - side / 2;
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            img.put_pixel(x, y, color);
        }
    }
}

/// Paint an axis-aligned filled `width x height` rectangle with its top-left at `origin`.
pub fn paint_rect(img: &mut RgbImage, origin: (u32, u32), width: u32, height: u32, color: Rgb<u8>) {
    for y in origin.1..origin.1 + height {
        for x in origin.0..origin.0 + width {
            img.put_pixel(x, y, color);
        }
    }
}

/// Paint a filled rectangle rotated by `angle_deg` (from +x toward +y).
pub fn paint_rotated_rect(
    img: &mut RgbImage,
    center: (f64, f64),
    size: (f64, f64),
    angle_deg: f64,
    color: Rgb<u8>,
) {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let (width, height) = img.dimensions();
    for y in 0..height {
        for x in 0..width {
            let dx = x as f64 - center.0;
            let dy = y as f64 - center.1;
            let u = dx * cos + dy * sin;
            let v = -dx * sin + dy * cos;
            if u.abs() <= size.0 / 2.0 && v.abs() <= size.1 / 2.0 {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// 200x200 gray background and the same scene with a 20x20 white square at (100, 100).
pub fn square_scene() -> (DynamicImage, DynamicImage) {
    let background = uniform_scene(200, SCENE_GRAY);
    let mut foreground = background.clone();
    paint_square(&mut foreground, (100, 100), 20, Rgb([255, 255, 255]));
    (
        DynamicImage::ImageRgb8(background),
        DynamicImage::ImageRgb8(foreground),
    )
}

/// Save an RGB image as PNG into `dir` and return its path.
pub fn save_png(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save test image");
    path
}
