use image::{Rgb, RgbImage};

// Writes background.png and foreground.png for trying the detector:
// a 400x300 gradient scene, and the same scene with a white square and a
// tilted bar placed on it.
fn main() -> anyhow::Result<()> {
    let (width, height) = (400u32, 300u32);
    let mut background = RgbImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let r = (x * 120 / width) as u8;
            let g = (y * 120 / height) as u8;
            background.put_pixel(x, y, Rgb([r, g, 60]));
        }
    }

    let mut foreground = background.clone();

    // 40x40 square, about 1.3% of the frame
    for y in 60..100 {
        for x in 80..120 {
            foreground.put_pixel(x, y, Rgb([255, 255, 255]));
        }
    }

    // 90x30 bar rotated by 35 degrees
    let (sin, cos) = 35f64.to_radians().sin_cos();
    for y in 0..height {
        for x in 0..width {
            let dx = x as f64 - 280.0;
            let dy = y as f64 - 190.0;
            let u = dx * cos + dy * sin;
            let v = -dx * sin + dy * cos;
            if u.abs() <= 45.0 && v.abs() <= 15.0 {
                foreground.put_pixel(x, y, Rgb([240, 240, 240]));
            }
        }
    }

    background.save("background.png")?;
    foreground.save("foreground.png")?;
    println!("Created background.png and foreground.png ({}x{})", width, height);
    println!("Run: diffloc background.png foreground.png -v");

    Ok(())
}
