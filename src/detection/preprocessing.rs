use image::{DynamicImage, GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::definitions::Image;
use imageproc::filter::separable_filter_equal;

/// Result of differencing a background/foreground pair
#[derive(Debug, Clone)]
pub enum DifferenceOutcome {
    /// The computed Otsu level passed the sensitivity gate
    Changed { mask: GrayImage, level: u8 },
    /// The computed level fell below the sensitivity gate
    NoChange {
        width: u32,
        height: u32,
        level: u8,
    },
}

impl DifferenceOutcome {
    /// Otsu level computed on the smoothed difference.
    pub fn level(&self) -> u8 {
        match self {
            DifferenceOutcome::Changed { level, .. } | DifferenceOutcome::NoChange { level, .. } => *level,
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, DifferenceOutcome::Changed { .. })
    }

    /// Binary mask, all zero when no change was found.
    pub fn into_mask(self) -> GrayImage {
        match self {
            DifferenceOutcome::Changed { mask, .. } => mask,
            DifferenceOutcome::NoChange { width, height, .. } => GrayImage::new(width, height),
        }
    }
}

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Per-pixel absolute difference of two equally sized grayscale images
pub fn absolute_difference(a: &GrayImage, b: &GrayImage) -> GrayImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    let (width, height) = a.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        Luma([a.get_pixel(x, y)[0].abs_diff(b.get_pixel(x, y)[0])])
    })
}

/// Taps of the 5-tap Gaussian used to smooth the difference image.
///
/// The fixed binomial row `[1, 4, 6, 4, 1] / 16` is what a 5x5 Gaussian with
/// an unspecified sigma resolves to.
pub const BLUR_KERNEL: [f32; 5] = [1.0 / 16.0, 4.0 / 16.0, 6.0 / 16.0, 4.0 / 16.0, 1.0 / 16.0];

/// Mirror an out-of-range index back into `0..len` without repeating the edge
fn reflect_101(index: i64, len: i64) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let mut i = index.rem_euclid(period);
    if i >= len {
        i = period - i;
    }
    i as usize
}

/// Float copy of `img` with a mirrored frame `pad` pixels wide on every side
fn reflect_pad(img: &GrayImage, pad: u32) -> Image<Luma<f32>> {
    let (width, height) = img.dimensions();
    let (w, h) = (width as i64, height as i64);
    Image::from_fn(width + 2 * pad, height + 2 * pad, |x, y| {
        let sx = reflect_101(x as i64 - pad as i64, w);
        let sy = reflect_101(y as i64 - pad as i64, h);
        Luma([img.get_pixel(sx as u32, sy as u32)[0] as f32])
    })
}

/// Apply the 5x5 Gaussian blur, mirroring the borders.
///
/// Filtering runs in `f32` on a padded copy so the result is rounded once.
pub fn apply_blur(img: &GrayImage) -> GrayImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return img.clone();
    }

    let pad = (BLUR_KERNEL.len() / 2) as u32;
    let blurred = separable_filter_equal(&reflect_pad(img, pad), &BLUR_KERNEL[..]);

    GrayImage::from_fn(width, height, |x, y| {
        let v = blurred.get_pixel(x + pad, y + pad)[0];
        Luma([v.round().clamp(0.0, 255.0) as u8])
    })
}

/// Binarize: pixels strictly above `level` become `on_value`, the rest zero
pub fn binarize(img: &GrayImage, level: u8, on_value: u8) -> GrayImage {
    let mut binary = img.clone();
    for p in binary.pixels_mut() {
        *p = if p[0] > level { Luma([on_value]) } else { Luma([0]) };
    }
    binary
}

/// Absolute difference of a grayscale pair, smoothed with the 5x5 Gaussian
pub fn smoothed_difference(background: &GrayImage, foreground: &GrayImage) -> GrayImage {
    apply_blur(&absolute_difference(background, foreground))
}

/// Otsu-binarize a smoothed difference unless its level is below `sensitivity`
///
/// `low_thresh` is the seed for the threshold call; Otsu selection replaces it
/// with the computed level, so it has no effect on the mask.
pub fn threshold_with_gate(
    smoothed: &GrayImage,
    low_thresh: u8,
    high_thresh: u8,
    sensitivity: u8,
) -> DifferenceOutcome {
    let level = otsu_level(smoothed);

    tracing::debug!(level, low_thresh, sensitivity, "otsu level on smoothed difference");

    if level < sensitivity {
        let (width, height) = smoothed.dimensions();
        return DifferenceOutcome::NoChange { width, height, level };
    }

    DifferenceOutcome::Changed {
        mask: binarize(smoothed, level, high_thresh),
        level,
    }
}

/// Difference a grayscale pair and decide whether anything changed
pub fn difference_outcome(
    background: &GrayImage,
    foreground: &GrayImage,
    low_thresh: u8,
    high_thresh: u8,
    sensitivity: u8,
) -> DifferenceOutcome {
    threshold_with_gate(
        &smoothed_difference(background, foreground),
        low_thresh,
        high_thresh,
        sensitivity,
    )
}

/// Binary mask of the regions where `foreground` departs from `background`
///
/// Precondition: both images have the same dimensions. The detection pipeline
/// checks this before calling; mismatched sizes here are a caller bug.
pub fn compute_difference(
    background: &DynamicImage,
    foreground: &DynamicImage,
    low_thresh: u8,
    high_thresh: u8,
    sensitivity: u8,
) -> GrayImage {
    difference_outcome(
        &to_grayscale(background),
        &to_grayscale(foreground),
        low_thresh,
        high_thresh,
        sensitivity,
    )
    .into_mask()
}
