use std::path::Path;

use image::{DynamicImage, ImageReader};

use crate::error::{DetectError, Result};

/// Load and decode an image, reporting any failure as invalid input
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| DetectError::invalid_input(path, format!("cannot open image: {e}")))?
        .with_guessed_format()
        .map_err(|e| DetectError::invalid_input(path, format!("cannot read image: {e}")))?;

    let img = reader
        .decode()
        .map_err(|e| DetectError::invalid_input(path, format!("failed to decode image: {e}")))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DetectError::invalid_input(path, "image has no pixels"));
    }

    Ok(img)
}

/// `(width, height)` in pixels
pub fn image_size(img: &DynamicImage) -> (u32, u32) {
    (img.width(), img.height())
}
