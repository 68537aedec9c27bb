use serde::{Deserialize, Serialize};

use crate::error::{DetectError, Result};
use crate::models::AreaBounds;

/// Tunable parameters of a detection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Seed value for the threshold call; the computed Otsu level supersedes it
    pub otsu_low_thresh: u8,
    /// Value written to "changed" mask pixels
    pub otsu_high_thresh: u8,
    /// Minimum acceptable Otsu level; anything lower counts as no change
    pub otsu_sensitivity: u8,
    /// Fraction of the background area below which contours are noise
    pub min_ratio: f64,
    /// Fraction of the background area above which contours are a global shift
    pub max_ratio: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            otsu_low_thresh: 20,
            otsu_high_thresh: 255,
            otsu_sensitivity: 40,
            min_ratio: 0.005,
            max_ratio: 0.05,
        }
    }
}

impl DetectorConfig {
    pub fn with_thresholds(mut self, low: u8, high: u8) -> Self {
        self.otsu_low_thresh = low;
        self.otsu_high_thresh = high;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: u8) -> Self {
        self.otsu_sensitivity = sensitivity;
        self
    }

    pub fn with_area_ratios(mut self, min_ratio: f64, max_ratio: f64) -> Self {
        self.min_ratio = min_ratio;
        self.max_ratio = max_ratio;
        self
    }

    /// Check the ratios and the "on" value.
    pub fn validate(&self) -> Result<()> {
        if !self.min_ratio.is_finite() || !self.max_ratio.is_finite() {
            return Err(DetectError::invalid_config("area ratios must be finite"));
        }
        if self.min_ratio < 0.0 || self.max_ratio > 1.0 {
            return Err(DetectError::invalid_config(format!(
                "area ratios must lie in [0, 1], got {} and {}",
                self.min_ratio, self.max_ratio
            )));
        }
        if self.min_ratio >= self.max_ratio {
            return Err(DetectError::invalid_config(format!(
                "min_ratio ({}) must be smaller than max_ratio ({})",
                self.min_ratio, self.max_ratio
            )));
        }
        if self.otsu_high_thresh == 0 {
            return Err(DetectError::invalid_config(
                "otsu_high_thresh must be non-zero or the mask is always empty",
            ));
        }
        Ok(())
    }

    /// Derive the contour area bounds from the background image size.
    ///
    /// Both bounds are truncated toward zero, so tiny images can collapse them
    /// onto the same value; that case is rejected.
    pub fn area_bounds(&self, width: u32, height: u32) -> Result<AreaBounds> {
        let pixels = width as f64 * height as f64;
        let min_area = (pixels * self.min_ratio) as u64;
        let max_area = (pixels * self.max_ratio) as u64;

        if min_area >= max_area {
            return Err(DetectError::invalid_config(format!(
                "{}x{} image leaves no room between min area {} and max area {}",
                width, height, min_area, max_area
            )));
        }

        Ok(AreaBounds { min_area, max_area })
    }
}
