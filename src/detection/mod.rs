pub mod annotate;
pub mod contours;
pub mod geometry;
pub mod preprocessing;
pub mod shape;

use std::path::PathBuf;

use ab_glyph::FontVec;
use image::{DynamicImage, RgbImage};
use serde::Serialize;

use crate::config::DetectorConfig;
use crate::error::{DetectError, Result};
use crate::io::image_size;
use crate::models::{AreaBounds, Centroid, Detection};
use crate::pipeline::PipelineContext;
use annotate::AnnotationStyle;

/// Everything a detection run produced
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub width: u32,
    pub height: u32,
    pub bounds: AreaBounds,
    /// Otsu level computed on the smoothed difference
    pub otsu_level: u8,
    /// Whether the level passed the sensitivity gate
    pub changed: bool,
    /// External contours found before area filtering
    pub candidate_count: usize,
    pub detections: Vec<Detection>,
    #[serde(skip)]
    pub annotated: RgbImage,
}

impl DetectionReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Background-subtraction object locator
pub struct DetectionPipeline {
    pub config: DetectorConfig,
    pub style: AnnotationStyle,
    context: PipelineContext,
    font: Option<FontVec>,
}

impl DetectionPipeline {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            style: AnnotationStyle::default(),
            context: PipelineContext::new(),
            font: None,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.context = self.context.with_verbose(verbose);
        self
    }

    /// Dump intermediate images into `output_dir`, which must be empty or absent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        self.context = self.context.with_debug(output_dir)?;
        Ok(self)
    }

    /// Font used for the angle and centroid labels
    pub fn with_font(mut self, font: FontVec) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_style(mut self, style: AnnotationStyle) -> Self {
        self.style = style;
        self
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Locate objects present in `foreground` but not in `background`.
    ///
    /// Both images must have the same dimensions; area bounds are derived
    /// from the background size.
    pub fn detect(&self, background: &DynamicImage, foreground: &DynamicImage) -> Result<DetectionReport> {
        self.config.validate()?;

        let bg_size = image_size(background);
        let fg_size = image_size(foreground);
        if bg_size != fg_size {
            return Err(DetectError::DimensionMismatch {
                background: bg_size,
                foreground: fg_size,
            });
        }

        let (width, height) = bg_size;
        let bounds = self.config.area_bounds(width, height)?;
        let verbose = self.context.verbose;

        if verbose {
            println!("Image size: {}x{}", width, height);
            println!("Contour area bounds: {} < area < {}", bounds.min_area, bounds.max_area);
        }
        self.context.save_debug_image(0, "input", foreground)?;

        // Step 1: Difference, smooth and threshold
        if verbose {
            println!("\nComputing image difference...");
        }
        let smoothed = preprocessing::smoothed_difference(
            &preprocessing::to_grayscale(background),
            &preprocessing::to_grayscale(foreground),
        );
        self.context
            .save_debug_image(1, "difference", &DynamicImage::ImageLuma8(smoothed.clone()))?;

        let outcome = preprocessing::threshold_with_gate(
            &smoothed,
            self.config.otsu_low_thresh,
            self.config.otsu_high_thresh,
            self.config.otsu_sensitivity,
        );
        let otsu_level = outcome.level();
        let changed = outcome.is_changed();
        if verbose {
            if changed {
                println!("Otsu level {} (sensitivity {})", otsu_level, self.config.otsu_sensitivity);
            } else {
                println!(
                    "Otsu level {} is below sensitivity {}, no change detected",
                    otsu_level, self.config.otsu_sensitivity
                );
            }
        }

        let mask = outcome.into_mask();
        self.context
            .save_debug_image(2, "mask", &DynamicImage::ImageLuma8(mask.clone()))?;

        // Step 2: Find and filter contours
        if verbose {
            println!("\nFinding contours...");
        }
        let candidates = contours::find_external_contours(&mask);
        let candidate_count = candidates.len();
        if verbose {
            println!("Found {} external contours (showing first 10):", candidate_count);
            for (i, contour) in candidates.iter().take(10).enumerate() {
                let area = contour.area();
                println!(
                    "  Contour {}: vertices={}, area={:.1}, kept={}",
                    i + 1,
                    contour.len(),
                    area,
                    bounds.contains(area)
                );
            }
        }
        let valid = contours::filter_by_area(candidates, bounds);
        tracing::debug!(candidates = candidate_count, valid = valid.len(), "area filter applied");

        // Step 3: Centroid and angle per contour
        let detections: Vec<Detection> = valid
            .into_iter()
            .map(|contour| {
                let analysis = shape::measure(&contour);
                let (centroid, angle) = analysis.into_pair();
                Detection {
                    area: contour.area(),
                    contour,
                    centroid,
                    angle,
                    degenerate: analysis.is_degenerate(),
                }
            })
            .collect();

        if verbose {
            println!("\nDetected {} objects", detections.len());
            for (i, d) in detections.iter().enumerate() {
                println!(
                    "  Object {}: centroid=({}, {}), angle={:.1} deg, area={:.1}",
                    i + 1,
                    d.centroid.x,
                    d.centroid.y,
                    d.angle,
                    d.area
                );
            }
        }

        // Step 4: Annotate a copy of the foreground
        let outlines: Vec<_> = detections.iter().map(|d| d.contour.clone()).collect();
        let pairs: Vec<(Centroid, f64)> = detections.iter().map(|d| (d.centroid, d.angle)).collect();
        let annotated = annotate::annotate(foreground, &outlines, &pairs, self.font.as_ref(), &self.style);
        self.context
            .save_debug_image(3, "annotated", &DynamicImage::ImageRgb8(annotated.clone()))?;

        tracing::info!(
            objects = detections.len(),
            otsu_level,
            changed,
            "detection finished"
        );

        Ok(DetectionReport {
            width,
            height,
            bounds,
            otsu_level,
            changed,
            candidate_count,
            detections,
            annotated,
        })
    }
}

impl Default for DetectionPipeline {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}
