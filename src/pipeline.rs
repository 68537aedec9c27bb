use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::{DetectError, Result};

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Context shared by every stage of a detection run
#[derive(Clone, Debug, Default)]
pub struct PipelineContext {
    pub verbose: bool,
    pub debug: Option<DebugConfig>,
}

impl PipelineContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable verbose per-contour output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(DetectError::invalid_input(
                    &output_dir,
                    "debug directory is not empty",
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });

        Ok(self)
    }

    /// Directory name for a stage, e.g. `03_mask`
    pub fn stage_dir_name(stage_index: usize, stage_name: &str) -> String {
        format!("{:02}_{}", stage_index, stage_name.to_lowercase().replace(' ', "_"))
    }

    /// Save an intermediate image if debug mode is enabled.
    ///
    /// Returns the written path, or `None` when debug mode is off.
    pub fn save_debug_image(
        &self,
        stage_index: usize,
        stage_name: &str,
        image: &DynamicImage,
    ) -> Result<Option<PathBuf>> {
        let Some(debug_config) = &self.debug else {
            return Ok(None);
        };

        let step_dir_name = Self::stage_dir_name(stage_index, stage_name);
        let step_dir = debug_config.output_dir.join(&step_dir_name);
        std::fs::create_dir_all(&step_dir)?;

        let output_path = step_dir.join("01.png");
        image.save(&output_path)?;

        tracing::debug!(path = %output_path.display(), "saved debug image");
        if self.verbose {
            println!("  Debug: saved {}/01.png", step_dir_name);
        }

        Ok(Some(output_path))
    }

    pub fn debug_dir(&self) -> Option<&Path> {
        self.debug.as_ref().map(|d| d.output_dir.as_path())
    }
}
