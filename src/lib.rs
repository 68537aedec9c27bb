pub mod config;
pub mod detection;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;

pub use config::DetectorConfig;
pub use detection::annotate::{AnnotationStyle, annotate};
pub use detection::contours::find_valid_contours;
pub use detection::preprocessing::compute_difference;
pub use detection::shape::analyze;
pub use detection::{DetectionPipeline, DetectionReport};
pub use error::{DetectError, Result};
pub use models::{AreaBounds, Centroid, Contour, Detection, RotatedRect, ShapeAnalysis};
pub use pipeline::{DebugConfig, PipelineContext};
