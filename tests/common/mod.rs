mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from diffloc for tests; not every test binary uses all of them
#[allow(unused_imports)]
pub use diffloc::{Centroid, DetectError, DetectionPipeline, DetectorConfig};
