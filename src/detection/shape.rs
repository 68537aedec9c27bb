use crate::detection::geometry::{min_area_rect, polygon_moments};
use crate::models::{Centroid, Contour, ShapeAnalysis};

/// Centroid and orientation of one contour.
///
/// The centroid comes from the polygon moments, truncated toward zero. The
/// angle is the minimum-area rectangle's rotation in degrees within `[0, 90)`;
/// an axis-aligned shape reports `0.0`.
pub fn measure(contour: &Contour) -> ShapeAnalysis {
    let Some((cx, cy)) = polygon_moments(&contour.points).centroid() else {
        return ShapeAnalysis::Degenerate;
    };
    let Some(rect) = min_area_rect(&contour.points) else {
        return ShapeAnalysis::Degenerate;
    };

    ShapeAnalysis::Measured {
        centroid: Centroid::new(cx as i32, cy as i32),
        angle: rect.angle,
    }
}

/// `measure` collapsed to a plain pair; degenerate contours give `((0, 0), 0.0)`.
pub fn analyze(contour: &Contour) -> (Centroid, f64) {
    measure(contour).into_pair()
}
