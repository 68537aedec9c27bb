use imageproc::point::Point;
use serde::{Serialize, Serializer};

/// Closed external boundary of a blob in a binary mask
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contour {
    #[serde(serialize_with = "serialize_points")]
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn from_coords(coords: &[(i32, i32)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed polygon area (shoelace, unsigned)
    pub fn area(&self) -> f64 {
        crate::detection::geometry::contour_area(&self.points)
    }
}

fn serialize_points<S>(points: &[Point<i32>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(points.iter().map(|p| [p.x, p.y]))
}

/// Integer pixel position of a shape's area-weighted center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Centroid {
    pub x: i32,
    pub y: i32,
}

impl Centroid {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangle of minimum area enclosing a point set, at any rotation.
///
/// `width` runs along the edge direction given by `angle`; `height` is
/// perpendicular to it. `angle` is in degrees within `[0, 90)`, measured from
/// the +x axis toward +y in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotatedRect {
    pub center: (f64, f64),
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl RotatedRect {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Corner points in drawing order.
    pub fn corners(&self) -> [(f64, f64); 4] {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let (cx, cy) = self.center;
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);

        // u runs along the width, v along the height
        let u = (cos * hw, sin * hw);
        let v = (-sin * hh, cos * hh);

        [
            (cx - u.0 - v.0, cy - u.1 - v.1),
            (cx + u.0 - v.0, cy + u.1 - v.1),
            (cx + u.0 + v.0, cy + u.1 + v.1),
            (cx - u.0 + v.0, cy - u.1 + v.1),
        ]
    }

    /// Corner points truncated toward zero to pixel coordinates.
    pub fn box_points(&self) -> [Point<i32>; 4] {
        self.corners().map(|(x, y)| Point::new(x as i32, y as i32))
    }
}

/// Outcome of measuring one contour
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeAnalysis {
    Measured { centroid: Centroid, angle: f64 },
    /// Zero enclosed area (a point or a line); no centroid exists
    Degenerate,
}

impl ShapeAnalysis {
    /// Collapse to the `(centroid, angle)` pair reported externally.
    ///
    /// Degenerate contours report `(0, 0)` and `0.0`.
    pub fn into_pair(self) -> (Centroid, f64) {
        match self {
            ShapeAnalysis::Measured { centroid, angle } => (centroid, angle),
            ShapeAnalysis::Degenerate => (Centroid::default(), 0.0),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, ShapeAnalysis::Degenerate)
    }
}

/// Exclusive pixel-area range a contour must fall in to count as an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AreaBounds {
    pub min_area: u64,
    pub max_area: u64,
}

impl AreaBounds {
    pub fn new(min_area: u64, max_area: u64) -> Self {
        Self { min_area, max_area }
    }

    /// Strict on both ends: an area equal to a bound is rejected.
    pub fn contains(&self, area: f64) -> bool {
        (self.min_area as f64) < area && area < (self.max_area as f64)
    }
}

/// One located object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub contour: Contour,
    pub area: f64,
    pub centroid: Centroid,
    pub angle: f64,
    pub degenerate: bool,
}
