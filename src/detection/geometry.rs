//! Polygon measurements on contour points.
//!
//! Contours are treated as closed polygons through their vertices, so a
//! contour traced along pixel centers of an `n x n` block encloses
//! `(n - 1)^2` square pixels.

use imageproc::geometry::convex_hull;
use imageproc::point::Point;

use crate::models::RotatedRect;

/// Low-order spatial moments of a closed polygon
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    /// Area-weighted center, or `None` when the polygon encloses no area.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.m00 == 0.0 {
            return None;
        }
        Some((self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// Spatial moments of the polygon through `points` (Green's theorem).
///
/// Orientation does not matter: a clockwise traversal is flipped so that
/// `m00` is never negative.
pub fn polygon_moments(points: &[Point<i32>]) -> Moments {
    if points.len() < 3 {
        return Moments::default();
    }

    let mut a00 = 0.0;
    let mut a10 = 0.0;
    let mut a01 = 0.0;

    for (p, q) in points.iter().zip(points.iter().cycle().skip(1)) {
        let (xi, yi) = (p.x as f64, p.y as f64);
        let (xj, yj) = (q.x as f64, q.y as f64);
        let cross = xi * yj - xj * yi;
        a00 += cross;
        a10 += cross * (xi + xj);
        a01 += cross * (yi + yj);
    }

    let sign = if a00 < 0.0 { -1.0 } else { 1.0 };

    Moments {
        m00: sign * a00 / 2.0,
        m10: sign * a10 / 6.0,
        m01: sign * a01 / 6.0,
    }
}

/// Unsigned shoelace area of the polygon through `points`.
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    polygon_moments(points).m00
}

/// Minimum-area rectangle enclosing `points`, at any rotation.
///
/// The optimal rectangle has a side collinear with a convex hull edge, so each
/// hull edge direction is tried in turn. Returns `None` for an empty slice.
pub fn min_area_rect(points: &[Point<i32>]) -> Option<RotatedRect> {
    if points.is_empty() {
        return None;
    }

    let hull = convex_hull(points);
    if hull.len() < 2 {
        let p = hull.first().copied().unwrap_or(points[0]);
        return Some(RotatedRect {
            center: (p.x as f64, p.y as f64),
            width: 0.0,
            height: 0.0,
            angle: 0.0,
        });
    }

    let mut best: Option<RotatedRect> = None;
    for (p, q) in hull.iter().zip(hull.iter().cycle().skip(1)) {
        let Some(angle) = edge_angle(q.x - p.x, q.y - p.y) else {
            continue;
        };
        let rect = rect_along(&hull, angle);
        if best.is_none_or(|current| rect.area() < current.area()) {
            best = Some(rect);
        }
    }

    best
}

/// Direction of an edge vector in degrees, reduced into `[0, 90)`.
///
/// Quarter turns are applied on the integer vector so that axis-aligned edges
/// land on exactly `0.0`.
fn edge_angle(dx: i32, dy: i32) -> Option<f64> {
    if dx == 0 && dy == 0 {
        return None;
    }
    let (mut dx, mut dy) = (dx as i64, dy as i64);
    while !(dx > 0 && dy >= 0) {
        (dx, dy) = (dy, -dx);
    }
    Some((dy as f64).atan2(dx as f64).to_degrees())
}

/// Tightest rectangle around `hull` whose width runs along `angle`.
fn rect_along(hull: &[Point<i32>], angle: f64) -> RotatedRect {
    let (sin, cos) = angle.to_radians().sin_cos();

    let mut s_min = f64::INFINITY;
    let mut s_max = f64::NEG_INFINITY;
    let mut t_min = f64::INFINITY;
    let mut t_max = f64::NEG_INFINITY;

    for p in hull {
        let (x, y) = (p.x as f64, p.y as f64);
        let s = x * cos + y * sin;
        let t = -x * sin + y * cos;
        s_min = s_min.min(s);
        s_max = s_max.max(s);
        t_min = t_min.min(t);
        t_max = t_max.max(t);
    }

    let s_mid = (s_min + s_max) / 2.0;
    let t_mid = (t_min + t_max) / 2.0;

    RotatedRect {
        center: (s_mid * cos - t_mid * sin, s_mid * sin + t_mid * cos),
        width: s_max - s_min,
        height: t_max - t_min,
        angle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(i32, i32)]) -> Vec<Point<i32>> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() <= tol, "expected {b}, got {a}");
    }

    #[test]
    fn test_square_moments() {
        let square = pts(&[(10, 10), (20, 10), (20, 20), (10, 20)]);
        let m = polygon_moments(&square);
        assert_close(m.m00, 100.0, 1e-9);
        let (cx, cy) = m.centroid().unwrap();
        assert_close(cx, 15.0, 1e-9);
        assert_close(cy, 15.0, 1e-9);
    }

    #[test]
    fn test_orientation_does_not_change_moments() {
        let ccw = pts(&[(0, 0), (0, 6), (4, 6), (4, 0)]);
        let cw = pts(&[(0, 0), (4, 0), (4, 6), (0, 6)]);
        assert_eq!(polygon_moments(&ccw), polygon_moments(&cw));
        assert_close(contour_area(&cw), 24.0, 1e-9);
    }

    #[test]
    fn test_triangle_centroid_is_not_vertex_mean() {
        // Extra collinear vertices along the base pull the vertex mean but not
        // the area centroid.
        let triangle = pts(&[(0, 0), (3, 0), (6, 0), (9, 0), (12, 0), (0, 12)]);
        let (cx, cy) = polygon_moments(&triangle).centroid().unwrap();
        assert_close(cx, 4.0, 1e-9);
        assert_close(cy, 4.0, 1e-9);
    }

    #[test]
    fn test_degenerate_polygons_have_no_centroid() {
        assert_eq!(polygon_moments(&pts(&[(5, 5)])).centroid(), None);
        assert_eq!(polygon_moments(&pts(&[(0, 0), (10, 0)])).centroid(), None);
        let line = pts(&[(0, 0), (5, 5), (10, 10), (5, 5)]);
        assert_eq!(contour_area(&line), 0.0);
        assert_eq!(polygon_moments(&line).centroid(), None);
    }

    #[test]
    fn test_edge_angle_reduction() {
        assert_eq!(edge_angle(5, 0), Some(0.0));
        assert_eq!(edge_angle(0, 5), Some(0.0));
        assert_eq!(edge_angle(-5, 0), Some(0.0));
        assert_eq!(edge_angle(0, -5), Some(0.0));
        assert_close(edge_angle(3, 3).unwrap(), 45.0, 1e-9);
        assert_close(edge_angle(-3, 3).unwrap(), 45.0, 1e-9);
        assert_close(edge_angle(1, -2).unwrap(), (0.5f64).atan().to_degrees(), 1e-9);
        assert_eq!(edge_angle(0, 0), None);
    }

    #[test]
    fn test_axis_aligned_min_area_rect() {
        let rect = min_area_rect(&pts(&[(10, 20), (40, 20), (40, 30), (10, 30)])).unwrap();
        assert_eq!(rect.angle, 0.0);
        assert_close(rect.width * rect.height, 300.0, 1e-9);
        assert_close(rect.center.0, 25.0, 1e-9);
        assert_close(rect.center.1, 25.0, 1e-9);
    }

    #[test]
    fn test_diamond_min_area_rect() {
        let diamond = pts(&[(50, 10), (90, 50), (50, 90), (10, 50)]);
        let rect = min_area_rect(&diamond).unwrap();
        assert_close(rect.angle, 45.0, 1e-9);
        assert_close(rect.area(), 3200.0, 1e-6);
        assert_close(rect.center.0, 50.0, 1e-9);
        assert_close(rect.center.1, 50.0, 1e-9);

        // Truncation may pull a corner one pixel toward zero.
        let corners = rect.box_points();
        for e in &diamond {
            assert!(
                corners
                    .iter()
                    .any(|c| (c.x - e.x).abs() <= 1 && (c.y - e.y).abs() <= 1),
                "no corner near {:?} in {:?}",
                e,
                corners
            );
        }
    }

    #[test]
    fn test_min_area_rect_degenerate_inputs() {
        assert!(min_area_rect(&[]).is_none());

        let single = min_area_rect(&pts(&[(7, 9)])).unwrap();
        assert_eq!(single.center, (7.0, 9.0));
        assert_eq!(single.area(), 0.0);
        assert_eq!(single.angle, 0.0);

        let segment = min_area_rect(&pts(&[(0, 0), (10, 0)])).unwrap();
        assert_eq!(segment.angle, 0.0);
        assert_eq!(segment.area(), 0.0);
    }
}
