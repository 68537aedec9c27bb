use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;

use crate::models::{AreaBounds, Contour};

/// Copy of `mask` inside a one-pixel zero frame.
///
/// `find_contours` only recognises an outer border when the pixel left of it
/// is zero, so a blob starting in column 0 would otherwise be traced as a hole.
fn pad_with_zero_frame(mask: &GrayImage) -> GrayImage {
    let (width, height) = mask.dimensions();
    let mut padded = GrayImage::new(width + 2, height + 2);
    for (x, y, p) in mask.enumerate_pixels() {
        padded.put_pixel(x + 1, y + 1, *p);
    }
    padded
}

/// Outermost boundaries of the non-zero regions in `mask`, in tracing order.
///
/// Pixels outside the image count as zero. Holes and anything nested inside
/// another blob are dropped. Straight runs are compressed to their end points.
pub fn find_external_contours(mask: &GrayImage) -> Vec<Contour> {
    find_contours::<i32>(&pad_with_zero_frame(mask))
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| {
            let points: Vec<Point<i32>> = c.points.iter().map(|p| Point::new(p.x - 1, p.y - 1)).collect();
            Contour::new(compress_chain(&points))
        })
        .collect()
}

/// Drop vertices that sit in the middle of a straight run.
///
/// A vertex is kept only when the step arriving at it and the step leaving it
/// (cyclically) point in different directions.
pub fn compress_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |from: Point<i32>, to: Point<i32>| ((to.x - from.x).signum(), (to.y - from.y).signum());

    let kept: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let curr = points[i];
            let next = points[(i + 1) % n];
            step(prev, curr) != step(curr, next)
        })
        .map(|i| points[i])
        .collect();

    // Only a chain of one repeated point has no corner.
    if kept.is_empty() {
        return vec![points[0]];
    }
    kept
}

/// Keep contours whose enclosed area lies strictly between the bounds
pub fn filter_by_area(contours: Vec<Contour>, bounds: AreaBounds) -> Vec<Contour> {
    contours
        .into_iter()
        .filter(|c| bounds.contains(c.area()))
        .collect()
}

/// External contours of `mask` with `min_area < area < max_area`
pub fn find_valid_contours(mask: &GrayImage, min_area: u64, max_area: u64) -> Vec<Contour> {
    filter_by_area(find_external_contours(mask), AreaBounds::new(min_area, max_area))
}
