use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut};
use imageproc::point::Point;

use crate::detection::geometry::min_area_rect;
use crate::error::{DetectError, Result};
use crate::models::{Centroid, Contour};

/// Fonts tried when no label font is given explicitly
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Colors and sizes used when drawing detections
#[derive(Debug, Clone)]
pub struct AnnotationStyle {
    pub box_color: Rgb<u8>,
    pub box_thickness: u32,
    pub centroid_color: Rgb<u8>,
    pub centroid_radius: i32,
    pub text_color: Rgb<u8>,
    pub text_scale: f32,
    /// Offset of the angle label baseline from the centroid
    pub angle_label_offset: (i32, i32),
    /// Offset of the centroid label baseline from the centroid
    pub centroid_label_offset: (i32, i32),
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            box_color: Rgb([0, 255, 0]),
            box_thickness: 2,
            centroid_color: Rgb([255, 0, 0]),
            centroid_radius: 5,
            text_color: Rgb([0, 0, 255]),
            text_scale: 16.0,
            angle_label_offset: (10, 0),
            centroid_label_offset: (10, 20),
        }
    }
}

/// Load a TrueType/OpenType font for the labels
pub fn load_font(path: &Path) -> Result<FontVec> {
    let bytes = std::fs::read(path)
        .map_err(|e| DetectError::invalid_input(path, format!("cannot read font: {e}")))?;
    FontVec::try_from_vec(bytes)
        .map_err(|e| DetectError::invalid_input(path, format!("not a usable font: {e}")))
}

/// First loadable font among the common system locations
pub fn find_system_font() -> Option<(PathBuf, FontVec)> {
    SYSTEM_FONT_CANDIDATES.iter().find_map(|candidate| {
        let path = PathBuf::from(candidate);
        load_font(&path).ok().map(|font| (path, font))
    })
}

pub fn angle_label(angle: f64) -> String {
    format!("Angle: {angle:.1} deg")
}

pub fn centroid_label(centroid: Centroid) -> String {
    format!("Centroid: ({}, {})", centroid.x, centroid.y)
}

/// Draw a closed polygon with lines `thickness` pixels wide
fn draw_thick_polygon_mut(canvas: &mut RgbImage, corners: &[Point<i32>], thickness: u32, color: Rgb<u8>) {
    let thickness = thickness.max(1) as i32;
    for (p1, p2) in corners.iter().zip(corners.iter().cycle().skip(1)) {
        for dy in 0..thickness {
            for dx in 0..thickness {
                draw_line_segment_mut(
                    canvas,
                    ((p1.x + dx) as f32, (p1.y + dy) as f32),
                    ((p2.x + dx) as f32, (p2.y + dy) as f32),
                    color,
                );
            }
        }
    }
}

/// Draw `text` with its baseline starting at `(x, y)`
fn draw_label_mut(canvas: &mut RgbImage, font: &FontVec, style: &AnnotationStyle, x: i32, y: i32, text: &str) {
    let scale = PxScale::from(style.text_scale);
    let ascent = font.as_scaled(scale).ascent();
    let top = y - ascent.round() as i32;
    draw_text_mut(canvas, style.text_color, x, top, scale, font, text);
}

/// Draw each contour's rectangle, centroid and labels onto a copy of `image`.
///
/// `detections[i]` belongs to `contours[i]`; callers must pass sequences of
/// equal length (extra entries on either side are ignored). Without a font
/// the text labels are skipped.
pub fn annotate(
    image: &DynamicImage,
    contours: &[Contour],
    detections: &[(Centroid, f64)],
    font: Option<&FontVec>,
    style: &AnnotationStyle,
) -> RgbImage {
    debug_assert_eq!(contours.len(), detections.len());

    let mut canvas = image.to_rgb8();

    for (contour, &(centroid, angle)) in contours.iter().zip(detections) {
        if let Some(rect) = min_area_rect(&contour.points) {
            draw_thick_polygon_mut(&mut canvas, &rect.box_points(), style.box_thickness, style.box_color);
        }

        draw_filled_circle_mut(&mut canvas, (centroid.x, centroid.y), style.centroid_radius, style.centroid_color);

        if let Some(font) = font {
            let (ax, ay) = style.angle_label_offset;
            draw_label_mut(&mut canvas, font, style, centroid.x + ax, centroid.y + ay, &angle_label(angle));

            let (cx, cy) = style.centroid_label_offset;
            draw_label_mut(&mut canvas, font, style, centroid.x + cx, centroid.y + cy, &centroid_label(centroid));
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_canvas() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, Rgb([128, 128, 128])))
    }

    #[test]
    fn test_labels() {
        assert_eq!(angle_label(0.0), "Angle: 0.0 deg");
        assert_eq!(angle_label(36.8699), "Angle: 36.9 deg");
        assert_eq!(centroid_label(Centroid::new(99, 12)), "Centroid: (99, 12)");
    }

    #[test]
    fn test_no_detections_leaves_copy_untouched() {
        let image = gray_canvas();
        let annotated = annotate(&image, &[], &[], None, &AnnotationStyle::default());
        assert_eq!(annotated, image.to_rgb8());
    }

    #[test]
    fn test_draws_box_and_centroid() {
        let image = gray_canvas();
        let before = image.to_rgb8();
        let contour = Contour::from_coords(&[(20, 20), (60, 20), (60, 50), (20, 50)]);
        let style = AnnotationStyle::default();

        let annotated = annotate(&image, &[contour], &[(Centroid::new(40, 35), 0.0)], None, &style);

        // Input is left alone.
        assert_eq!(image.to_rgb8(), before);

        assert_eq!(*annotated.get_pixel(40, 20), style.box_color);
        assert_eq!(*annotated.get_pixel(41, 21), style.box_color);
        assert_eq!(*annotated.get_pixel(20, 35), style.box_color);
        assert_eq!(*annotated.get_pixel(40, 35), style.centroid_color);
        assert_eq!(*annotated.get_pixel(43, 35), style.centroid_color);
        assert_eq!(*annotated.get_pixel(5, 5), Rgb([128, 128, 128]));
    }

    #[test]
    fn test_labels_need_a_font() {
        let image = gray_canvas();
        let contour = Contour::from_coords(&[(20, 20), (30, 20), (30, 30), (20, 30)]);
        let annotated = annotate(
            &image,
            &[contour],
            &[(Centroid::new(25, 25), 0.0)],
            None,
            &AnnotationStyle::default(),
        );
        // Label area to the right of the centroid stays untouched.
        assert_eq!(*annotated.get_pixel(45, 24), Rgb([128, 128, 128]));
    }

    #[test]
    fn test_missing_font_is_invalid_input() {
        let result = load_font(Path::new("/definitely/not/here.ttf"));
        assert!(matches!(result, Err(DetectError::InvalidInput { .. })));
    }
}
