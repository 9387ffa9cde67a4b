//! Raster canvas primitives: rectangles, cover-fit cropping, clip shapes,
//! and pixel-level blitting.
//!
//! All destination coordinates are floored to integers before drawing so
//! fractional cell boundaries never produce seam artifacts.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};

use bloomlog_garden_model::compose::Color;

/// An integer rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Rect {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    /// Construct from fractional geometry, flooring every component.
    pub fn from_f64(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x: x.floor() as i64,
            y: y.floor() as i64,
            w: w.floor() as i64,
            h: h.floor() as i64,
        }
    }

    pub fn right(&self) -> i64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.w as f64 / 2.0,
            self.y as f64 + self.h as f64 / 2.0,
        )
    }
}

/// A fractional source crop rectangle in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Compute the centered source crop that fills a destination rectangle
/// without distortion or letterboxing.
///
/// If the source is relatively wider than the destination, the full
/// source height is kept and the width is cropped to `sh * target_ratio`;
/// otherwise the full width is kept and the height is cropped to
/// `sw / target_ratio`. The crop is centered along the cropped axis.
pub fn cover_crop(dst_w: f64, dst_h: f64, src_w: f64, src_h: f64) -> CropRect {
    let target_ratio = dst_w / dst_h;
    let source_ratio = src_w / src_h;

    if source_ratio > target_ratio {
        let crop_w = src_h * target_ratio;
        CropRect {
            x: (src_w - crop_w) / 2.0,
            y: 0.0,
            w: crop_w,
            h: src_h,
        }
    } else {
        let crop_h = src_w / target_ratio;
        CropRect {
            x: 0.0,
            y: (src_h - crop_h) / 2.0,
            w: src_w,
            h: crop_h,
        }
    }
}

/// A clipping region tested per destination pixel (at pixel centers).
#[derive(Debug, Clone, PartialEq)]
pub enum ClipShape {
    /// No clipping beyond the destination rectangle.
    Full,

    /// Inscribed circle.
    Circle { cx: f64, cy: f64, r: f64 },

    /// Flat-top hexagon with circumradius `r`.
    Hexagon { cx: f64, cy: f64, r: f64 },

    /// Arbitrary closed polygon, even-odd rule.
    Polygon(Vec<(f64, f64)>),
}

impl ClipShape {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            ClipShape::Full => true,
            ClipShape::Circle { cx, cy, r } => {
                let dx = x - cx;
                let dy = y - cy;
                dx * dx + dy * dy <= r * r
            }
            ClipShape::Hexagon { cx, cy, r } => {
                // Flat-top hexagon: half-width r, half-height sqrt(3)/2 * r.
                let sqrt3 = 3f64.sqrt();
                let dx = (x - cx).abs();
                let dy = (y - cy).abs();
                dy <= sqrt3 / 2.0 * r && sqrt3 * dx + dy <= sqrt3 * r
            }
            ClipShape::Polygon(points) => point_in_polygon(x, y, points),
        }
    }
}

/// Even-odd ray cast.
fn point_in_polygon(x: f64, y: f64, points: &[(f64, f64)]) -> bool {
    let mut inside = false;
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Closed heart outline centered at `(cx, cy)` spanning roughly `size`
/// pixels, sampled from the classic parametric heart curve.
pub fn heart_polygon(cx: f64, cy: f64, size: f64, samples: usize) -> Vec<(f64, f64)> {
    let scale = size / 34.0;
    (0..samples)
        .map(|i| {
            let t = i as f64 / samples as f64 * std::f64::consts::TAU;
            let hx = 16.0 * t.sin().powi(3);
            let hy = 13.0 * t.cos()
                - 5.0 * (2.0 * t).cos()
                - 2.0 * (3.0 * t).cos()
                - (4.0 * t).cos();
            (cx + hx * scale, cy - hy * scale)
        })
        .collect()
}

/// A square raster canvas over an RGBA buffer.
pub struct Canvas {
    img: RgbaImage,
}

pub fn rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

impl Canvas {
    /// Create a canvas flood-filled with the background color.
    pub fn new(side: u32, background: Color) -> Self {
        Self {
            img: RgbaImage::from_pixel(side, side, rgba(background)),
        }
    }

    pub fn side(&self) -> u32 {
        self.img.width()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        let side = self.img.width() as i64;
        for y in rect.y.max(0)..rect.bottom().min(side) {
            for x in rect.x.max(0)..rect.right().min(side) {
                self.img.put_pixel(x as u32, y as u32, color);
            }
        }
    }

    /// Alpha-blend a translucent rectangle over the canvas.
    pub fn blend_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        let side = self.img.width() as i64;
        let alpha = color.0[3] as u32;
        for y in rect.y.max(0)..rect.bottom().min(side) {
            for x in rect.x.max(0)..rect.right().min(side) {
                let dst = self.img.get_pixel_mut(x as u32, y as u32);
                for c in 0..3 {
                    let blended =
                        (color.0[c] as u32 * alpha + dst.0[c] as u32 * (255 - alpha)) / 255;
                    dst.0[c] = blended as u8;
                }
            }
        }
    }

    /// Cover-fit blit: fill `dst` with `src`, cropping the source to match
    /// the destination aspect. Drawing is clipped strictly to `dst` (and
    /// to `clip`), so rounding never bleeds into neighboring cells.
    pub fn blit_cover(&mut self, dst: Rect, src: &RgbaImage, clip: &ClipShape) {
        if dst.w <= 0 || dst.h <= 0 || src.width() == 0 || src.height() == 0 {
            return;
        }
        let crop = cover_crop(
            dst.w as f64,
            dst.h as f64,
            src.width() as f64,
            src.height() as f64,
        );

        let side = self.img.width() as i64;
        let max_sx = src.width() as i64 - 1;
        let max_sy = src.height() as i64 - 1;

        for y in dst.y.max(0)..dst.bottom().min(side) {
            for x in dst.x.max(0)..dst.right().min(side) {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;
                if !clip.contains(px, py) {
                    continue;
                }
                let u = (px - dst.x as f64) / dst.w as f64;
                let v = (py - dst.y as f64) / dst.h as f64;
                let sx = ((crop.x + u * crop.w).floor() as i64).clamp(0, max_sx);
                let sy = ((crop.y + v * crop.h).floor() as i64).clamp(0, max_sy);
                let pixel = *src.get_pixel(sx as u32, sy as u32);
                self.img.put_pixel(x as u32, y as u32, pixel);
            }
        }
    }

    /// Blit a same-sized buffer onto the canvas through a clip shape.
    /// Used for layouts that compose to an offscreen buffer first.
    pub fn blit_through(&mut self, src: &RgbaImage, clip: &ClipShape) {
        let side = self.img.width().min(src.width());
        for y in 0..side {
            for x in 0..side {
                if clip.contains(x as f64 + 0.5, y as f64 + 0.5) {
                    self.img.put_pixel(x, y, *src.get_pixel(x, y));
                }
            }
        }
    }

    /// Draw a rotated white card with a cover-fit photo inside it, plus a
    /// simple offset drop shadow. `angle_deg` rotates both rects around
    /// the card center.
    pub fn draw_polaroid(&mut self, card: Rect, photo: Rect, src: &RgbaImage, angle_deg: f64) {
        let (pivot_x, pivot_y) = card.center();
        let angle = angle_deg.to_radians();
        let (sin, cos) = angle.sin_cos();

        // Axis-aligned bounds of the rotated card, padded for the shadow.
        let half_diag = (card.w as f64).hypot(card.h as f64) / 2.0;
        let x0 = (pivot_x - half_diag - 8.0).floor() as i64;
        let y0 = (pivot_y - half_diag - 8.0).floor() as i64;
        let x1 = (pivot_x + half_diag + 8.0).ceil() as i64;
        let y1 = (pivot_y + half_diag + 8.0).ceil() as i64;

        let crop = cover_crop(
            photo.w as f64,
            photo.h as f64,
            src.width() as f64,
            src.height() as f64,
        );
        let max_sx = src.width() as i64 - 1;
        let max_sy = src.height() as i64 - 1;

        let in_rect = |r: Rect, x: f64, y: f64| {
            x >= r.x as f64 && x < r.right() as f64 && y >= r.y as f64 && y < r.bottom() as f64
        };

        let side = self.img.width() as i64;
        for y in y0.max(0)..y1.min(side) {
            for x in x0.max(0)..x1.min(side) {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;

                // Inverse-rotate into card-local (unrotated) space.
                let dx = px - pivot_x;
                let dy = py - pivot_y;
                let lx = pivot_x + dx * cos + dy * sin;
                let ly = pivot_y - dx * sin + dy * cos;

                if in_rect(photo, lx, ly) {
                    let u = (lx - photo.x as f64) / photo.w as f64;
                    let v = (ly - photo.y as f64) / photo.h as f64;
                    let sx = ((crop.x + u * crop.w).floor() as i64).clamp(0, max_sx);
                    let sy = ((crop.y + v * crop.h).floor() as i64).clamp(0, max_sy);
                    self.img
                        .put_pixel(x as u32, y as u32, *src.get_pixel(sx as u32, sy as u32));
                } else if in_rect(card, lx, ly) {
                    self.img.put_pixel(x as u32, y as u32, Rgba([255, 255, 255, 255]));
                } else if in_rect(card, lx - 6.0, ly - 6.0) {
                    // Shadow: card silhouette offset down-right.
                    let dst = self.img.get_pixel_mut(x as u32, y as u32);
                    for c in 0..3 {
                        dst.0[c] = (dst.0[c] as u32 * 160 / 255) as u8;
                    }
                }
            }
        }
    }

    /// Stroke a rectangle outline with the given width, drawn inward.
    pub fn stroke_rect(&mut self, rect: Rect, color: Rgba<u8>, width: u32) {
        for i in 0..width as i64 {
            let w = rect.w - 2 * i;
            let h = rect.h - 2 * i;
            if w <= 0 || h <= 0 {
                break;
            }
            draw_hollow_rect_mut(
                &mut self.img,
                imageproc::rect::Rect::at((rect.x + i) as i32, (rect.y + i) as i32)
                    .of_size(w as u32, h as u32),
                color,
            );
        }
    }

    /// Stroke a circle ring of the given width.
    pub fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgba<u8>, width: u32) {
        for i in 0..width as i64 {
            let radius = r as i64 - i;
            if radius <= 0 {
                break;
            }
            draw_hollow_circle_mut(
                &mut self.img,
                (cx as i32, cy as i32),
                radius as i32,
                color,
            );
        }
    }

    /// Stroke a closed polygon outline.
    pub fn stroke_polygon(&mut self, points: &[(f64, f64)], color: Rgba<u8>, width: u32) {
        if points.len() < 2 {
            return;
        }
        // Width is approximated by redrawing segments with small offsets.
        let offsets: Vec<(f32, f32)> = (0..width)
            .map(|i| {
                let o = i as f32 - (width as f32 - 1.0) / 2.0;
                (o, o)
            })
            .collect();
        for (ox, oy) in offsets {
            for i in 0..points.len() {
                let (x0, y0) = points[i];
                let (x1, y1) = points[(i + 1) % points.len()];
                draw_line_segment_mut(
                    &mut self.img,
                    (x0 as f32 + ox, y0 as f32 + oy),
                    (x1 as f32 + ox, y1 as f32 + oy),
                    color,
                );
            }
        }
    }

    /// Stroke a flat-top hexagon outline.
    pub fn stroke_hexagon(&mut self, cx: f64, cy: f64, r: f64, color: Rgba<u8>, width: u32) {
        let sqrt3 = 3f64.sqrt();
        let points = vec![
            (cx + r, cy),
            (cx + r / 2.0, cy + sqrt3 / 2.0 * r),
            (cx - r / 2.0, cy + sqrt3 / 2.0 * r),
            (cx - r, cy),
            (cx - r / 2.0, cy - sqrt3 / 2.0 * r),
            (cx + r / 2.0, cy - sqrt3 / 2.0 * r),
        ];
        self.stroke_polygon(&points, color, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cover_crop_wider_source() {
        // 200x100 source into a 100x100 cell: crop width to 100, centered.
        let crop = cover_crop(100.0, 100.0, 200.0, 100.0);
        assert!((crop.x - 50.0).abs() < 1e-9);
        assert!((crop.y - 0.0).abs() < 1e-9);
        assert!((crop.w - 100.0).abs() < 1e-9);
        assert!((crop.h - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_cover_crop_taller_source() {
        let crop = cover_crop(100.0, 50.0, 100.0, 200.0);
        assert!((crop.x - 0.0).abs() < 1e-9);
        assert!((crop.w - 100.0).abs() < 1e-9);
        assert!((crop.h - 50.0).abs() < 1e-9);
        assert!((crop.y - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_rect_from_f64_floors() {
        let rect = Rect::from_f64(10.9, 20.1, 99.99, 50.5);
        assert_eq!(rect, Rect::new(10, 20, 99, 50));
    }

    #[test]
    fn test_blit_cover_stays_inside_dst() {
        let mut canvas = Canvas::new(100, Color::BLACK);
        let src = RgbaImage::from_pixel(40, 40, Rgba([255, 0, 0, 255]));
        canvas.blit_cover(Rect::new(10, 10, 30, 30), &src, &ClipShape::Full);

        let img = canvas.image();
        assert_eq!(img.get_pixel(15, 15).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(5, 5).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(45, 15).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_circle_clip_excludes_corners() {
        let clip = ClipShape::Circle {
            cx: 50.0,
            cy: 50.0,
            r: 20.0,
        };
        assert!(clip.contains(50.0, 50.0));
        assert!(!clip.contains(31.0, 31.0)); // corner of the bounding box
        assert!(clip.contains(50.0, 69.0));
    }

    #[test]
    fn test_hexagon_clip_bounds() {
        let clip = ClipShape::Hexagon {
            cx: 0.0,
            cy: 0.0,
            r: 10.0,
        };
        assert!(clip.contains(0.0, 0.0));
        assert!(clip.contains(9.9, 0.0));
        assert!(!clip.contains(9.9, 5.0)); // outside the slanted edge
        assert!(!clip.contains(0.0, 9.0)); // above the flat top
    }

    #[test]
    fn test_heart_polygon_contains_center() {
        let points = heart_polygon(100.0, 100.0, 150.0, 200);
        let clip = ClipShape::Polygon(points);
        assert!(clip.contains(100.0, 100.0));
        assert!(!clip.contains(5.0, 5.0));
    }

    proptest! {
        #[test]
        fn cover_crop_is_within_source_and_aspect_matches(
            dst_w in 1.0f64..2000.0,
            dst_h in 1.0f64..2000.0,
            src_w in 1.0f64..4000.0,
            src_h in 1.0f64..4000.0,
        ) {
            let crop = cover_crop(dst_w, dst_h, src_w, src_h);
            prop_assert!(crop.x >= -1e-9);
            prop_assert!(crop.y >= -1e-9);
            prop_assert!(crop.x + crop.w <= src_w + 1e-6);
            prop_assert!(crop.y + crop.h <= src_h + 1e-6);
            let crop_ratio = crop.w / crop.h;
            let dst_ratio = dst_w / dst_h;
            prop_assert!((crop_ratio - dst_ratio).abs() / dst_ratio < 1e-6);
        }
    }
}
