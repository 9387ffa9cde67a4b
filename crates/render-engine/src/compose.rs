//! Collage composition: executes a layout plan against decoded photos
//! and encodes the result.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use rand::Rng;

use bloomlog_common::{BloomlogError, BloomlogResult};
use bloomlog_garden_model::compose::{LayoutConfig, LayoutKind};
use bloomlog_garden_model::photo::{MAX_SELECTED, MIN_COMPOSE};

use crate::canvas::{heart_polygon, rgba, Canvas, ClipShape};
use crate::layout::{plan, Decor, LayoutPlan, Placement};

/// Heart mask size relative to the canvas side.
const HEART_SCALE: f64 = 0.95;
const HEART_SAMPLES: usize = 256;

/// Compose `images` into a single square collage.
///
/// Accepts between 2 and 10 photos. The photos are placed in order; the
/// random source only matters for the polaroid layout.
pub fn compose<R: Rng>(
    images: &[RgbaImage],
    config: &LayoutConfig,
    side: u32,
    rng: &mut R,
) -> BloomlogResult<RgbaImage> {
    if images.len() < MIN_COMPOSE {
        return Err(BloomlogError::compose(format!(
            "Need at least {MIN_COMPOSE} photos, got {}",
            images.len()
        )));
    }
    if images.len() > MAX_SELECTED {
        return Err(BloomlogError::compose(format!(
            "At most {MAX_SELECTED} photos can be merged, got {}",
            images.len()
        )));
    }

    tracing::debug!(
        layout = %config.layout,
        photos = images.len(),
        side,
        "Composing collage"
    );

    let arrangement = plan(
        config.layout,
        images.len(),
        side,
        config.spacing,
        config.background,
        rng,
    );

    if config.layout == LayoutKind::Heart {
        return Ok(compose_heart(images, config, side, &arrangement));
    }

    let mut canvas = Canvas::new(side, config.background);
    render_plan(&mut canvas, images, &arrangement);
    Ok(canvas.into_image())
}

/// Heart renders the grid arrangement offscreen, then punches it
/// through a heart-shaped mask onto a fresh background.
fn compose_heart(
    images: &[RgbaImage],
    config: &LayoutConfig,
    side: u32,
    arrangement: &LayoutPlan,
) -> RgbaImage {
    let mut offscreen = Canvas::new(side, config.background);
    render_plan(&mut offscreen, images, arrangement);
    let grid = offscreen.into_image();

    let center = side as f64 / 2.0;
    let outline = heart_polygon(center, center, side as f64 * HEART_SCALE, HEART_SAMPLES);
    let mask = ClipShape::Polygon(outline.clone());

    let mut canvas = Canvas::new(side, config.background);
    canvas.blit_through(&grid, &mask);
    canvas.stroke_polygon(&outline, rgba(bloomlog_garden_model::compose::Color::WHITE), 8);
    canvas.into_image()
}

fn render_plan(canvas: &mut Canvas, images: &[RgbaImage], arrangement: &LayoutPlan) {
    for decor in &arrangement.decor {
        let Decor::Fill { rect, color } = decor;
        canvas.fill_rect(*rect, rgba(*color));
    }

    for (img, placement) in images.iter().zip(&arrangement.placements) {
        render_placement(canvas, img, placement);
    }
}

fn render_placement(canvas: &mut Canvas, img: &RgbaImage, placement: &Placement) {
    if let Some(card) = placement.card {
        canvas.draw_polaroid(card, placement.rect, img, placement.rotation_deg);
        return;
    }

    canvas.blit_cover(placement.rect, img, &placement.clip);

    if let Some(stroke) = placement.stroke {
        let color = rgba(stroke.color);
        match &placement.clip {
            ClipShape::Circle { cx, cy, r } => {
                canvas.stroke_circle(*cx, *cy, *r, color, stroke.width)
            }
            ClipShape::Hexagon { cx, cy, r } => {
                canvas.stroke_hexagon(*cx, *cy, *r, color, stroke.width)
            }
            ClipShape::Polygon(points) => canvas.stroke_polygon(points, color, stroke.width),
            ClipShape::Full => canvas.stroke_rect(placement.rect, color, stroke.width),
        }
    }
}

/// Encode a collage as JPEG at the given quality.
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> BloomlogResult<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| BloomlogError::compose(format!("JPEG encoding failed: {e}")))?;
    Ok(out)
}

/// Timestamped file name for an exported collage.
pub fn collage_filename(now: chrono::DateTime<chrono::Local>) -> String {
    now.format("merged-garden-%Y%m%d-%H%M%S.jpg").to_string()
}
