//! Timelapse frame sequencing.
//!
//! Turns a plant's dated photo timeline into a fixed-rate video: each
//! photo is held for a configurable number of frames on a square black
//! canvas with a translucent date footer.

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use bloomlog_common::{BloomlogError, BloomlogResult};
use bloomlog_garden_model::compose::{Color, TimelapseConfig};
use bloomlog_garden_model::photo::PhotoRef;

use crate::canvas::{Canvas, ClipShape, Rect};
use crate::encoder::VideoEncoder;
use crate::loader::ImageLoader;

pub const FPS: u32 = 30;
pub const CANVAS_SIDE: u32 = 1080;
pub const FOOTER_HEIGHT: u32 = 150;

/// Footer band opacity (out of 255).
const FOOTER_ALPHA: u8 = 140;
const DATE_SCALE: f32 = 52.0;

/// Common distro locations for a usable sans-serif face. The date text
/// is skipped when none of them exists.
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
];

/// Outcome of a timelapse render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelapseReport {
    pub output: PathBuf,
    pub frames_written: usize,
    pub photos_skipped: usize,
}

/// How many frames each photo is held for.
pub fn frames_per_photo(seconds_per_photo: f64) -> u32 {
    ((seconds_per_photo * FPS as f64).round() as u32).max(1)
}

/// Photos play in date order regardless of insertion order. Ties keep
/// their relative order.
pub fn order_photos(photos: &[PhotoRef]) -> Vec<PhotoRef> {
    let mut sorted = photos.to_vec();
    sorted.sort_by_key(|p| p.date);
    sorted
}

/// Render `photos` into a video through the given encoder.
///
/// Photos that fail to load are skipped with a warning; the render only
/// fails when no photo can be loaded at all, or when the encoder is
/// missing from the system.
pub async fn render_timelapse(
    photos: &[PhotoRef],
    config: &TimelapseConfig,
    loader: &dyn ImageLoader,
    encoder: &mut dyn VideoEncoder,
) -> BloomlogResult<TimelapseReport> {
    if !encoder.is_available() {
        return Err(BloomlogError::unsupported(format!(
            "Video encoder '{}' is not available on this system",
            encoder.name()
        )));
    }

    let ordered = order_photos(photos);
    let mut loaded = Vec::with_capacity(ordered.len());
    let mut photos_skipped = 0usize;
    for photo in &ordered {
        match loader.load(Path::new(&photo.path)) {
            Ok(img) => loaded.push((photo.date, img)),
            Err(err) => {
                tracing::warn!(path = %photo.path, error = %err, "Skipping unreadable photo");
                photos_skipped += 1;
            }
        }
    }

    if loaded.is_empty() {
        return Err(BloomlogError::timelapse(format!(
            "No readable photos for plant {}",
            config.plant_id
        )));
    }

    let hold = frames_per_photo(config.seconds_per_photo);
    let font = load_footer_font();
    if font.is_none() {
        tracing::warn!("No system font found, date captions will be omitted");
    }

    tracing::info!(
        plant = %config.plant_id,
        photos = loaded.len(),
        skipped = photos_skipped,
        frames_per_photo = hold,
        "Starting timelapse render"
    );

    encoder.start(CANVAS_SIDE, CANVAS_SIDE, FPS)?;
    let pacing = encoder.pacing();

    let mut frames_written = 0usize;
    for (date, img) in &loaded {
        let frame = compose_frame(img, *date, font.as_ref());
        for _ in 0..hold {
            encoder.write_frame(&frame)?;
            frames_written += 1;
            if let Some(delay) = pacing {
                tokio::time::sleep(delay).await;
            }
        }
    }

    let output = encoder.finish()?;
    tracing::info!(output = %output.display(), frames_written, "Timelapse render finished");

    Ok(TimelapseReport {
        output,
        frames_written,
        photos_skipped,
    })
}

fn compose_frame(img: &RgbaImage, date: chrono::NaiveDate, font: Option<&FontVec>) -> RgbaImage {
    let mut canvas = Canvas::new(CANVAS_SIDE, Color::BLACK);
    let full = Rect::new(0, 0, CANVAS_SIDE as i64, CANVAS_SIDE as i64);
    canvas.blit_cover(full, img, &ClipShape::Full);

    let footer = Rect::new(
        0,
        (CANVAS_SIDE - FOOTER_HEIGHT) as i64,
        CANVAS_SIDE as i64,
        FOOTER_HEIGHT as i64,
    );
    canvas.blend_rect(footer, Rgba([0, 0, 0, FOOTER_ALPHA]));

    let mut frame = canvas.into_image();
    if let Some(font) = font {
        let text = date.format("%d %b %Y").to_string();
        let y = (CANVAS_SIDE - FOOTER_HEIGHT) as i32 + ((FOOTER_HEIGHT as f32 - DATE_SCALE) / 2.0) as i32;
        draw_text_mut(
            &mut frame,
            Rgba([255, 255, 255, 255]),
            40,
            y,
            PxScale::from(DATE_SCALE),
            font,
            &text,
        );
    }
    frame
}

fn load_footer_font() -> Option<FontVec> {
    for path in FONT_PATHS {
        if let Ok(bytes) = std::fs::read(path) {
            match FontVec::try_from_vec(bytes) {
                Ok(font) => return Some(font),
                Err(err) => tracing::warn!(path = %path, error = %err, "Failed to parse font"),
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::FrameSink;
    use crate::loader::MemoryLoader;
    use chrono::NaiveDate;

    fn photo(id: &str, path: &str, date: (i32, u32, u32)) -> PhotoRef {
        PhotoRef {
            id: id.to_string(),
            path: path.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        }
    }

    fn loader_with(paths: &[&str]) -> MemoryLoader {
        let mut loader = MemoryLoader::new();
        for p in paths {
            loader.insert(*p, RgbaImage::new(8, 8));
        }
        loader
    }

    struct MissingEncoder;

    impl VideoEncoder for MissingEncoder {
        fn name(&self) -> &str {
            "missing"
        }
        fn is_available(&self) -> bool {
            false
        }
        fn start(&mut self, _: u32, _: u32, _: u32) -> BloomlogResult<()> {
            unreachable!()
        }
        fn write_frame(&mut self, _: &RgbaImage) -> BloomlogResult<()> {
            unreachable!()
        }
        fn finish(&mut self) -> BloomlogResult<PathBuf> {
            unreachable!()
        }
    }

    #[test]
    fn test_frames_per_photo_rounds_and_floors_at_one() {
        assert_eq!(frames_per_photo(0.5), 15);
        assert_eq!(frames_per_photo(1.0), 30);
        assert_eq!(frames_per_photo(0.01), 1);
        assert_eq!(frames_per_photo(3.0), 90);
    }

    #[test]
    fn test_order_photos_sorts_by_date() {
        let photos = vec![
            photo("c", "c.jpg", (2026, 3, 1)),
            photo("a", "a.jpg", (2026, 1, 1)),
            photo("b", "b.jpg", (2026, 2, 1)),
        ];
        let sorted = order_photos(&photos);
        let ids: Vec<&str> = sorted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_render_writes_hold_frames_per_photo() {
        let photos = vec![
            photo("a", "a.jpg", (2026, 1, 1)),
            photo("b", "b.jpg", (2026, 1, 8)),
            photo("c", "c.jpg", (2026, 1, 15)),
        ];
        let loader = loader_with(&["a.jpg", "b.jpg", "c.jpg"]);
        let mut sink = FrameSink::new();
        let config = TimelapseConfig::new("plant-1", 0.5);

        let report = render_timelapse(&photos, &config, &loader, &mut sink)
            .await
            .unwrap();
        assert_eq!(report.frames_written, 45);
        assert_eq!(report.photos_skipped, 0);
        assert_eq!(sink.frames, 45);
        assert_eq!((sink.width, sink.height, sink.fps), (CANVAS_SIDE, CANVAS_SIDE, FPS));
    }

    #[tokio::test]
    async fn test_render_skips_unreadable_photos() {
        let photos = vec![
            photo("a", "a.jpg", (2026, 1, 1)),
            photo("gone", "gone.jpg", (2026, 1, 8)),
        ];
        let loader = loader_with(&["a.jpg"]);
        let mut sink = FrameSink::new();
        let config = TimelapseConfig::new("plant-1", 1.0);

        let report = render_timelapse(&photos, &config, &loader, &mut sink)
            .await
            .unwrap();
        assert_eq!(report.photos_skipped, 1);
        assert_eq!(report.frames_written, 30);
    }

    #[tokio::test]
    async fn test_render_fails_when_nothing_loads() {
        let photos = vec![photo("gone", "gone.jpg", (2026, 1, 1))];
        let loader = MemoryLoader::new();
        let mut sink = FrameSink::new();
        let config = TimelapseConfig::new("plant-1", 1.0);

        let err = render_timelapse(&photos, &config, &loader, &mut sink)
            .await
            .unwrap_err();
        assert!(matches!(err, BloomlogError::Timelapse { .. }));
    }

    #[tokio::test]
    async fn test_render_fails_without_encoder() {
        let photos = vec![photo("a", "a.jpg", (2026, 1, 1))];
        let loader = loader_with(&["a.jpg"]);
        let mut enc = MissingEncoder;
        let config = TimelapseConfig::new("plant-1", 1.0);

        let err = render_timelapse(&photos, &config, &loader, &mut enc)
            .await
            .unwrap_err();
        assert!(matches!(err, BloomlogError::Unsupported { .. }));
    }
}
