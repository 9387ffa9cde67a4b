//! Layout planners: map N photos onto a square canvas.
//!
//! Planners are pure placement math; no pixels are touched here.
//! Every layout is deterministic for identical inputs except polaroid,
//! which takes an injected random source (seed it to reproduce).

use rand::Rng;

use bloomlog_garden_model::compose::{Color, LayoutKind};

use crate::canvas::{ClipShape, Rect};

/// Polaroid card dimensions.
const CARD_W: f64 = 300.0;
const CARD_H: f64 = 350.0;

/// Film strip geometry.
const STRIP_W: f64 = 400.0;
const PERF_STEP: f64 = 40.0;
const PERF_SIZE: f64 = 16.0;
const PERF_INSET: f64 = 8.0;

/// Honeycomb geometry: flat-top hexagons, three per row. The radius is
/// an eighth of the canvas side (150px on the default 1200px canvas).
const HEX_RADIUS_RATIO: f64 = 1.0 / 8.0;
const HEX_PER_ROW: usize = 3;

/// Border stroke drawn around a placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: u32,
}

/// One photo's destination on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Destination rectangle of the photo itself.
    pub rect: Rect,

    /// Clip applied while blitting into `rect`.
    pub clip: ClipShape,

    /// Rotation around the card center (polaroid only).
    pub rotation_deg: f64,

    /// White card frame behind the photo (polaroid only).
    pub card: Option<Rect>,

    /// Border stroke, if any.
    pub stroke: Option<Stroke>,
}

impl Placement {
    fn plain(rect: Rect, stroke: Option<Stroke>) -> Self {
        Self {
            rect,
            clip: ClipShape::Full,
            rotation_deg: 0.0,
            card: None,
            stroke,
        }
    }
}

/// Background decoration drawn before any photo.
#[derive(Debug, Clone, PartialEq)]
pub enum Decor {
    Fill { rect: Rect, color: Color },
}

/// A complete arrangement for one compose run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutPlan {
    pub decor: Vec<Decor>,
    pub placements: Vec<Placement>,
}

impl Default for Placement {
    fn default() -> Self {
        Placement::plain(Rect::new(0, 0, 0, 0), None)
    }
}

/// Plan an arrangement of `n` photos on a `side`-pixel square canvas.
///
/// `background` is used for cut-out decorations (film perforations);
/// `rng` only influences the polaroid layout. The heart layout plans as
/// a grid; the compositor renders it offscreen and clips afterwards.
pub fn plan<R: Rng>(
    kind: LayoutKind,
    n: usize,
    side: u32,
    spacing: u32,
    background: Color,
    rng: &mut R,
) -> LayoutPlan {
    let s = side as f64;
    let sp = spacing as f64;
    match kind {
        LayoutKind::Grid | LayoutKind::Heart => plan_grid(n, s, sp),
        LayoutKind::Masonry => plan_masonry(n, s, sp),
        LayoutKind::Polaroid => plan_polaroid(n, s, rng),
        LayoutKind::Film => plan_film(n, s, sp, background),
        LayoutKind::Circle => plan_circle(n, s, sp),
        LayoutKind::Honeycomb => plan_honeycomb(n, s),
        LayoutKind::Strips => plan_strips(n, s, sp),
        LayoutKind::Focus => plan_focus(n, s, sp),
    }
}

/// Grid dimensions: one row for 2 or 3 photos, otherwise near-square.
pub fn grid_dims(n: usize) -> (usize, usize) {
    match n {
        0 => (0, 0),
        1 => (1, 1),
        2 => (2, 1),
        3 => (3, 1),
        _ => {
            let cols = (n as f64).sqrt().ceil() as usize;
            let rows = n.div_ceil(cols);
            (cols, rows)
        }
    }
}

fn cell_stroke() -> Option<Stroke> {
    Some(Stroke {
        color: Color::WHITE,
        width: 3,
    })
}

fn plan_grid(n: usize, s: f64, sp: f64) -> LayoutPlan {
    let (cols, rows) = grid_dims(n);
    let cell_w = (s - (cols as f64 + 1.0) * sp) / cols as f64;
    let cell_h = (s - (rows as f64 + 1.0) * sp) / rows as f64;

    let placements = (0..n)
        .map(|i| {
            let col = i % cols;
            let row = i / cols;
            let x = sp + col as f64 * (cell_w + sp);
            let y = sp + row as f64 * (cell_h + sp);
            Placement::plain(Rect::from_f64(x, y, cell_w, cell_h), cell_stroke())
        })
        .collect();

    LayoutPlan {
        decor: vec![],
        placements,
    }
}

fn plan_masonry(n: usize, s: f64, sp: f64) -> LayoutPlan {
    let left_count = n.div_ceil(2);
    let right_count = n - left_count;
    let col_w = (s - 3.0 * sp) / 2.0;

    let mut placements = Vec::with_capacity(n);
    for (count, x) in [(left_count, sp), (right_count, 2.0 * sp + col_w)] {
        if count == 0 {
            continue;
        }
        let cell_h = (s - (count as f64 + 1.0) * sp) / count as f64;
        for i in 0..count {
            let y = sp + i as f64 * (cell_h + sp);
            placements.push(Placement::plain(
                Rect::from_f64(x, y, col_w, cell_h),
                cell_stroke(),
            ));
        }
    }

    LayoutPlan {
        decor: vec![],
        placements,
    }
}

fn plan_polaroid<R: Rng>(n: usize, s: f64, rng: &mut R) -> LayoutPlan {
    // Keep the rotated card fully on canvas: the center must stay at
    // least half the card diagonal away from every edge. Cards shrink
    // on canvases too small for the full 300x350 frame.
    let half_diag = (CARD_W / 2.0).hypot(CARD_H / 2.0);
    let scale = ((s / 2.0 - 8.0) / half_diag).min(1.0);
    let card_w = CARD_W * scale;
    let card_h = CARD_H * scale;
    let inset = 20.0 * scale;
    let margin = half_diag * scale + 4.0;

    let placements = (0..n)
        .map(|_| {
            let cx = rng.gen_range(margin..=s - margin);
            let cy = rng.gen_range(margin..=s - margin);
            let rotation_deg = rng.gen_range(-15.0..=15.0);

            let card = Rect::from_f64(cx - card_w / 2.0, cy - card_h / 2.0, card_w, card_h);
            // Photo window: square, leaving the classic wide bottom
            // border.
            let photo = Rect::from_f64(
                cx - card_w / 2.0 + inset,
                cy - card_h / 2.0 + inset,
                card_w - 2.0 * inset,
                card_w - 2.0 * inset,
            );

            Placement {
                rect: photo,
                clip: ClipShape::Full,
                rotation_deg,
                card: Some(card),
                stroke: None,
            }
        })
        .collect();

    LayoutPlan {
        decor: vec![],
        placements,
    }
}

fn plan_film(n: usize, s: f64, sp: f64, background: Color) -> LayoutPlan {
    let x0 = (s - STRIP_W) / 2.0;
    let mut decor = vec![Decor::Fill {
        rect: Rect::from_f64(x0, 0.0, STRIP_W, s),
        color: Color::BLACK,
    }];

    // Perforation squares down both edges.
    let mut y = PERF_INSET;
    while y + PERF_SIZE <= s {
        for x in [x0 + PERF_INSET, x0 + STRIP_W - PERF_INSET - PERF_SIZE] {
            decor.push(Decor::Fill {
                rect: Rect::from_f64(x, y, PERF_SIZE, PERF_SIZE),
                color: background,
            });
        }
        y += PERF_STEP;
    }

    let photo_x = x0 + PERF_INSET + PERF_SIZE + PERF_INSET;
    let photo_w = STRIP_W - 2.0 * (PERF_INSET + PERF_SIZE + PERF_INSET);
    let cell_h = (s - (n as f64 + 1.0) * sp) / n as f64;
    let placements = (0..n)
        .map(|i| {
            let y = sp + i as f64 * (cell_h + sp);
            Placement::plain(Rect::from_f64(photo_x, y, photo_w, cell_h), None)
        })
        .collect();

    LayoutPlan { decor, placements }
}

fn plan_circle(n: usize, s: f64, sp: f64) -> LayoutPlan {
    let mut plan = plan_grid(n, s, sp);
    for placement in &mut plan.placements {
        let (cx, cy) = placement.rect.center();
        let r = (placement.rect.w.min(placement.rect.h) as f64) / 2.0;
        placement.clip = ClipShape::Circle { cx, cy, r };
        placement.stroke = Some(Stroke {
            color: Color::WHITE,
            width: 6,
        });
    }
    plan
}

fn plan_honeycomb(n: usize, s: f64) -> LayoutPlan {
    let sqrt3 = 3f64.sqrt();
    let radius = s * HEX_RADIUS_RATIO;
    let pitch_x = 1.5 * radius;
    let pitch_y = sqrt3 * radius;

    let rows = n.div_ceil(HEX_PER_ROW);
    let used_w = (HEX_PER_ROW - 1) as f64 * pitch_x + 2.0 * radius;
    let used_h = rows as f64 * pitch_y + pitch_y / 2.0;
    let ox = (s - used_w) / 2.0 + radius;
    let oy = ((s - used_h) / 2.0).max(0.0) + pitch_y / 2.0;

    let placements = (0..n)
        .map(|i| {
            let col = i % HEX_PER_ROW;
            let row = i / HEX_PER_ROW;
            let cx = ox + col as f64 * pitch_x;
            let mut cy = oy + row as f64 * pitch_y;
            if col % 2 == 1 {
                cy += pitch_y / 2.0;
            }
            Placement {
                rect: Rect::from_f64(cx - radius, cy - pitch_y / 2.0, 2.0 * radius, pitch_y),
                clip: ClipShape::Hexagon { cx, cy, r: radius },
                rotation_deg: 0.0,
                card: None,
                stroke: Some(Stroke {
                    color: Color::WHITE,
                    width: 4,
                }),
            }
        })
        .collect();

    LayoutPlan {
        decor: vec![],
        placements,
    }
}

fn plan_strips(n: usize, s: f64, sp: f64) -> LayoutPlan {
    let band_h = (s - (n as f64 + 1.0) * sp) / n as f64;
    let placements = (0..n)
        .map(|i| {
            let y = sp + i as f64 * (band_h + sp);
            Placement::plain(
                Rect::from_f64(sp, y, s - 2.0 * sp, band_h),
                cell_stroke(),
            )
        })
        .collect();

    LayoutPlan {
        decor: vec![],
        placements,
    }
}

fn plan_focus(n: usize, s: f64, sp: f64) -> LayoutPlan {
    let half_w = (s - 3.0 * sp) / 2.0;
    let mut placements = vec![Placement::plain(
        Rect::from_f64(sp, sp, half_w, s - 2.0 * sp),
        cell_stroke(),
    )];

    let rest = n - 1;
    if rest > 0 {
        let cell_h = (s - (rest as f64 + 1.0) * sp) / rest as f64;
        let x = 2.0 * sp + half_w;
        for i in 0..rest {
            let y = sp + i as f64 * (cell_h + sp);
            placements.push(Placement::plain(
                Rect::from_f64(x, y, half_w, cell_h),
                cell_stroke(),
            ));
        }
    }

    LayoutPlan {
        decor: vec![],
        placements,
    }
}
