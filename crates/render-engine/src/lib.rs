//! Bloomlog Render Engine
//!
//! Offline raster pipeline that turns selected garden photos into
//! shareable artifacts: a single collage image, or a timelapse video.
//!
//! # Pipeline Architecture
//!
//! ```text
//! photos ──► ImageLoader ──┐
//!                          ├── plan_layout (grid/masonry/.../heart)
//! LayoutConfig ────────────┘         │
//!                                    ├── cover-fit blit + clip + strokes
//!                                    ▼
//!                             collage.jpg (q90)
//!
//! plant timeline ──► sort by date ──► frame sequencer ──► VideoEncoder
//!                                                          (ffmpeg)
//! ```

pub mod canvas;
pub mod compose;
pub mod encoder;
pub mod layout;
pub mod loader;
pub mod timelapse;

pub use compose::{collage_filename, compose, encode_jpeg};
pub use encoder::{FfmpegEncoder, FrameSink, VideoEncoder};
pub use loader::{FsImageLoader, ImageLoader, MemoryLoader};
pub use timelapse::{render_timelapse, TimelapseReport};
