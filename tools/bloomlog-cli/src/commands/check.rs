//! Check system capabilities.

use bloomlog_common::config::{config_file_path, AppConfig};
use bloomlog_render_engine::{FfmpegEncoder, VideoEncoder};

pub fn run() -> anyhow::Result<()> {
    println!("Bloomlog System Check");
    println!("{}", "=".repeat(50));

    // Video encoder
    let encoder = FfmpegEncoder::new("probe.mp4");
    if encoder.is_available() {
        println!("[OK] Video encoder: ffmpeg found in PATH");
    } else {
        println!("[WARN] Video encoder: ffmpeg not found (timelapse export disabled)");
    }

    // Config
    let config_path = config_file_path();
    if config_path.exists() {
        println!("[OK] Config: {}", config_path.display());
    } else {
        println!("[OK] Config: defaults (no file at {})", config_path.display());
    }

    let config = AppConfig::load();
    println!("     Gardens directory: {}", config.gardens_dir.display());
    println!(
        "     Collage canvas: {}px, JPEG quality {}",
        config.compose.canvas_side, config.compose.jpeg_quality
    );
    println!(
        "     Timelapse: {}px @ {}fps, {:.1}s per photo",
        config.timelapse.canvas_side, config.timelapse.fps, config.timelapse.seconds_per_photo
    );

    println!();
    if encoder.is_available() {
        println!("All capabilities are available. Bloomlog is ready.");
    } else {
        println!("Collages work; install ffmpeg to enable timelapse export.");
    }

    Ok(())
}
