//! Render a plant's photo timeline to video.

use std::path::PathBuf;

use bloomlog_common::config::AppConfig;
use bloomlog_garden_model::compose::TimelapseConfig;
use bloomlog_garden_model::LoadedGarden;
use bloomlog_render_engine::{render_timelapse, FfmpegEncoder, FsImageLoader};

pub async fn run(
    path: PathBuf,
    plant_id: String,
    seconds_per_photo: Option<f64>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let garden =
        LoadedGarden::load(&path).map_err(|e| anyhow::anyhow!("Failed to load garden: {e}"))?;
    let config = AppConfig::load();

    let mut photos = garden
        .garden
        .plant_timeline(&plant_id)
        .ok_or_else(|| anyhow::anyhow!("Unknown plant: {plant_id}"))?;
    if photos.is_empty() {
        return Err(anyhow::anyhow!("Plant '{plant_id}' has no photos"));
    }

    // Loader paths are relative to the garden root.
    for photo in &mut photos {
        photo.path = garden.root.join(&photo.path).to_string_lossy().into_owned();
    }

    let timelapse_config = TimelapseConfig::new(
        &plant_id,
        seconds_per_photo.unwrap_or(config.timelapse.seconds_per_photo),
    );

    let output_path = output.unwrap_or_else(|| {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        garden
            .root
            .join("exports")
            .join(format!("timelapse-{plant_id}-{stamp}.mp4"))
    });

    println!("Rendering timelapse for plant '{plant_id}'");
    println!("  Photos: {}", photos.len());
    println!("  Output: {}", output_path.display());

    let loader = FsImageLoader::new();
    let mut encoder = FfmpegEncoder::new(&output_path);

    match render_timelapse(&photos, &timelapse_config, &loader, &mut encoder).await {
        Ok(report) => {
            println!(
                "Timelapse complete: {} ({} frames, {} photos skipped)",
                report.output.display(),
                report.frames_written,
                report.photos_skipped
            );
        }
        Err(e) => {
            println!("Timelapse failed: {e}");
        }
    }

    Ok(())
}
