//! Compose selected photos into a collage.

use std::path::{Path, PathBuf};

use rand::SeedableRng;

use bloomlog_common::config::AppConfig;
use bloomlog_garden_model::compose::{Color, LayoutConfig, LayoutKind};
use bloomlog_garden_model::photo::PhotoSelection;
use bloomlog_garden_model::LoadedGarden;
use bloomlog_render_engine::{collage_filename, compose, encode_jpeg, FsImageLoader, ImageLoader};

pub fn run(
    path: PathBuf,
    photo_ids: Vec<String>,
    layout: String,
    background: Option<String>,
    spacing: Option<u32>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let garden =
        LoadedGarden::load(&path).map_err(|e| anyhow::anyhow!("Failed to load garden: {e}"))?;
    let config = AppConfig::load();

    let layout: LayoutKind = layout.parse().map_err(|e| anyhow::anyhow!("{e}"))?;
    let background: Color = background
        .as_deref()
        .unwrap_or(&config.compose.background)
        .parse()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let layout_config = LayoutConfig::new(
        layout,
        background,
        spacing.unwrap_or(config.compose.spacing),
    );

    let mut selection = PhotoSelection::new(garden.garden.all_photos());
    for id in &photo_ids {
        if !selection.toggle(id) {
            println!("  Skipping photo '{id}' (unknown id or selection full)");
        }
    }
    if !selection.is_composable() {
        return Err(anyhow::anyhow!(
            "Need between 2 and 10 valid photos, got {}",
            selection.selected_count()
        ));
    }

    let loader = FsImageLoader::new();
    let mut images = Vec::new();
    for photo in selection.selected() {
        let abs = garden.root.join(&photo.path);
        let img = loader
            .load(Path::new(&abs))
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {e}", photo.path))?;
        images.push(img);
    }

    println!(
        "Composing {} photos with '{layout}' layout",
        images.len()
    );

    let mut rng = rand::rngs::StdRng::from_entropy();
    let collage = compose(&images, &layout_config, config.compose.canvas_side, &mut rng)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let output_path = output.unwrap_or_else(|| {
        garden
            .root
            .join("exports")
            .join(collage_filename(chrono::Local::now()))
    });
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let bytes = encode_jpeg(&collage, config.compose.jpeg_quality).map_err(|e| anyhow::anyhow!("{e}"))?;
    std::fs::write(&output_path, bytes)?;

    println!("Collage written: {}", output_path.display());
    Ok(())
}
