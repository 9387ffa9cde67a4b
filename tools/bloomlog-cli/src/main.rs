//! Bloomlog CLI — Command-line interface for garden journaling.
//!
//! Usage:
//!   bloomlog init <NAME>            Create a new garden
//!   bloomlog info <PATH>            Show garden information
//!   bloomlog validate <PATH>        Validate a garden bundle
//!   bloomlog merge <PATH>           Compose selected photos into a collage
//!   bloomlog timelapse <PATH>       Render a plant timeline to video
//!   bloomlog notebook <PATH> <CMD>  Manage notes and recurring tasks
//!   bloomlog export-csv <PATH>      Export a notebook window as CSV
//!   bloomlog check                  Check system capabilities

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "bloomlog",
    about = "Garden journaling with photo collages and timelapses",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new empty garden
    Init {
        /// Garden name
        name: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Show garden information
    Info {
        /// Path to the garden directory
        path: PathBuf,
    },

    /// Validate a garden bundle
    Validate {
        /// Path to the garden directory
        path: PathBuf,
    },

    /// Compose selected photos into a collage
    Merge {
        /// Path to the garden directory
        path: PathBuf,

        /// Photo ids to include (2 to 10, repeatable)
        #[arg(short = 'p', long = "photo", required = true)]
        photos: Vec<String>,

        /// Layout: grid, masonry, polaroid, film, circle, honeycomb, strips, focus, heart
        #[arg(long, default_value = "grid")]
        layout: String,

        /// Background color (#rrggbb)
        #[arg(long)]
        background: Option<String>,

        /// Gutter between photos in pixels
        #[arg(long)]
        spacing: Option<u32>,

        /// Output file path (defaults to exports/merged-garden-<timestamp>.jpg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a plant's photo timeline to video
    Timelapse {
        /// Path to the garden directory
        path: PathBuf,

        /// Plant id to render
        #[arg(long)]
        plant: String,

        /// Seconds each photo stays on screen [0.1, 3.0]
        #[arg(long)]
        seconds_per_photo: Option<f64>,

        /// Output file path (defaults to exports/timelapse-<plant>-<timestamp>.mp4)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage notebook notes and tasks
    Notebook {
        /// Path to the garden directory
        path: PathBuf,

        #[command(subcommand)]
        action: commands::notebook::NotebookAction,
    },

    /// Export a notebook date window as CSV
    ExportCsv {
        /// Path to the garden directory
        path: PathBuf,

        /// Window start (YYYY-MM-DD)
        #[arg(long)]
        from: chrono::NaiveDate,

        /// Window end, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: chrono::NaiveDate,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check system capabilities
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    bloomlog_common::logging::init_logging(&bloomlog_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Init { name, output } => commands::init::run(name, output),
        Commands::Info { path } => commands::info::run(path),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Merge {
            path,
            photos,
            layout,
            background,
            spacing,
            output,
        } => commands::merge::run(path, photos, layout, background, spacing, output),
        Commands::Timelapse {
            path,
            plant,
            seconds_per_photo,
            output,
        } => commands::timelapse::run(path, plant, seconds_per_photo, output).await,
        Commands::Notebook { path, action } => commands::notebook::run(path, action),
        Commands::ExportCsv {
            path,
            from,
            to,
            output,
        } => commands::export_csv::run(path, from, to, output),
        Commands::Check => commands::check::run(),
    }
}
