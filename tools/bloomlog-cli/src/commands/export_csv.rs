//! Export a notebook date window as CSV.

use std::path::PathBuf;

use chrono::NaiveDate;

use bloomlog_garden_model::csv;
use bloomlog_garden_model::LoadedGarden;

pub fn run(
    path: PathBuf,
    from: NaiveDate,
    to: NaiveDate,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    if to < from {
        return Err(anyhow::anyhow!("Window end {to} is before start {from}"));
    }

    let garden =
        LoadedGarden::load(&path).map_err(|e| anyhow::anyhow!("Failed to load garden: {e}"))?;

    let content = csv::export_window(&garden.notebook, from, to);
    let rows = content.lines().count().saturating_sub(1);

    match output {
        Some(output_path) => {
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output_path, content)?;
            println!("Exported {rows} rows to {}", output_path.display());
        }
        None => print!("{content}"),
    }

    Ok(())
}
