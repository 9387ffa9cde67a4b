//! Show garden information.

use std::path::PathBuf;

use bloomlog_garden_model::notebook::ItemKind;
use bloomlog_garden_model::LoadedGarden;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let garden =
        LoadedGarden::load(&path).map_err(|e| anyhow::anyhow!("Failed to load garden: {e}"))?;

    let g = &garden.garden;

    println!("Garden: {}", g.name);
    println!("  ID: {}", g.id);
    println!("  Created: {}", g.created_at);
    println!("  Modified: {}", g.modified_at);
    println!();

    println!("Plants: {}", g.plants.len());
    for plant in &g.plants {
        let photos = plant.logs.iter().filter(|l| l.photo.is_some()).count()
            + plant.photo.is_some() as usize;
        println!(
            "  {} ({} log entries, {} photos)",
            plant.name,
            plant.logs.len(),
            photos
        );
        println!("    id: {}", plant.id);
    }
    println!();

    println!("Garden logs: {}", g.logs.len());
    println!("Photos total: {}", g.all_photos().len());
    println!();

    let notes = garden
        .notebook
        .items
        .iter()
        .filter(|i| i.kind == ItemKind::Note)
        .count();
    let tasks = garden.notebook.items.len() - notes;
    let open_tasks = garden
        .notebook
        .items
        .iter()
        .filter(|i| i.kind == ItemKind::Task && !i.done)
        .count();
    println!("Notebook:");
    println!("  Notes: {notes}");
    println!("  Tasks: {tasks} ({open_tasks} open)");

    Ok(())
}
