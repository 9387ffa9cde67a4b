//! Initialize a new Bloomlog garden.

use std::path::PathBuf;

use bloomlog_garden_model::LoadedGarden;

pub fn run(name: String, output: PathBuf) -> anyhow::Result<()> {
    let garden_dir = output.join(&name);
    println!("Creating garden '{}' at {}", name, garden_dir.display());

    let garden = LoadedGarden::create(&garden_dir, &name)
        .map_err(|e| anyhow::anyhow!("Failed to create garden: {e}"))?;

    println!("Garden created successfully:");
    println!("  Directory: {}", garden.root.display());
    println!("  ID: {}", garden.garden.id);
    println!();
    println!("Directory structure:");
    println!("  {}/", name);
    println!("  ├── photos/      (image files)");
    println!("  ├── meta/        (garden.json, notebook.json)");
    println!("  └── exports/     (collages and timelapses)");

    Ok(())
}
