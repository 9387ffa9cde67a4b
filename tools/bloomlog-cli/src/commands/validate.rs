//! Validate a Bloomlog garden bundle.

use std::path::PathBuf;

use bloomlog_garden_model::LoadedGarden;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating garden at: {}", path.display());

    let garden =
        LoadedGarden::load(&path).map_err(|e| anyhow::anyhow!("Failed to load garden: {e}"))?;

    println!("  Name: {}", garden.garden.name);
    println!("  Version: {}", garden.garden.version);
    println!("  Plants: {}", garden.garden.plants.len());
    println!("  Notebook items: {}", garden.notebook.items.len());

    // Check photo files
    let errors = garden.validate_photos();
    if errors.is_empty() {
        println!("  Photos: All present");
        println!("\nGarden is valid.");
    } else {
        println!("\nValidation issues:");
        for error in &errors {
            println!("  - {error}");
        }
        println!(
            "\n{} issue(s) found. Garden may not be fully usable.",
            errors.len()
        );
    }

    Ok(())
}
