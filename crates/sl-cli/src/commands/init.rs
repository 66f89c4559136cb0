//! Init command implementation - scaffolds a new Sluice pipeline project

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::InitArgs;

/// Execute the init command
pub(crate) async fn execute(args: &InitArgs) -> Result<()> {
    // Reject names that could cause path traversal or confusing directory names
    if args.name.contains('/')
        || args.name.contains('\\')
        || args.name.contains("..")
        || args.name.starts_with('.')
        || args.name.starts_with('-')
    {
        anyhow::bail!(
            "Invalid project name '{}': must not contain '/', '\\', '..', or start with '.' or '-'",
            args.name
        );
    }

    let project_dir = Path::new(&args.name);

    if project_dir.exists() {
        anyhow::bail!(
            "Directory '{}' already exists. Choose a different project name.",
            args.name
        );
    }

    println!("Creating new Sluice pipeline project: {}\n", args.name);

    // Create directory structure
    let dirs = ["", "data/incoming", "data/processed"];
    for dir in &dirs {
        let path = project_dir.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }

    // Generate sluice.yml
    // Escape YAML special characters in interpolated values
    let safe_name = args.name.replace('"', "\\\"");
    let safe_db_path = args.database_path.replace('"', "\\\"");
    let config_content = format!(
        r#"name: "{name}"
version: "1.0.0"

input_path: "data/incoming"
processed_path: "data/processed"

database:
  path: "{db_path}"
"#,
        name = safe_name,
        db_path = safe_db_path,
    );
    fs::write(project_dir.join("sluice.yml"), config_content)
        .context("Failed to write sluice.yml")?;

    println!("  ✓ sluice.yml");
    println!("  ✓ data/incoming");
    println!("  ✓ data/processed");
    println!("\nNext steps:");
    println!("  cd {}", args.name);
    println!("  # drop JSON batches into data/incoming, then:");
    println!("  sluice run");

    Ok(())
}
