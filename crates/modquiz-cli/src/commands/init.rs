//! The `modquiz init` command.

use std::path::Path;

use anyhow::{Context, Result};

const CONFIG_FILE: &str = "modquiz.toml";

pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE, SAMPLE_CONFIG)
            .with_context(|| format!("failed to write {CONFIG_FILE}"))?;
        println!("Created {CONFIG_FILE}");
    }

    println!("\nNext steps:");
    println!("  1. Run: modquiz import-course --input <course-dir>");
    println!("  2. Run: modquiz list-courses");
    println!("  3. Run: modquiz grade --module <id> --answers answers.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# modquiz configuration

# JSON file holding courses, modules, questions, and attempts.
# Overridden by the MODQUIZ_STORE environment variable.
store_path = "./modquiz-data/store.json"

# Default output directory for `modquiz export-course`.
export_dir = "./modquiz-export"
"#;
