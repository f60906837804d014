//! The `modquiz export-course` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use modquiz_store::{load_config_from, JsonStore};

pub fn execute(course_id: i64, output: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = JsonStore::open(&config.store_path)?;
    let output = output.unwrap_or(config.export_dir);

    modquiz_xml::export_course(store.store(), course_id, &output)
        .with_context(|| format!("failed to export course {course_id}"))?;

    println!("Exported course {course_id} to {}", output.display());
    Ok(())
}
