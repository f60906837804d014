//! Subcommand implementations.

use std::path::Path;

use anyhow::Result;

use modquiz_store::{load_config_from, JsonStore};

pub mod delete;
pub mod export;
pub mod grade;
pub mod import;
pub mod init;
pub mod list_courses;
pub mod list_modules;
pub mod report;
pub mod validate;

/// Open the JSON store named by the active config.
fn open_store(config_path: Option<&Path>) -> Result<JsonStore> {
    let config = load_config_from(config_path)?;
    JsonStore::open(config.store_path)
}
