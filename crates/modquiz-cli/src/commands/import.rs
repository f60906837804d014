//! The `modquiz import-course` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use modquiz_core::validate::validate_course;
use modquiz_core::CourseTree;

use super::open_store;

pub fn execute(input: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let mut store = open_store(config_path.as_deref())?;

    let course_id = modquiz_xml::import_course(store.store_mut(), &input)
        .with_context(|| format!("failed to import course from {}", input.display()))?;
    store.save()?;

    let tree = CourseTree::load(store.store(), course_id)?;
    for warning in validate_course(&tree) {
        eprintln!("  [{}] WARNING: {}", warning.location(), warning.message);
    }

    println!(
        "Imported \"{}\" as course {course_id} ({} modules)",
        tree.course.title,
        tree.modules.len()
    );
    Ok(())
}
