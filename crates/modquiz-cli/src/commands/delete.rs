//! The `modquiz delete-course` command.

use std::path::PathBuf;

use anyhow::Result;

use super::open_store;

pub fn execute(course_id: i64, config_path: Option<PathBuf>) -> Result<()> {
    let mut store = open_store(config_path.as_deref())?;
    store.store_mut().delete_course(course_id)?;
    store.save()?;

    println!("Deleted course {course_id}");
    Ok(())
}
