//! The `modquiz list-courses` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use modquiz_core::CourseTree;

use super::open_store;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let store = open_store(config_path.as_deref())?;
    let courses = store.store().list_courses();

    if courses.is_empty() {
        println!("No courses. Run `modquiz import-course --input <dir>` to add one.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Modules", "Questions"]);

    for course in &courses {
        let tree = CourseTree::load(store.store(), course.id)?;
        table.add_row(vec![
            Cell::new(course.id),
            Cell::new(&course.title),
            Cell::new(tree.modules.len()),
            Cell::new(tree.question_count()),
        ]);
    }

    println!("{table}");
    Ok(())
}
