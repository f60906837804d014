//! The `modquiz list-modules` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use modquiz_core::CourseTree;

use super::open_store;

pub fn execute(course_id: i64, config_path: Option<PathBuf>) -> Result<()> {
    let store = open_store(config_path.as_deref())?;
    let tree = CourseTree::load(store.store(), course_id)
        .with_context(|| format!("failed to load course {course_id}"))?;

    println!("Course {}: {}", tree.course.id, tree.course.title);

    if tree.modules.is_empty() {
        println!("No modules.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Position", "Title", "Lesson", "Questions"]);

    for module in &tree.modules {
        table.add_row(vec![
            Cell::new(module.module.id),
            Cell::new(module.module.sort_order),
            Cell::new(&module.module.title),
            Cell::new(if module.lesson.is_some() { "yes" } else { "no" }),
            Cell::new(module.questions.len()),
        ]);
    }

    println!("{table}");
    Ok(())
}
