//! The `modquiz validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use modquiz_core::validate::validate_draft;

pub fn execute(input: PathBuf) -> Result<()> {
    let draft = modquiz_xml::read_course_dir(&input)
        .with_context(|| format!("failed to read course from {}", input.display()))?;

    let questions: usize = draft.modules.iter().map(|m| m.questions.len()).sum();
    println!(
        "Course: {} ({} modules, {} questions)",
        draft.title,
        draft.modules.len(),
        questions
    );

    let warnings = validate_draft(&draft);
    for w in &warnings {
        println!("  [{}] WARNING: {}", w.location(), w.message);
    }

    if warnings.is_empty() {
        println!("Course is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
