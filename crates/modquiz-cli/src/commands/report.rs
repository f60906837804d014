//! The `modquiz report` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use modquiz_core::report::AttemptReport;

use super::open_store;

pub fn execute(format: String, config_path: Option<PathBuf>) -> Result<()> {
    let store = open_store(config_path.as_deref())?;
    let report = AttemptReport::collect(store.store())?;

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "text" => print_table(&report),
        other => anyhow::bail!("unknown report format: '{other}' (expected text, json, markdown)"),
    }

    Ok(())
}

fn print_table(report: &AttemptReport) {
    if report.attempts.is_empty() {
        println!("No attempts recorded.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["When", "Course", "Module", "Score", "Points", "Questions"]);

    for detail in &report.attempts {
        let attempt = &detail.attempt;
        table.add_row(vec![
            Cell::new(attempt.attempted_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&detail.course_title),
            Cell::new(&detail.module_title),
            Cell::new(format!("{:.1}%", attempt.score)),
            Cell::new(format!("{:.2}", attempt.points_earned)),
            Cell::new(attempt.total_questions),
        ]);
    }

    println!("{table}");
    if let Some(avg) = report.average_score() {
        println!("{} attempt(s), average {avg:.1}%", report.attempts.len());
    }
}
