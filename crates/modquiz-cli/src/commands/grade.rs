//! The `modquiz grade` command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use modquiz_core::model::QuestionId;
use modquiz_core::quiz::{grade_quiz, Answer, QuizOutcome};
use modquiz_core::tree::load_quiz;
use modquiz_core::{AttemptStore, CourseError, CourseReader, Entity};

use super::open_store;

pub fn execute(module_id: i64, answers_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let mut store = open_store(config_path.as_deref())?;

    let module = store
        .store()
        .module(module_id)?
        .ok_or_else(|| CourseError::not_found(Entity::Module, module_id))?;
    let questions = load_quiz(store.store(), module_id)?;
    anyhow::ensure!(
        !questions.is_empty(),
        "module {module_id} has no questions to grade"
    );

    let answers = load_answers(&answers_path)?;
    let outcome = grade_quiz(&questions, &answers);

    let attempt_id = store
        .store_mut()
        .record_attempt(outcome.to_new_attempt(module_id))?;
    store.save()?;

    print_outcome(&module.title, &outcome);
    tracing::debug!(attempt = attempt_id, module = module_id, "recorded attempt");
    Ok(())
}

/// Read a JSON object mapping question ids to answers, e.g.
/// `{"1": {"true_false": true}, "2": {"selection": [4, 6]}}`.
fn load_answers(path: &Path) -> Result<HashMap<QuestionId, Answer>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", path.display()))
}

fn print_outcome(module_title: &str, outcome: &QuizOutcome) {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Score", "Your answer", "Correct answer", "Feedback"]);

    for result in &outcome.results {
        table.add_row(vec![
            Cell::new(result.question_id),
            Cell::new(format!("{:.2}", result.score)),
            Cell::new(&result.user_answer),
            Cell::new(&result.correct_answer),
            Cell::new(&result.feedback),
        ]);
    }

    println!("{module_title}");
    println!("{table}");
    println!(
        "Score: {:.2}/{} ({:.2}%)",
        outcome.total_score, outcome.total_questions, outcome.percentage
    );
}
