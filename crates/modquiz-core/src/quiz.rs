//! Quiz submission scoring.
//!
//! Resolves each question's answer key from its tree, grades the learner's
//! answer with [`crate::grading`], and aggregates the results into the data
//! needed for an [`Attempt`](crate::model::Attempt).

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::grading::{
    grade_fill_blank, grade_flashcard, grade_multiple_choice, grade_multiple_select,
    grade_true_false, round_to,
};
use crate::model::{ModuleId, NewAttempt, OptionId, QuestionId, QuestionKind};
use crate::tree::QuestionTree;

/// A learner's answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    TrueFalse(bool),
    Choice(OptionId),
    Selection(BTreeSet<OptionId>),
    Blanks(Vec<String>),
    SelfGraded(bool),
}

/// The graded outcome of one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: QuestionId,
    pub score: f64,
    /// What the learner answered, as displayed back to them.
    pub user_answer: String,
    /// The answer key, as displayed back to the learner.
    pub correct_answer: String,
    /// Correct or incorrect feedback depending on the score; empty if unset.
    pub feedback: String,
}

/// The graded outcome of a whole quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub results: Vec<QuestionResult>,
    /// Sum of question scores, rounded to 2 places.
    pub total_score: f64,
    pub total_questions: u32,
    /// Mean question score as a percentage, rounded to 2 places.
    pub percentage: f64,
}

impl QuizOutcome {
    /// Build the write-once attempt record for this outcome.
    pub fn to_new_attempt(&self, module_id: ModuleId) -> NewAttempt {
        NewAttempt {
            module_id,
            score: self.percentage,
            total_questions: self.total_questions,
            points_earned: self.total_score,
            attempted_at: Utc::now(),
        }
    }
}

const NO_ANSWER: &str = "(no answer)";

/// Grade a single question. A missing answer, or one of the wrong shape,
/// is graded as the empty answer.
pub fn grade_question(tree: &QuestionTree, answer: Option<&Answer>) -> QuestionResult {
    let question = &tree.question;
    let options = &tree.options;

    let (score, user_answer, correct_answer) = match &question.kind {
        QuestionKind::TrueFalse { correct } => {
            let given = match answer {
                Some(Answer::TrueFalse(value)) => Some(*value),
                _ => None,
            };
            let score = grade_true_false(given.unwrap_or(false), *correct);
            let user = given.map_or_else(|| NO_ANSWER.to_string(), bool_label);
            (score, user, bool_label(*correct))
        }

        QuestionKind::MultipleChoice => {
            let selected = match answer {
                Some(Answer::Choice(id)) => Some(*id),
                _ => None,
            };
            let correct = options.iter().find(|o| o.is_correct);
            // Without both a choice and a key there is nothing to compare.
            let score = match (selected, correct) {
                (Some(selected), Some(correct)) => grade_multiple_choice(selected, correct.id),
                _ => 0.0,
            };
            let user = options
                .iter()
                .find(|o| Some(o.id) == selected)
                .map_or_else(|| NO_ANSWER.to_string(), |o| o.text.clone());
            let key = correct.map(|o| o.text.clone()).unwrap_or_default();
            (score, user, key)
        }

        QuestionKind::MultipleSelect => {
            let selected = match answer {
                Some(Answer::Selection(ids)) => ids.clone(),
                _ => BTreeSet::new(),
            };
            let all: BTreeSet<OptionId> = options.iter().map(|o| o.id).collect();
            let correct: BTreeSet<OptionId> =
                options.iter().filter(|o| o.is_correct).map(|o| o.id).collect();
            let score = grade_multiple_select(&selected, &correct, &all);

            let selected_texts: Vec<&str> = options
                .iter()
                .filter(|o| selected.contains(&o.id))
                .map(|o| o.text.as_str())
                .collect();
            let correct_texts: Vec<&str> = options
                .iter()
                .filter(|o| o.is_correct)
                .map(|o| o.text.as_str())
                .collect();
            let user = if selected_texts.is_empty() {
                "(none selected)".to_string()
            } else {
                selected_texts.join(", ")
            };
            (score, user, correct_texts.join(", "))
        }

        QuestionKind::FillBlank {
            blanks,
            case_sensitive,
        } => {
            let given: &[String] = match answer {
                Some(Answer::Blanks(values)) => values,
                _ => &[],
            };
            let score = grade_fill_blank(given, blanks, *case_sensitive);
            let user = if given.is_empty() {
                NO_ANSWER.to_string()
            } else {
                given.join(", ")
            };
            let key = blanks
                .iter()
                .map(|b| b.accepted.join(" / "))
                .collect::<Vec<_>>()
                .join("; ");
            (score, user, key)
        }

        QuestionKind::Flashcard { answer: reference } => {
            let self_correct = matches!(answer, Some(Answer::SelfGraded(true)));
            let user = if self_correct {
                "Marked correct"
            } else {
                "Marked incorrect"
            };
            (grade_flashcard(self_correct), user.to_string(), reference.clone())
        }
    };

    let feedback = if score >= 1.0 {
        question.feedback_correct.clone()
    } else {
        question.feedback_incorrect.clone()
    };

    QuestionResult {
        question_id: question.id,
        score,
        user_answer,
        correct_answer,
        feedback: feedback.unwrap_or_default(),
    }
}

/// Grade every question of a module against the submitted answers.
pub fn grade_quiz(questions: &[QuestionTree], answers: &HashMap<QuestionId, Answer>) -> QuizOutcome {
    let results: Vec<QuestionResult> = questions
        .iter()
        .map(|q| grade_question(q, answers.get(&q.question.id)))
        .collect();

    let total: f64 = results.iter().map(|r| r.score).sum();
    let count = results.len();
    let percentage = if count > 0 {
        round_to(total / count as f64 * 100.0, 2)
    } else {
        0.0
    };

    tracing::debug!(questions = count, total, percentage, "graded quiz");

    QuizOutcome {
        results,
        total_score: round_to(total, 2),
        total_questions: count as u32,
        percentage,
    }
}

fn bool_label(value: bool) -> String {
    let label = if value { "True" } else { "False" };
    label.to_string()
}
