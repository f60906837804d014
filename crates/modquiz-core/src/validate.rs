//! Authoring-time validation.
//!
//! The grading engine never rejects a question; it degrades to a zero score
//! instead. These checks catch the ungradeable cases before learners see
//! them.

use std::collections::HashSet;

use crate::model::{CourseDraft, QuestionDraft, QuestionKind};
use crate::tree::CourseTree;

/// A warning from course validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// 1-based module position in the course.
    pub module: Option<usize>,
    /// 1-based question position in the module.
    pub question: Option<usize>,
    pub message: String,
}

impl ValidationWarning {
    /// Location label such as `module 2, question 3`.
    pub fn location(&self) -> String {
        match (self.module, self.question) {
            (Some(m), Some(q)) => format!("module {m}, question {q}"),
            (Some(m), None) => format!("module {m}"),
            _ => "course".to_string(),
        }
    }
}

/// Validate a stored course tree.
pub fn validate_course(tree: &CourseTree) -> Vec<ValidationWarning> {
    validate_draft(&tree.to_draft())
}

/// Validate a course draft, e.g. one read from an export directory.
pub fn validate_draft(draft: &CourseDraft) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if draft.title.trim().is_empty() {
        warnings.push(ValidationWarning {
            module: None,
            question: None,
            message: "course title is empty".into(),
        });
    }

    let mut seen_titles = HashSet::new();
    for (m_idx, module) in draft.modules.iter().enumerate() {
        let m_pos = m_idx + 1;

        if !seen_titles.insert(module.title.trim()) {
            warnings.push(ValidationWarning {
                module: Some(m_pos),
                question: None,
                message: format!("duplicate module title: {}", module.title),
            });
        }

        for (q_idx, question) in module.questions.iter().enumerate() {
            for message in question_problems(question) {
                warnings.push(ValidationWarning {
                    module: Some(m_pos),
                    question: Some(q_idx + 1),
                    message,
                });
            }
        }
    }

    warnings
}

fn question_problems(question: &QuestionDraft) -> Vec<String> {
    let mut problems = Vec::new();

    if question.prompt.trim().is_empty() {
        problems.push("prompt is empty".to_string());
    }

    let correct = question.options.iter().filter(|o| o.is_correct).count();
    match &question.kind {
        QuestionKind::MultipleChoice => {
            if question.options.len() < 2 {
                problems.push("multiple_choice needs at least two options".to_string());
            }
            if correct != 1 {
                problems.push(format!(
                    "multiple_choice must mark exactly one option correct, found {correct}"
                ));
            }
        }
        QuestionKind::MultipleSelect => {
            if question.options.len() < 2 {
                problems.push("multiple_select needs at least two options".to_string());
            }
            if correct == 0 {
                problems.push("multiple_select has no correct option".to_string());
            }
        }
        QuestionKind::FillBlank { blanks, .. } => {
            if blanks.is_empty() {
                problems.push("fill_blank has no blanks".to_string());
            }
            for (b_idx, blank) in blanks.iter().enumerate() {
                if blank.accepted.iter().all(|a| a.trim().is_empty()) {
                    problems.push(format!("blank {} has no accepted answer", b_idx + 1));
                }
            }
        }
        QuestionKind::Flashcard { answer } => {
            if answer.trim().is_empty() {
                problems.push("flashcard answer is empty".to_string());
            }
        }
        QuestionKind::TrueFalse { .. } => {}
    }

    problems
}
