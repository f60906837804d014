//! Core data model types for modquiz.
//!
//! These are plain records: a course owns ordered modules, a module owns at
//! most one lesson and an ordered set of questions, and choice questions own
//! their options. Ownership only means "nested in the export tree".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub type CourseId = i64;
pub type ModuleId = i64;
pub type QuestionId = i64;
pub type OptionId = i64;
pub type AttemptId = i64;

/// Root of the course tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// An ordered section of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub course_id: CourseId,
    pub title: String,
    /// Display and export position among sibling modules; ties break by id.
    #[serde(default)]
    pub sort_order: i32,
}

/// Rich-text lesson content attached to a module. Opaque to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub module_id: ModuleId,
    pub content: String,
}

/// A single quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub module_id: ModuleId,
    pub prompt: String,
    #[serde(default)]
    pub sort_order: i32,
    /// Shown when the learner scores full marks.
    #[serde(default)]
    pub feedback_correct: Option<String>,
    /// Shown otherwise.
    #[serde(default)]
    pub feedback_incorrect: Option<String>,
    pub kind: QuestionKind,
}

impl Question {
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }
}

/// Type-specific answer key of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    TrueFalse {
        correct: bool,
    },
    /// Correctness lives in the question's options.
    MultipleChoice,
    /// Correctness lives in the question's options.
    MultipleSelect,
    FillBlank {
        blanks: Vec<Blank>,
        #[serde(default)]
        case_sensitive: bool,
    },
    /// Self-graded; the answer is only shown for reference.
    Flashcard {
        answer: String,
    },
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::TrueFalse { .. } => QuestionType::TrueFalse,
            QuestionKind::MultipleChoice => QuestionType::MultipleChoice,
            QuestionKind::MultipleSelect => QuestionType::MultipleSelect,
            QuestionKind::FillBlank { .. } => QuestionType::FillBlank,
            QuestionKind::Flashcard { .. } => QuestionType::Flashcard,
        }
    }

    /// Whether the question's answer key is held in child options.
    pub fn has_options(&self) -> bool {
        self.question_type().has_options()
    }
}

/// One fill-in-the-blank slot and the answers accepted for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blank {
    pub accepted: Vec<String>,
}

impl Blank {
    pub fn new<I, S>(accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accepted: accepted.into_iter().map(Into::into).collect(),
        }
    }
}

/// The closed set of question types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    TrueFalse,
    MultipleChoice,
    MultipleSelect,
    FillBlank,
    Flashcard,
}

impl QuestionType {
    pub const ALL: [QuestionType; 5] = [
        QuestionType::TrueFalse,
        QuestionType::MultipleChoice,
        QuestionType::MultipleSelect,
        QuestionType::FillBlank,
        QuestionType::Flashcard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::TrueFalse => "true_false",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::MultipleSelect => "multiple_select",
            QuestionType::FillBlank => "fill_blank",
            QuestionType::Flashcard => "flashcard",
        }
    }

    pub fn has_options(&self) -> bool {
        matches!(
            self,
            QuestionType::MultipleChoice | QuestionType::MultipleSelect
        )
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown question type: {s}"))
    }
}

/// A selectable answer of a multiple-choice or multiple-select question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: OptionId,
    pub question_id: QuestionId,
    pub text: String,
    pub is_correct: bool,
    #[serde(default)]
    pub sort_order: i32,
}

/// An immutable record of one graded quiz submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: AttemptId,
    pub module_id: ModuleId,
    /// Percentage in `[0, 100]`.
    pub score: f64,
    pub total_questions: u32,
    pub points_earned: f64,
    pub attempted_at: DateTime<Utc>,
}

/// Attempt data before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttempt {
    pub module_id: ModuleId,
    pub score: f64,
    pub total_questions: u32,
    pub points_earned: f64,
    pub attempted_at: DateTime<Utc>,
}

/// Order siblings by `(sort_order, id)`.
pub fn by_position(a: (i32, i64), b: (i32, i64)) -> Ordering {
    a.0.cmp(&b.0).then(a.1.cmp(&b.1))
}

// ---------------------------------------------------------------------------
// Drafts: parsed or authored data that does not have ids yet
// ---------------------------------------------------------------------------

/// A course tree without identifiers, as read from an export directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modules: Vec<ModuleDraft>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDraft {
    pub title: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub lesson: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub prompt: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub feedback_correct: Option<String>,
    #[serde(default)]
    pub feedback_incorrect: Option<String>,
    pub kind: QuestionKind,
    /// Only meaningful for choice questions; kept in document order.
    #[serde(default)]
    pub options: Vec<OptionDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDraft {
    pub text: String,
    pub is_correct: bool,
}

impl OptionDraft {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}
