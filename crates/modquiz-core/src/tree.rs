//! Owned views of a whole course tree.

use serde::{Deserialize, Serialize};

use crate::error::{CourseError, CourseResult, Entity};
use crate::model::{
    by_position, Course, CourseDraft, CourseId, Lesson, Module, ModuleDraft, ModuleId,
    OptionDraft, Question, QuestionDraft, QuestionOption,
};
use crate::store::CourseReader;

/// A course with every module, lesson, question, and option it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseTree {
    pub course: Course,
    pub modules: Vec<ModuleTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleTree {
    pub module: Module,
    pub lesson: Option<Lesson>,
    pub questions: Vec<QuestionTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTree {
    pub question: Question,
    /// Empty unless the question is a choice question.
    pub options: Vec<QuestionOption>,
}

impl QuestionTree {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            options: Vec::new(),
        }
    }
}

impl CourseTree {
    /// Load a course tree from a store. Modules and questions are ordered by
    /// `(sort_order, id)`; options keep the order the store returns.
    pub fn load<R>(reader: &R, course_id: CourseId) -> CourseResult<Self>
    where
        R: CourseReader + ?Sized,
    {
        let course = reader
            .course(course_id)?
            .ok_or_else(|| CourseError::not_found(Entity::Course, course_id))?;

        let mut modules = reader.modules(course_id)?;
        modules.sort_by(|a, b| by_position((a.sort_order, a.id), (b.sort_order, b.id)));

        let modules = modules
            .into_iter()
            .map(|module| {
                let lesson = reader.lesson(module.id)?;
                let questions = load_quiz(reader, module.id)?;
                Ok(ModuleTree {
                    module,
                    lesson,
                    questions,
                })
            })
            .collect::<CourseResult<Vec<_>>>()?;

        Ok(Self { course, modules })
    }

    pub fn question_count(&self) -> usize {
        self.modules.iter().map(|m| m.questions.len()).sum()
    }

    /// Strip identifiers, keeping order and field values.
    pub fn to_draft(&self) -> CourseDraft {
        CourseDraft {
            title: self.course.title.clone(),
            description: self.course.description.clone(),
            modules: self.modules.iter().map(ModuleTree::to_draft).collect(),
        }
    }
}

impl ModuleTree {
    pub fn to_draft(&self) -> ModuleDraft {
        ModuleDraft {
            title: self.module.title.clone(),
            sort_order: self.module.sort_order,
            lesson: self.lesson.as_ref().map(|l| l.content.clone()),
            questions: self.questions.iter().map(QuestionTree::to_draft).collect(),
        }
    }
}

impl QuestionTree {
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft {
            prompt: self.question.prompt.clone(),
            sort_order: self.question.sort_order,
            feedback_correct: self.question.feedback_correct.clone(),
            feedback_incorrect: self.question.feedback_incorrect.clone(),
            kind: self.question.kind.clone(),
            options: self
                .options
                .iter()
                .map(|o| OptionDraft::new(o.text.clone(), o.is_correct))
                .collect(),
        }
    }
}

/// Load a module's questions with their options, ordered by
/// `(sort_order, id)`.
pub fn load_quiz<R>(reader: &R, module_id: ModuleId) -> CourseResult<Vec<QuestionTree>>
where
    R: CourseReader + ?Sized,
{
    let mut questions = reader.questions(module_id)?;
    questions.sort_by(|a, b| by_position((a.sort_order, a.id), (b.sort_order, b.id)));

    questions
        .into_iter()
        .map(|question| {
            let options = if question.kind.has_options() {
                reader.options(question.id)?
            } else {
                Vec::new()
            };
            Ok(QuestionTree { question, options })
        })
        .collect()
}
