//! Store traits the core calls through.
//!
//! Persistence lives outside the core. The codec reads a course tree through
//! [`CourseReader`] and creates fresh records through [`CourseWriter`]; quiz
//! submissions are recorded through [`AttemptStore`].

use crate::error::CourseResult;
use crate::model::{
    Attempt, AttemptId, Course, CourseDraft, CourseId, Lesson, Module, ModuleId, NewAttempt,
    OptionId, Question, QuestionDraft, QuestionId, QuestionOption,
};

/// Read access to a course and its module/lesson/question/option tree.
pub trait CourseReader {
    fn course(&self, id: CourseId) -> CourseResult<Option<Course>>;

    /// Modules of a course, ordered by `(sort_order, id)`.
    fn modules(&self, course_id: CourseId) -> CourseResult<Vec<Module>>;

    fn module(&self, id: ModuleId) -> CourseResult<Option<Module>>;

    fn lesson(&self, module_id: ModuleId) -> CourseResult<Option<Lesson>>;

    /// Questions of a module, ordered by `(sort_order, id)`.
    fn questions(&self, module_id: ModuleId) -> CourseResult<Vec<Question>>;

    /// Options of a question, ordered by `(sort_order, id)`.
    fn options(&self, question_id: QuestionId) -> CourseResult<Vec<QuestionOption>>;
}

/// Write access for creating new course records. Every call allocates a new
/// identifier; nothing is merged into existing records.
pub trait CourseWriter {
    fn create_course(&mut self, title: &str, description: &str) -> CourseResult<CourseId>;

    fn create_module(
        &mut self,
        course_id: CourseId,
        title: &str,
        sort_order: i32,
    ) -> CourseResult<ModuleId>;

    /// Create or replace the lesson of a module.
    fn save_lesson(&mut self, module_id: ModuleId, content: &str) -> CourseResult<()>;

    /// Create a question. Options in the draft are ignored; add them with
    /// [`CourseWriter::add_option`].
    fn create_question(
        &mut self,
        module_id: ModuleId,
        draft: &QuestionDraft,
    ) -> CourseResult<QuestionId>;

    fn add_option(
        &mut self,
        question_id: QuestionId,
        text: &str,
        is_correct: bool,
        sort_order: i32,
    ) -> CourseResult<OptionId>;
}

/// Write-once storage of graded quiz attempts.
pub trait AttemptStore {
    fn record_attempt(&mut self, attempt: NewAttempt) -> CourseResult<AttemptId>;

    /// All recorded attempts, newest first.
    fn attempts(&self) -> CourseResult<Vec<Attempt>>;
}

/// Create a whole course from a draft, in draft order. Returns the new
/// course id.
///
/// Writes are not transactional: if the writer fails midway, records created
/// so far stay in place.
pub fn persist_draft<W>(writer: &mut W, draft: &CourseDraft) -> CourseResult<CourseId>
where
    W: CourseWriter + ?Sized,
{
    let course_id = writer.create_course(&draft.title, &draft.description)?;

    for module in &draft.modules {
        let module_id = writer.create_module(course_id, &module.title, module.sort_order)?;

        if let Some(content) = &module.lesson {
            writer.save_lesson(module_id, content)?;
        }

        for question in &module.questions {
            let question_id = writer.create_question(module_id, question)?;
            if question.kind.has_options() {
                for (index, option) in question.options.iter().enumerate() {
                    writer.add_option(question_id, &option.text, option.is_correct, index as i32)?;
                }
            }
        }
    }

    tracing::debug!(course_id, modules = draft.modules.len(), "persisted course draft");
    Ok(course_id)
}
