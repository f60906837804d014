//! In-memory course store.
//!
//! Holds every record in id-keyed maps and implements the core store traits.
//! The whole store is serializable so [`crate::json::JsonStore`] can snapshot
//! it to disk.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use modquiz_core::model::{
    by_position, Attempt, AttemptId, Course, CourseId, Lesson, Module, ModuleId, NewAttempt,
    OptionId, Question, QuestionDraft, QuestionId, QuestionOption,
};
use modquiz_core::{AttemptStore, CourseError, CourseReader, CourseResult, CourseWriter, Entity};

/// Last identifier handed out per record kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct IdCounters {
    course: i64,
    module: i64,
    question: i64,
    option: i64,
    attempt: i64,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// A store that keeps all records in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    ids: IdCounters,
    #[serde(default)]
    courses: BTreeMap<CourseId, Course>,
    #[serde(default)]
    modules: BTreeMap<ModuleId, Module>,
    /// Keyed by module id: at most one lesson per module.
    #[serde(default)]
    lessons: BTreeMap<ModuleId, Lesson>,
    #[serde(default)]
    questions: BTreeMap<QuestionId, Question>,
    #[serde(default)]
    options: BTreeMap<OptionId, QuestionOption>,
    #[serde(default)]
    attempts: BTreeMap<AttemptId, Attempt>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All courses, ordered by id.
    pub fn list_courses(&self) -> Vec<Course> {
        self.courses.values().cloned().collect()
    }

    /// Delete a course and everything it owns, including attempts recorded
    /// against its modules.
    pub fn delete_course(&mut self, id: CourseId) -> CourseResult<()> {
        if self.courses.remove(&id).is_none() {
            return Err(CourseError::not_found(Entity::Course, id));
        }

        let module_ids: Vec<ModuleId> = self
            .modules
            .values()
            .filter(|m| m.course_id == id)
            .map(|m| m.id)
            .collect();
        let question_ids: Vec<QuestionId> = self
            .questions
            .values()
            .filter(|q| module_ids.contains(&q.module_id))
            .map(|q| q.id)
            .collect();

        self.modules.retain(|_, m| m.course_id != id);
        self.lessons.retain(|module_id, _| !module_ids.contains(module_id));
        self.questions.retain(|_, q| !module_ids.contains(&q.module_id));
        self.options
            .retain(|_, o| !question_ids.contains(&o.question_id));
        self.attempts
            .retain(|_, a| !module_ids.contains(&a.module_id));

        tracing::info!(
            course_id = id,
            modules = module_ids.len(),
            questions = question_ids.len(),
            "deleted course"
        );
        Ok(())
    }

    fn require_course(&self, id: CourseId) -> CourseResult<()> {
        if self.courses.contains_key(&id) {
            Ok(())
        } else {
            Err(CourseError::not_found(Entity::Course, id))
        }
    }

    fn require_module(&self, id: ModuleId) -> CourseResult<()> {
        if self.modules.contains_key(&id) {
            Ok(())
        } else {
            Err(CourseError::not_found(Entity::Module, id))
        }
    }
}

impl CourseReader for MemoryStore {
    fn course(&self, id: CourseId) -> CourseResult<Option<Course>> {
        Ok(self.courses.get(&id).cloned())
    }

    fn modules(&self, course_id: CourseId) -> CourseResult<Vec<Module>> {
        let mut modules: Vec<Module> = self
            .modules
            .values()
            .filter(|m| m.course_id == course_id)
            .cloned()
            .collect();
        modules.sort_by(|a, b| by_position((a.sort_order, a.id), (b.sort_order, b.id)));
        Ok(modules)
    }

    fn module(&self, id: ModuleId) -> CourseResult<Option<Module>> {
        Ok(self.modules.get(&id).cloned())
    }

    fn lesson(&self, module_id: ModuleId) -> CourseResult<Option<Lesson>> {
        Ok(self.lessons.get(&module_id).cloned())
    }

    fn questions(&self, module_id: ModuleId) -> CourseResult<Vec<Question>> {
        let mut questions: Vec<Question> = self
            .questions
            .values()
            .filter(|q| q.module_id == module_id)
            .cloned()
            .collect();
        questions.sort_by(|a, b| by_position((a.sort_order, a.id), (b.sort_order, b.id)));
        Ok(questions)
    }

    fn options(&self, question_id: QuestionId) -> CourseResult<Vec<QuestionOption>> {
        let mut options: Vec<QuestionOption> = self
            .options
            .values()
            .filter(|o| o.question_id == question_id)
            .cloned()
            .collect();
        options.sort_by(|a, b| by_position((a.sort_order, a.id), (b.sort_order, b.id)));
        Ok(options)
    }
}

impl CourseWriter for MemoryStore {
    fn create_course(&mut self, title: &str, description: &str) -> CourseResult<CourseId> {
        let id = next(&mut self.ids.course);
        self.courses.insert(
            id,
            Course {
                id,
                title: title.to_string(),
                description: description.to_string(),
            },
        );
        Ok(id)
    }

    fn create_module(
        &mut self,
        course_id: CourseId,
        title: &str,
        sort_order: i32,
    ) -> CourseResult<ModuleId> {
        self.require_course(course_id)?;
        let id = next(&mut self.ids.module);
        self.modules.insert(
            id,
            Module {
                id,
                course_id,
                title: title.to_string(),
                sort_order,
            },
        );
        Ok(id)
    }

    fn save_lesson(&mut self, module_id: ModuleId, content: &str) -> CourseResult<()> {
        self.require_module(module_id)?;
        self.lessons.insert(
            module_id,
            Lesson {
                module_id,
                content: content.to_string(),
            },
        );
        Ok(())
    }

    fn create_question(
        &mut self,
        module_id: ModuleId,
        draft: &QuestionDraft,
    ) -> CourseResult<QuestionId> {
        self.require_module(module_id)?;
        let id = next(&mut self.ids.question);
        self.questions.insert(
            id,
            Question {
                id,
                module_id,
                prompt: draft.prompt.clone(),
                sort_order: draft.sort_order,
                feedback_correct: draft.feedback_correct.clone(),
                feedback_incorrect: draft.feedback_incorrect.clone(),
                kind: draft.kind.clone(),
            },
        );
        Ok(id)
    }

    fn add_option(
        &mut self,
        question_id: QuestionId,
        text: &str,
        is_correct: bool,
        sort_order: i32,
    ) -> CourseResult<OptionId> {
        if !self.questions.contains_key(&question_id) {
            return Err(CourseError::not_found(Entity::Question, question_id));
        }
        let id = next(&mut self.ids.option);
        self.options.insert(
            id,
            QuestionOption {
                id,
                question_id,
                text: text.to_string(),
                is_correct,
                sort_order,
            },
        );
        Ok(id)
    }
}

impl AttemptStore for MemoryStore {
    fn record_attempt(&mut self, attempt: NewAttempt) -> CourseResult<AttemptId> {
        self.require_module(attempt.module_id)?;
        let id = next(&mut self.ids.attempt);
        self.attempts.insert(
            id,
            Attempt {
                id,
                module_id: attempt.module_id,
                score: attempt.score,
                total_questions: attempt.total_questions,
                points_earned: attempt.points_earned,
                attempted_at: attempt.attempted_at,
            },
        );
        Ok(id)
    }

    fn attempts(&self) -> CourseResult<Vec<Attempt>> {
        let mut attempts: Vec<Attempt> = self.attempts.values().cloned().collect();
        attempts.sort_by(|a, b| b.attempted_at.cmp(&a.attempted_at).then(b.id.cmp(&a.id)));
        Ok(attempts)
    }
}
