//! Attempt reporting across courses.

use serde::{Deserialize, Serialize};

use crate::error::CourseResult;
use crate::model::{Attempt, CourseId};
use crate::store::{AttemptStore, CourseReader};

/// An attempt joined with the titles of the module and course it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptDetail {
    pub attempt: Attempt,
    pub module_title: String,
    pub course_id: CourseId,
    pub course_title: String,
}

/// All recorded attempts, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttemptReport {
    pub attempts: Vec<AttemptDetail>,
}

impl AttemptReport {
    /// Build the report. Attempts whose module or course no longer exists
    /// are left out.
    pub fn collect<S>(store: &S) -> CourseResult<Self>
    where
        S: AttemptStore + CourseReader + ?Sized,
    {
        let mut attempts = Vec::new();

        for attempt in store.attempts()? {
            let Some(module) = store.module(attempt.module_id)? else {
                tracing::debug!(attempt = attempt.id, "skipping attempt of deleted module");
                continue;
            };
            let Some(course) = store.course(module.course_id)? else {
                continue;
            };
            attempts.push(AttemptDetail {
                attempt,
                module_title: module.title,
                course_id: course.id,
                course_title: course.title,
            });
        }

        attempts.sort_by(|a, b| {
            b.attempt
                .attempted_at
                .cmp(&a.attempt.attempted_at)
                .then(b.attempt.id.cmp(&a.attempt.id))
        });

        Ok(Self { attempts })
    }

    /// Mean percentage over all attempts, or `None` if there are none.
    pub fn average_score(&self) -> Option<f64> {
        if self.attempts.is_empty() {
            return None;
        }
        let total: f64 = self.attempts.iter().map(|a| a.attempt.score).sum();
        Some(total / self.attempts.len() as f64)
    }

    /// Format the report as a markdown table.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("**Attempts:** {}", self.attempts.len()));
        if let Some(avg) = self.average_score() {
            md.push_str(&format!(", average {avg:.1}%"));
        }
        md.push_str("\n\n");

        if self.attempts.is_empty() {
            return md;
        }

        md.push_str("| When | Course | Module | Score | Points | Questions |\n");
        md.push_str("|------|--------|--------|-------|--------|-----------|\n");
        for a in &self.attempts {
            md.push_str(&format!(
                "| {} | {} | {} | {:.1}% | {:.2} | {} |\n",
                a.attempt.attempted_at.format("%Y-%m-%d %H:%M"),
                a.course_title,
                a.module_title,
                a.attempt.score,
                a.attempt.points_earned,
                a.attempt.total_questions
            ));
        }

        md
    }
}
