//! Course error types.
//!
//! Structural failures (missing records, missing files, malformed documents,
//! I/O) always propagate to the caller. Grading never produces one of these.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Kind of record a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Course,
    Module,
    Question,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Course => write!(f, "course"),
            Entity::Module => write!(f, "module"),
            Entity::Question => write!(f, "question"),
        }
    }
}

/// Errors raised by the codec and by store implementations.
#[derive(Debug, Error)]
pub enum CourseError {
    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: i64 },

    /// A required file or directory does not exist.
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// A document lacks a required root or field, or carries an invalid value.
    #[error("malformed document {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    /// A directory or file could not be created, read, or written.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing store rejected an operation.
    #[error("store error: {0}")]
    Store(String),
}

impl CourseError {
    pub fn not_found(entity: Entity, id: i64) -> Self {
        CourseError::NotFound { entity, id }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        CourseError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CourseError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for the not-found class (missing record or file).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CourseError::NotFound { .. } | CourseError::MissingFile(_)
        )
    }

    /// Returns `true` for the malformed-input class.
    pub fn is_malformed(&self) -> bool {
        matches!(self, CourseError::Malformed { .. })
    }
}

pub type CourseResult<T> = std::result::Result<T, CourseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(CourseError::not_found(Entity::Course, 4).is_not_found());
        assert!(CourseError::MissingFile("x/course.xml".into()).is_not_found());
        assert!(CourseError::malformed("q.xml", "no root element").is_malformed());
        assert!(!CourseError::Store("locked".into()).is_not_found());
    }

    #[test]
    fn messages_name_the_offender() {
        let e = CourseError::not_found(Entity::Module, 12);
        assert_eq!(e.to_string(), "module not found: 12");

        let e = CourseError::malformed("export/module-1/question-001.xml", "no root element");
        assert!(e.to_string().contains("question-001.xml"));
    }
}
