//! Course data model, grading engine, and store traits.
//!
//! This crate defines the typed course records, the deterministic grading
//! rules, quiz scoring, authoring validation, and the traits through which
//! the codec and front ends reach a store.

pub mod error;
pub mod grading;
pub mod model;
pub mod quiz;
pub mod report;
pub mod store;
pub mod tree;
pub mod validate;

pub use error::{CourseError, CourseResult, Entity};
pub use store::{persist_draft, AttemptStore, CourseReader, CourseWriter};
pub use tree::{CourseTree, ModuleTree, QuestionTree};
