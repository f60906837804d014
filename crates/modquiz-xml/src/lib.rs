//! Export and import of course trees as a directory of XML documents.
//!
//! One `course.xml` at the top, one `module-<n>/` directory per module with a
//! `module.xml`, an optional `lesson.xml`, and one `question-<NNN>.xml` per
//! question. Importing an export reproduces the course with fresh ids.

pub mod export;
pub mod import;
pub mod layout;

pub use export::{export_course, export_tree};
pub use import::{import_course, read_course_dir};
