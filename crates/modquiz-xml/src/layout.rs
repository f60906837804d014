//! Export directory layout.
//!
//! ```text
//! <dir>/course.xml
//! <dir>/module-<n>/module.xml
//! <dir>/module-<n>/lesson.xml            (optional)
//! <dir>/module-<n>/question-<NNN>.xml
//! ```

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use modquiz_core::{CourseError, CourseResult};

pub const COURSE_FILE: &str = "course.xml";
pub const MODULE_FILE: &str = "module.xml";
pub const LESSON_FILE: &str = "lesson.xml";

const MODULE_DIR_PREFIX: &str = "module-";
const QUESTION_FILE_PREFIX: &str = "question-";
const XML_EXTENSION: &str = ".xml";

/// Directory name of the `n`th exported module (1-based).
pub fn module_dir_name(n: usize) -> String {
    format!("{MODULE_DIR_PREFIX}{n}")
}

/// File name of the `n`th exported question (1-based, zero-padded to 3).
pub fn question_file_name(n: usize) -> String {
    format!("{QUESTION_FILE_PREFIX}{n:03}{XML_EXTENSION}")
}

pub fn is_module_dir_name(name: &str) -> bool {
    name.starts_with(MODULE_DIR_PREFIX)
}

pub fn is_question_file_name(name: &str) -> bool {
    name.starts_with(QUESTION_FILE_PREFIX) && name.ends_with(XML_EXTENSION)
}

/// Module directories under `dir`, in natural order.
pub fn module_dirs(dir: &Path) -> CourseResult<Vec<PathBuf>> {
    list_sorted(dir, |name, is_dir| is_dir && is_module_dir_name(name))
}

/// Question documents under a module directory, in natural order.
pub fn question_files(dir: &Path) -> CourseResult<Vec<PathBuf>> {
    list_sorted(dir, |name, is_dir| !is_dir && is_question_file_name(name))
}

fn list_sorted<F>(dir: &Path, keep: F) -> CourseResult<Vec<PathBuf>>
where
    F: Fn(&str, bool) -> bool,
{
    let entries = std::fs::read_dir(dir).map_err(|e| CourseError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CourseError::io(dir, e))?;
        let is_dir = entry.path().is_dir();
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if keep(&name, is_dir) {
            names.push(name);
        }
    }

    names.sort_by(|a, b| natural_cmp(a, b));
    Ok(names.into_iter().map(|n| dir.join(n)).collect())
}

/// Compare strings so that embedded numbers order by value:
/// `module-2` < `module-10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);

    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => compare_chunks(x, y),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

fn compare_chunks(x: &str, y: &str) -> Ordering {
    let x_digits = x.starts_with(|c: char| c.is_ascii_digit());
    let y_digits = y.starts_with(|c: char| c.is_ascii_digit());

    if x_digits && y_digits {
        let xs = x.trim_start_matches('0');
        let ys = y.trim_start_matches('0');
        xs.len().cmp(&ys.len()).then_with(|| xs.cmp(ys))
    } else {
        x.cmp(y)
    }
}

/// Splits a string into alternating runs of ASCII digits and non-digits.
struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}
