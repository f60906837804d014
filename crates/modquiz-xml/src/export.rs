//! Course tree → XML directory.

use std::path::{Path, PathBuf};

use quick_xml::escape::escape;

use modquiz_core::model::{by_position, CourseId, QuestionKind};
use modquiz_core::{CourseError, CourseReader, CourseResult, CourseTree, ModuleTree, QuestionTree};

use crate::layout::{module_dir_name, question_file_name, COURSE_FILE, LESSON_FILE, MODULE_FILE};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const INDENT: &str = "  ";

/// Export a stored course into `dir`. Fails with not-found if the course
/// does not exist.
pub fn export_course<R>(reader: &R, course_id: CourseId, dir: &Path) -> CourseResult<()>
where
    R: CourseReader + ?Sized,
{
    let tree = CourseTree::load(reader, course_id)?;
    export_tree(&tree, dir)
}

/// Write a loaded course tree into `dir`, creating directories as needed.
///
/// Modules and questions are written in `(sort_order, id)` order regardless
/// of the order they appear in `tree`. Existing files with the same names are
/// overwritten; nothing else in `dir` is touched.
///
/// Every document is rendered before the first write. Text holding a
/// character XML 1.0 cannot represent fails with [`CourseError::Malformed`]
/// and leaves `dir` untouched.
pub fn export_tree(tree: &CourseTree, dir: &Path) -> CourseResult<()> {
    let documents = render_tree(tree, dir)?;

    for (path, contents) in &documents {
        if let Some(parent) = path.parent() {
            create_dir(parent)?;
        }
        write_document(path, contents)?;
        tracing::debug!("wrote {}", path.display());
    }

    tracing::info!(
        course = tree.course.id,
        modules = tree.modules.len(),
        questions = tree.question_count(),
        "exported course to {}",
        dir.display()
    );
    Ok(())
}

/// Render every document of the export, paired with its destination.
fn render_tree(tree: &CourseTree, dir: &Path) -> CourseResult<Vec<(PathBuf, String)>> {
    let mut documents = Vec::new();

    let course_path = dir.join(COURSE_FILE);
    let contents = course_xml(tree).finish(&course_path)?;
    documents.push((course_path, contents));

    let mut modules: Vec<&ModuleTree> = tree.modules.iter().collect();
    modules.sort_by(|a, b| {
        by_position(
            (a.module.sort_order, a.module.id),
            (b.module.sort_order, b.module.id),
        )
    });

    for (index, module) in modules.into_iter().enumerate() {
        let module_dir = dir.join(module_dir_name(index + 1));
        render_module(module, &module_dir, &mut documents)?;
    }

    Ok(documents)
}

fn render_module(
    module: &ModuleTree,
    dir: &Path,
    documents: &mut Vec<(PathBuf, String)>,
) -> CourseResult<()> {
    let module_path = dir.join(MODULE_FILE);
    let contents = module_xml(module).finish(&module_path)?;
    documents.push((module_path, contents));

    if let Some(lesson) = &module.lesson {
        let lesson_path = dir.join(LESSON_FILE);
        let contents = lesson_xml(&lesson.content).finish(&lesson_path)?;
        documents.push((lesson_path, contents));
    }

    let mut questions: Vec<&QuestionTree> = module.questions.iter().collect();
    questions.sort_by(|a, b| {
        by_position(
            (a.question.sort_order, a.question.id),
            (b.question.sort_order, b.question.id),
        )
    });

    for (index, question) in questions.into_iter().enumerate() {
        let path = dir.join(question_file_name(index + 1));
        let contents = question_xml(question).finish(&path)?;
        documents.push((path, contents));
    }

    Ok(())
}

fn course_xml(tree: &CourseTree) -> XmlDoc {
    let mut doc = XmlDoc::new();
    doc.open("course", &[]);
    doc.leaf("title", &tree.course.title);
    doc.leaf("description", &tree.course.description);
    doc.close("course");
    doc
}

fn module_xml(module: &ModuleTree) -> XmlDoc {
    let mut doc = XmlDoc::new();
    doc.open("module", &[]);
    doc.leaf("title", &module.module.title);
    doc.leaf("sort_order", &module.module.sort_order.to_string());
    doc.close("module");
    doc
}

fn lesson_xml(content: &str) -> XmlDoc {
    let mut doc = XmlDoc::new();
    doc.open("lesson", &[]);
    doc.cdata_leaf("content", content);
    doc.close("lesson");
    doc
}

fn question_xml(tree: &QuestionTree) -> XmlDoc {
    let question = &tree.question;
    let kind = question.kind.question_type();

    let mut doc = XmlDoc::new();
    doc.open("question", &[("type", kind.as_str())]);
    doc.leaf("prompt", &question.prompt);
    doc.leaf("sort_order", &question.sort_order.to_string());

    match &question.kind {
        QuestionKind::TrueFalse { correct } => {
            doc.leaf("correct_answer", bool_text(*correct));
        }
        QuestionKind::MultipleChoice | QuestionKind::MultipleSelect => {
            doc.open("options", &[]);
            for option in &tree.options {
                doc.leaf_with_attrs(
                    "option",
                    &[("correct", bool_text(option.is_correct))],
                    &option.text,
                );
            }
            doc.close("options");
        }
        QuestionKind::FillBlank {
            blanks,
            case_sensitive,
        } => {
            doc.leaf("is_case_sensitive", bool_text(*case_sensitive));
            doc.open("blanks", &[]);
            for blank in blanks {
                doc.open("blank", &[]);
                for answer in &blank.accepted {
                    doc.leaf("answer", answer);
                }
                doc.close("blank");
            }
            doc.close("blanks");
        }
        QuestionKind::Flashcard { answer } => {
            doc.leaf("answer", answer);
        }
    }

    if let Some(text) = non_empty(&question.feedback_correct) {
        doc.leaf("feedback_correct", text);
    }
    if let Some(text) = non_empty(&question.feedback_incorrect) {
        doc.leaf("feedback_incorrect", text);
    }

    doc.close("question");
    doc
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Whether `c` is a legal XML 1.0 character.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Escape element or attribute text. A carriage return is written as a
/// character reference so parsers do not fold it into a line feed.
fn escape_text(text: &str) -> String {
    escape(text).replace('\r', "&#13;")
}

/// Minimal indented XML writer. Element text and attribute values are
/// escaped; tag names are trusted. The first text holding a character XML
/// cannot carry is remembered and reported by [`XmlDoc::finish`].
struct XmlDoc {
    buf: String,
    depth: usize,
    invalid: Option<(String, char)>,
}

impl XmlDoc {
    fn new() -> Self {
        Self {
            buf: String::from(XML_DECLARATION),
            depth: 0,
            invalid: None,
        }
    }

    fn check(&mut self, tag: &str, text: &str) {
        if self.invalid.is_some() {
            return;
        }
        if let Some(c) = text.chars().find(|c| !is_xml_char(*c)) {
            self.invalid = Some((tag.to_string(), c));
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
    }

    fn start_tag(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.check(tag, value);
            self.buf.push_str(&format!(" {name}=\"{}\"", escape_text(value)));
        }
        self.buf.push('>');
    }

    fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.start_tag(tag, attrs);
        self.buf.push('\n');
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.buf.push_str(&format!("</{tag}>\n"));
    }

    fn leaf(&mut self, tag: &str, text: &str) {
        self.leaf_with_attrs(tag, &[], text);
    }

    fn leaf_with_attrs(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) {
        self.check(tag, text);
        self.indent();
        self.start_tag(tag, attrs);
        self.buf.push_str(&escape_text(text));
        self.buf.push_str(&format!("</{tag}>\n"));
    }

    /// Element whose text is written verbatim inside CDATA. A literal `]]>`
    /// is split across two sections, and each carriage return sits between
    /// sections as `&#13;`.
    fn cdata_leaf(&mut self, tag: &str, text: &str) {
        self.check(tag, text);
        self.indent();
        self.start_tag(tag, &[]);
        for (i, part) in text.split('\r').enumerate() {
            if i > 0 {
                self.buf.push_str("&#13;");
            }
            self.buf.push_str("<![CDATA[");
            self.buf.push_str(&part.replace("]]>", "]]]]><![CDATA[>"));
            self.buf.push_str("]]>");
        }
        self.buf.push_str(&format!("</{tag}>\n"));
    }

    /// The finished document, or `Malformed` naming `path` and the element
    /// whose text cannot be written.
    fn finish(self, path: &Path) -> CourseResult<String> {
        match self.invalid {
            Some((tag, c)) => Err(CourseError::malformed(
                path,
                format!(
                    "<{tag}> contains U+{:04X}, which XML 1.0 does not allow",
                    c as u32
                ),
            )),
            None => Ok(self.buf),
        }
    }
}

fn create_dir(dir: &Path) -> CourseResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| CourseError::io(dir, e))
}

fn write_document(path: &Path, contents: &str) -> CourseResult<()> {
    std::fs::write(path, contents).map_err(|e| CourseError::io(path, e))
}
