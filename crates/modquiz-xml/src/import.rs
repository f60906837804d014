//! XML directory → course tree.
//!
//! Import runs in two phases. [`read_course_dir`] parses every document into
//! a [`CourseDraft`] without touching the store, then [`import_course`] hands
//! the draft to [`persist_draft`]. A malformed directory is therefore
//! rejected before anything is written.

use std::path::Path;

use roxmltree::{Document, Node};

use modquiz_core::model::{
    Blank, CourseDraft, CourseId, ModuleDraft, OptionDraft, QuestionDraft, QuestionKind,
    QuestionType,
};
use modquiz_core::{persist_draft, CourseError, CourseResult, CourseWriter};

use crate::layout::{module_dirs, question_files, COURSE_FILE, LESSON_FILE, MODULE_FILE};

/// Import the course exported under `dir`, creating fresh records through
/// `writer`. Returns the new course id.
pub fn import_course<W>(writer: &mut W, dir: &Path) -> CourseResult<CourseId>
where
    W: CourseWriter + ?Sized,
{
    let draft = read_course_dir(dir)?;
    let course_id = persist_draft(writer, &draft)?;

    tracing::info!(
        course = course_id,
        modules = draft.modules.len(),
        "imported course from {}",
        dir.display()
    );
    Ok(course_id)
}

/// Parse an export directory into a draft.
pub fn read_course_dir(dir: &Path) -> CourseResult<CourseDraft> {
    let course_path = dir.join(COURSE_FILE);
    let source = read_required(&course_path)?;
    let doc = parse(&course_path, &source, "course")?;
    let root = doc.root_element();

    let modules = module_dirs(dir)?
        .iter()
        .map(|module_dir| read_module_dir(module_dir))
        .collect::<CourseResult<Vec<_>>>()?;

    Ok(CourseDraft {
        title: scalar(root, "title"),
        description: scalar(root, "description"),
        modules,
    })
}

fn read_module_dir(dir: &Path) -> CourseResult<ModuleDraft> {
    let module_path = dir.join(MODULE_FILE);
    let source = read_required(&module_path)?;
    let doc = parse(&module_path, &source, "module")?;
    let root = doc.root_element();

    let lesson_path = dir.join(LESSON_FILE);
    let lesson = if lesson_path.is_file() {
        let source = read_file(&lesson_path)?;
        let doc = parse(&lesson_path, &source, "lesson")?;
        let content = first_element(doc.root_element(), "content")
            .map(text_content)
            .unwrap_or_default();
        Some(content)
    } else {
        None
    };

    let questions = question_files(dir)?
        .iter()
        .map(|path| read_question(path))
        .collect::<CourseResult<Vec<_>>>()?;

    tracing::debug!(
        questions = questions.len(),
        has_lesson = lesson.is_some(),
        "read module from {}",
        dir.display()
    );

    Ok(ModuleDraft {
        title: scalar(root, "title"),
        sort_order: sort_order(root),
        lesson,
        questions,
    })
}

fn read_question(path: &Path) -> CourseResult<QuestionDraft> {
    let source = read_file(path)?;
    let doc = parse(path, &source, "question")?;
    let root = doc.root_element();

    let question_type: QuestionType = root
        .attribute("type")
        .ok_or_else(|| CourseError::malformed(path, "question has no type attribute"))?
        .parse()
        .map_err(|reason: String| CourseError::malformed(path, reason))?;

    let kind = match question_type {
        QuestionType::TrueFalse => QuestionKind::TrueFalse {
            correct: scalar(root, "correct_answer") == "true",
        },
        QuestionType::MultipleChoice => QuestionKind::MultipleChoice,
        QuestionType::MultipleSelect => QuestionKind::MultipleSelect,
        QuestionType::FillBlank => QuestionKind::FillBlank {
            blanks: elements(root, "blank")
                .map(|blank| Blank::new(elements(blank, "answer").map(text_content)))
                .collect(),
            case_sensitive: scalar(root, "is_case_sensitive") == "true",
        },
        QuestionType::Flashcard => QuestionKind::Flashcard {
            answer: scalar(root, "answer"),
        },
    };

    let options = if question_type.has_options() {
        elements(root, "option")
            .map(|option| {
                OptionDraft::new(text_content(option), option.attribute("correct") == Some("true"))
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(QuestionDraft {
        prompt: scalar(root, "prompt"),
        sort_order: sort_order(root),
        feedback_correct: optional_scalar(root, "feedback_correct"),
        feedback_incorrect: optional_scalar(root, "feedback_incorrect"),
        kind,
        options,
    })
}

fn read_required(path: &Path) -> CourseResult<String> {
    if !path.is_file() {
        return Err(CourseError::MissingFile(path.to_path_buf()));
    }
    read_file(path)
}

fn read_file(path: &Path) -> CourseResult<String> {
    std::fs::read_to_string(path).map_err(|e| CourseError::io(path, e))
}

/// Parse `source` and check that its root element is `<root_tag>`.
fn parse<'a>(path: &Path, source: &'a str, root_tag: &str) -> CourseResult<Document<'a>> {
    let doc = Document::parse(source).map_err(|e| CourseError::malformed(path, e.to_string()))?;

    let found = doc.root_element().tag_name().name();
    if found != root_tag {
        return Err(CourseError::malformed(
            path,
            format!("expected <{root_tag}> root element, found <{found}>"),
        ));
    }
    Ok(doc)
}

/// Element descendants of `node` (including itself) named `tag`, in
/// document order.
fn elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants()
        .filter(move |n| n.is_element() && n.has_tag_name(tag))
}

fn first_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .find(|n| n.is_element() && n.has_tag_name(tag))
}

/// All text below `node`, CDATA included, concatenated verbatim.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Trimmed text of the first `tag` element, or "" when absent.
fn scalar(root: Node<'_, '_>, tag: &str) -> String {
    first_element(root, tag)
        .map(|n| text_content(n).trim().to_string())
        .unwrap_or_default()
}

fn optional_scalar(root: Node<'_, '_>, tag: &str) -> Option<String> {
    Some(scalar(root, tag)).filter(|s| !s.is_empty())
}

fn sort_order(root: Node<'_, '_>) -> i32 {
    scalar(root, "sort_order").parse().unwrap_or(0)
}
