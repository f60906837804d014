//! Export/import tests against an in-memory store.

use std::fs;
use std::path::Path;

use modquiz_core::model::{Blank, CourseId, QuestionDraft, QuestionKind};
use modquiz_core::{CourseReader, CourseTree, CourseWriter};
use modquiz_store::MemoryStore;
use modquiz_xml::{export_course, import_course, read_course_dir};
use tempfile::TempDir;

fn question(prompt: &str, sort_order: i32, kind: QuestionKind) -> QuestionDraft {
    QuestionDraft {
        prompt: prompt.to_string(),
        sort_order,
        feedback_correct: None,
        feedback_incorrect: None,
        kind,
        options: Vec::new(),
    }
}

/// A course covering every question type, created out of display order.
fn sample_course(store: &mut MemoryStore) -> CourseId {
    let course = store
        .create_course("Geography & <Maps>", "An \"intro\" course")
        .unwrap();

    let later = store.create_module(course, "Rivers", 2).unwrap();
    let first = store.create_module(course, "Capitals", 1).unwrap();

    store
        .save_lesson(first, "<h1>Capitals</h1>\n<p>Paris &amp; Rome]]> done</p>")
        .unwrap();

    let mut select = question("Which are in Europe?", 3, QuestionKind::MultipleSelect);
    select.feedback_correct = Some("Well done".into());
    let select = store.create_question(first, &select).unwrap();
    store.add_option(select, "France", true, 0).unwrap();
    store.add_option(select, "Japan", false, 1).unwrap();
    store.add_option(select, "Italy", true, 2).unwrap();

    let mut blanks = question(
        "The capital of ___ is ___.",
        1,
        QuestionKind::FillBlank {
            blanks: vec![Blank::new(["France"]), Blank::new(["Paris", "paris "])],
            case_sensitive: false,
        },
    );
    blanks.feedback_incorrect = Some("Try again".into());
    store.create_question(first, &blanks).unwrap();

    store
        .create_question(first, &question("Rome is in Italy.", 2, QuestionKind::TrueFalse { correct: true }))
        .unwrap();

    let choice = store
        .create_question(later, &question("Longest river?", 1, QuestionKind::MultipleChoice))
        .unwrap();
    store.add_option(choice, "Nile", true, 0).unwrap();
    store.add_option(choice, "Thames", false, 1).unwrap();

    store
        .create_question(
            later,
            &question(
                "Define delta",
                2,
                QuestionKind::Flashcard {
                    answer: "Landform at a river mouth".into(),
                },
            ),
        )
        .unwrap();

    course
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn import_of_export_reproduces_course() {
    let mut store = MemoryStore::new();
    let course = sample_course(&mut store);
    let dir = TempDir::new().unwrap();

    export_course(&store, course, dir.path()).unwrap();
    let imported = import_course(&mut store, dir.path()).unwrap();

    assert_ne!(imported, course);
    let original = CourseTree::load(&store, course).unwrap();
    let copy = CourseTree::load(&store, imported).unwrap();
    assert_eq!(copy.to_draft(), original.to_draft());
    assert_eq!(copy.question_count(), 5);
}

#[test]
fn export_layout_follows_position_not_insertion_order() {
    let mut store = MemoryStore::new();
    let course = sample_course(&mut store);
    let dir = TempDir::new().unwrap();

    export_course(&store, course, dir.path()).unwrap();

    let course_xml = read(&dir.path().join("course.xml"));
    assert!(course_xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(course_xml.contains("<title>Geography &amp; &lt;Maps&gt;</title>"));

    // "Capitals" has sort_order 1 but was created second.
    assert!(read(&dir.path().join("module-1/module.xml")).contains("<title>Capitals</title>"));
    assert!(read(&dir.path().join("module-2/module.xml")).contains("<title>Rivers</title>"));
    assert!(dir.path().join("module-1/lesson.xml").is_file());
    assert!(!dir.path().join("module-2/lesson.xml").exists());

    let module = dir.path().join("module-1");
    assert!(read(&module.join("question-001.xml")).contains("type=\"fill_blank\""));
    assert!(read(&module.join("question-002.xml")).contains("type=\"true_false\""));
    assert!(read(&module.join("question-003.xml")).contains("type=\"multiple_select\""));
    assert!(!module.join("question-004.xml").exists());
}

#[test]
fn exporting_missing_course_is_not_found() {
    let store = MemoryStore::new();
    let dir = TempDir::new().unwrap();

    let err = export_course(&store, 42, &dir.path().join("out")).unwrap_err();
    assert!(err.is_not_found());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn importing_without_course_xml_is_not_found() {
    let mut store = MemoryStore::new();
    let dir = TempDir::new().unwrap();

    let err = import_course(&mut store, dir.path()).unwrap_err();
    assert!(err.is_not_found());
    assert!(store.list_courses().is_empty());
}

#[test]
fn empty_question_document_aborts_before_writing() {
    let mut store = MemoryStore::new();
    let course = sample_course(&mut store);
    let dir = TempDir::new().unwrap();
    export_course(&store, course, dir.path()).unwrap();

    let broken = dir.path().join("module-2/question-002.xml");
    fs::write(&broken, "").unwrap();

    let err = import_course(&mut store, dir.path()).unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("question-002.xml"));
    assert_eq!(store.list_courses().len(), 1);
}

#[test]
fn select_and_fill_blank_survive_round_trip() {
    let mut store = MemoryStore::new();
    let course = sample_course(&mut store);
    let dir = TempDir::new().unwrap();
    export_course(&store, course, dir.path()).unwrap();

    let imported = import_course(&mut store, dir.path()).unwrap();
    let module = &store.modules(imported).unwrap()[0];
    let questions = store.questions(module.id).unwrap();

    let select = questions
        .iter()
        .find(|q| q.kind == QuestionKind::MultipleSelect)
        .unwrap();
    assert_eq!(select.feedback_correct.as_deref(), Some("Well done"));
    let options = store.options(select.id).unwrap();
    let summary: Vec<(&str, bool, i32)> = options
        .iter()
        .map(|o| (o.text.as_str(), o.is_correct, o.sort_order))
        .collect();
    assert_eq!(
        summary,
        vec![("France", true, 0), ("Japan", false, 1), ("Italy", true, 2)]
    );

    let blanks = questions
        .iter()
        .find(|q| matches!(q.kind, QuestionKind::FillBlank { .. }))
        .unwrap();
    assert_eq!(
        blanks.kind,
        QuestionKind::FillBlank {
            blanks: vec![Blank::new(["France"]), Blank::new(["Paris", "paris "])],
            case_sensitive: false,
        }
    );
    assert_eq!(blanks.feedback_correct, None);
    assert_eq!(blanks.feedback_incorrect.as_deref(), Some("Try again"));
}

#[test]
fn lesson_markup_survives_verbatim() {
    let mut store = MemoryStore::new();
    let course = sample_course(&mut store);
    let dir = TempDir::new().unwrap();
    export_course(&store, course, dir.path()).unwrap();

    let draft = read_course_dir(dir.path()).unwrap();
    assert_eq!(
        draft.modules[0].lesson.as_deref(),
        Some("<h1>Capitals</h1>\n<p>Paris &amp; Rome]]> done</p>")
    );
    assert_eq!(draft.modules[1].lesson, None);
}

#[test]
fn module_directories_sort_naturally() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("course.xml"),
        "<course><title>Many</title><description/></course>",
    )
    .unwrap();
    for n in [10, 2, 1] {
        let module = dir.path().join(format!("module-{n}"));
        fs::create_dir(&module).unwrap();
        fs::write(
            module.join("module.xml"),
            format!("<module><title>Module {n}</title><sort_order>{n}</sort_order></module>"),
        )
        .unwrap();
    }
    fs::create_dir(dir.path().join("assets")).unwrap();

    let draft = read_course_dir(dir.path()).unwrap();
    let titles: Vec<&str> = draft.modules.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Module 1", "Module 2", "Module 10"]);
    assert_eq!(draft.description, "");
}

#[test]
fn module_directory_without_module_xml_is_not_found() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("course.xml"), "<course><title>T</title></course>").unwrap();
    fs::create_dir(dir.path().join("module-1")).unwrap();

    let err = read_course_dir(dir.path()).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("module.xml"));
}

#[test]
fn crlf_line_endings_survive_round_trip() {
    let mut store = MemoryStore::new();
    let course = store.create_course("Line endings", "").unwrap();
    let module = store.create_module(course, "Browser input", 1).unwrap();
    store
        .save_lesson(module, "<p>a</p>\r\n<p>b</p>\r\n\r")
        .unwrap();
    let question = store
        .create_question(module, &question("Pick", 1, QuestionKind::MultipleChoice))
        .unwrap();
    store.add_option(question, "first\r\nline", true, 0).unwrap();
    store.add_option(question, "other", false, 1).unwrap();

    let dir = TempDir::new().unwrap();
    export_course(&store, course, dir.path()).unwrap();
    let imported = import_course(&mut store, dir.path()).unwrap();

    let module_id = store.modules(imported).unwrap()[0].id;
    let lesson = store.lesson(module_id).unwrap().unwrap();
    assert_eq!(lesson.content, "<p>a</p>\r\n<p>b</p>\r\n\r");

    let question_id = store.questions(module_id).unwrap()[0].id;
    assert_eq!(store.options(question_id).unwrap()[0].text, "first\r\nline");
}

#[test]
fn control_character_fails_export_before_writing() {
    let mut store = MemoryStore::new();
    let course = store.create_course("Controls", "").unwrap();
    let module = store.create_module(course, "Only", 1).unwrap();
    store
        .create_question(
            module,
            &question("Tab\u{0c}feed", 1, QuestionKind::TrueFalse { correct: false }),
        )
        .unwrap();

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let err = export_course(&store, course, &out).unwrap_err();

    assert!(err.is_malformed());
    assert!(err.to_string().contains("question-001.xml"));
    assert!(err.to_string().contains("<prompt>"));
    assert!(!out.exists());
}
