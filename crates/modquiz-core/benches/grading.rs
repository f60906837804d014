use std::collections::{BTreeSet, HashMap};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use modquiz_core::grading::{grade_fill_blank, grade_multiple_select, normalize_answer};
use modquiz_core::model::{Blank, Question, QuestionKind, QuestionOption};
use modquiz_core::quiz::{grade_quiz, Answer};
use modquiz_core::QuestionTree;

fn make_select_question(id: i64, options: i64) -> QuestionTree {
    QuestionTree {
        question: Question {
            id,
            module_id: 1,
            prompt: "Select all primes".into(),
            sort_order: id as i32,
            feedback_correct: None,
            feedback_incorrect: None,
            kind: QuestionKind::MultipleSelect,
        },
        options: (0..options)
            .map(|o| QuestionOption {
                id: id * 100 + o,
                question_id: id,
                text: format!("option {o}"),
                is_correct: o % 2 == 0,
                sort_order: o as i32,
            })
            .collect(),
    }
}

fn bench_multiple_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiple_select");

    for size in [4i64, 16, 64] {
        let all: BTreeSet<i64> = (0..size).collect();
        let correct: BTreeSet<i64> = (0..size).filter(|i| i % 2 == 0).collect();
        let selected: BTreeSet<i64> = (0..size).filter(|i| i % 3 == 0).collect();
        group.bench_function(format!("options={size}"), |b| {
            b.iter(|| {
                grade_multiple_select(black_box(&selected), black_box(&correct), black_box(&all))
            })
        });
    }

    group.finish();
}

fn bench_fill_blank(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_blank");

    let accepted = vec![
        Blank::new(["Paris", "paris, france"]),
        Blank::new(["France", "République française"]),
        Blank::new(["Seine"]),
    ];
    let answers = ["  PARIS ", "république française", "ｓｅｉｎｅ"];

    group.bench_function("case_insensitive", |b| {
        b.iter(|| grade_fill_blank(black_box(&answers), black_box(&accepted), false))
    });

    group.bench_function("normalize_fullwidth", |b| {
        b.iter(|| normalize_answer(black_box("ＦＵＬＬＷＩＤＴＨ ａｎｓｗｅｒ"), false))
    });

    group.finish();
}

fn bench_grade_quiz(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade_quiz");

    let questions: Vec<QuestionTree> = (1..=50).map(|id| make_select_question(id, 6)).collect();
    let answers: HashMap<i64, Answer> = (1..=50)
        .map(|id| (id, Answer::Selection(BTreeSet::from([id * 100, id * 100 + 1]))))
        .collect();

    group.bench_function("50_questions", |b| {
        b.iter(|| grade_quiz(black_box(&questions), black_box(&answers)))
    });

    group.finish();
}

criterion_group!(benches, bench_multiple_select, bench_fill_blank, bench_grade_quiz);
criterion_main!(benches);
