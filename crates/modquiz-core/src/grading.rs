//! Deterministic grading rules for every question type.
//!
//! Each question is worth at most 1.0 points, so a quiz score is the mean
//! over its questions regardless of the type mix:
//!
//! - True/False:      1.0 if correct, 0.0 otherwise.
//! - Multiple Choice: 1.0 if the selected option is the correct one.
//! - Multiple Select: partial credit, `max(0, c/C - 0.5 * w/W)`.
//! - Fill-in-Blank:   partial credit, correct blanks / total blanks.
//! - Flashcard:       self-graded.
//!
//! None of these functions fail. Degenerate answer keys (no correct option,
//! no blanks) grade as 0.0.

use std::collections::BTreeSet;

use unicode_normalization::UnicodeNormalization;

use crate::model::{Blank, OptionId};

pub fn grade_true_false(answer: bool, correct: bool) -> f64 {
    if answer == correct {
        1.0
    } else {
        0.0
    }
}

/// The caller resolves which option is correct; exactly one is expected.
pub fn grade_multiple_choice(selected: OptionId, correct: OptionId) -> f64 {
    if selected == correct {
        1.0
    } else {
        0.0
    }
}

/// Grade a multiple-select question with partial credit.
///
/// With `C` correct options, `W` wrong options, `c` correct selections and
/// `w` wrong selections:
///
/// ```text
/// score = max(0, c/C - 0.5 * w/W)
/// ```
///
/// The penalty term is dropped when there are no wrong options. A question
/// with no correct option scores 0.0.
pub fn grade_multiple_select(
    selected: &BTreeSet<OptionId>,
    correct: &BTreeSet<OptionId>,
    all: &BTreeSet<OptionId>,
) -> f64 {
    let total_correct = correct.len();
    if total_correct == 0 {
        return 0.0;
    }
    let total_wrong = all.len().saturating_sub(total_correct);

    let correct_selected = selected.intersection(correct).count();
    let wrong_selected = selected.difference(correct).count();

    let mut score = correct_selected as f64 / total_correct as f64;
    if total_wrong > 0 {
        score -= 0.5 * (wrong_selected as f64 / total_wrong as f64);
    }

    round_to(score.max(0.0), 4)
}

/// Grade fill-in-blank answers, one user answer per blank position.
///
/// Missing user answers count as empty strings. Both sides are normalized
/// with [`normalize_answer`] before comparison, and a blank is correct when
/// any of its accepted answers matches.
pub fn grade_fill_blank<S: AsRef<str>>(
    user_answers: &[S],
    accepted: &[Blank],
    case_sensitive: bool,
) -> f64 {
    let total_blanks = accepted.len();
    if total_blanks == 0 {
        return 0.0;
    }

    let correct_blanks = accepted
        .iter()
        .enumerate()
        .filter(|(index, blank)| {
            let raw = user_answers.get(*index).map(AsRef::as_ref).unwrap_or("");
            let given = normalize_answer(raw, case_sensitive);
            blank
                .accepted
                .iter()
                .any(|valid| normalize_answer(valid, case_sensitive) == given)
        })
        .count();

    round_to(correct_blanks as f64 / total_blanks as f64, 4)
}

/// Flashcards are self-graded; the learner's claim is trusted.
pub fn grade_flashcard(self_correct: bool) -> f64 {
    if self_correct {
        1.0
    } else {
        0.0
    }
}

/// Normalize a free-text answer: trim, Unicode NFKC, and lower-case unless
/// the comparison is case-sensitive.
pub fn normalize_answer(value: &str, case_sensitive: bool) -> String {
    let normalized: String = value.trim().nfkc().collect();
    // NFKC can turn compatibility spaces into plain ones at the edges.
    let normalized = normalized.trim();
    if case_sensitive {
        normalized.to_string()
    } else {
        normalized.to_lowercase()
    }
}

/// Round half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[OptionId]) -> BTreeSet<OptionId> {
        values.iter().copied().collect()
    }

    #[test]
    fn true_false_is_binary() {
        for a in [true, false] {
            assert_eq!(grade_true_false(a, a), 1.0);
            assert_eq!(grade_true_false(a, !a), 0.0);
        }
    }

    #[test]
    fn multiple_choice_is_binary() {
        assert_eq!(grade_multiple_choice(3, 3), 1.0);
        assert_eq!(grade_multiple_choice(2, 3), 0.0);
        // Unresolved correct option never matches a real selection.
        assert_eq!(grade_multiple_choice(5, 0), 0.0);
    }

    #[test]
    fn multiple_select_exact_selection() {
        let score = grade_multiple_select(&ids(&[1, 2]), &ids(&[1, 2]), &ids(&[1, 2, 3, 4]));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn multiple_select_penalizes_wrong_picks_at_half_weight() {
        let score = grade_multiple_select(&ids(&[1, 2, 3]), &ids(&[1, 2]), &ids(&[1, 2, 3, 4]));
        assert_eq!(score, 0.75);
    }

    #[test]
    fn multiple_select_floors_at_zero() {
        let score = grade_multiple_select(&ids(&[3, 4]), &ids(&[1]), &ids(&[1, 2, 3, 4]));
        assert_eq!(score, 0.0);

        let score = grade_multiple_select(&ids(&[1, 2, 3, 4]), &ids(&[1]), &ids(&[1, 2, 3, 4]));
        assert_eq!(score, 0.5);
    }

    #[test]
    fn multiple_select_nothing_selected() {
        let score = grade_multiple_select(&ids(&[]), &ids(&[1, 2]), &ids(&[1, 2, 3]));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn multiple_select_without_correct_options_fails_safe() {
        let score = grade_multiple_select(&ids(&[1]), &ids(&[]), &ids(&[1, 2]));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn multiple_select_all_options_correct() {
        let score = grade_multiple_select(&ids(&[1]), &ids(&[1, 2, 3]), &ids(&[1, 2, 3]));
        assert_eq!(score, 0.3333);
    }

    #[test]
    fn fill_blank_case_insensitive() {
        let accepted = vec![Blank::new(["Paris"]), Blank::new(["France"])];
        assert_eq!(grade_fill_blank(&["paris", "France"], &accepted, false), 1.0);
    }

    #[test]
    fn fill_blank_case_sensitive() {
        let accepted = vec![Blank::new(["Paris"]), Blank::new(["France"])];
        assert_eq!(grade_fill_blank(&["paris", "France"], &accepted, true), 0.5);
    }

    #[test]
    fn fill_blank_any_accepted_answer_matches() {
        let accepted = vec![Blank::new(["colour", "color"])];
        assert_eq!(grade_fill_blank(&["  Color "], &accepted, false), 1.0);
    }

    #[test]
    fn fill_blank_missing_answers_are_empty() {
        let accepted = vec![Blank::new(["a"]), Blank::new(["b"]), Blank::new(["c"])];
        assert_eq!(grade_fill_blank(&["a"], &accepted, false), 0.3333);
        let none: [&str; 0] = [];
        assert_eq!(grade_fill_blank(&none, &accepted, false), 0.0);
    }

    #[test]
    fn fill_blank_without_blanks_scores_zero() {
        assert_eq!(grade_fill_blank(&["anything"], &[], false), 0.0);
    }

    #[test]
    fn fill_blank_empty_accepted_set_never_matches() {
        let accepted = vec![Blank::default()];
        assert_eq!(grade_fill_blank(&[""], &accepted, false), 0.0);
    }

    #[test]
    fn fill_blank_uses_compatibility_normalization() {
        // Fullwidth letters and the "fi" ligature fold to their ASCII forms.
        let accepted = vec![Blank::new(["ABC"]), Blank::new(["file"])];
        assert_eq!(grade_fill_blank(&["ＡＢＣ", "\u{FB01}le"], &accepted, true), 1.0);
    }

    #[test]
    fn flashcard_trusts_the_learner() {
        assert_eq!(grade_flashcard(true), 1.0);
        assert_eq!(grade_flashcard(false), 0.0);
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in ["  Hello World ", "ＡＢＣ", "Straße", "\u{3000}café\u{3000}", "ǅ"] {
            for case_sensitive in [true, false] {
                let once = normalize_answer(input, case_sensitive);
                assert_eq!(normalize_answer(&once, case_sensitive), once, "{input:?}");
            }
        }
    }

    #[test]
    fn rounding_to_four_places() {
        assert_eq!(round_to(2.0 / 3.0, 4), 0.6667);
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(1.0, 4), 1.0);
    }
}
