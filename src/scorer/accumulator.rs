use crate::bank::{Polarity, Question};
use crate::consts::{CORRECT_DELTA, LIKERT_LABELS, MIN_NORMALIZATION_BOUND, OPTION_KEYS};
use crate::scorer::types::TraitVector;

/// Ordered-scale mapping: A (Strongly Agree) = +2 .. E (Strongly Disagree) = -2.
/// The scale labels themselves are accepted too. Anything else carries no
/// signal.
pub fn likert_delta(label: &str) -> i32 {
    let label = label.trim();
    let position = OPTION_KEYS
        .iter()
        .position(|k| k.eq_ignore_ascii_case(label))
        .or_else(|| {
            LIKERT_LABELS
                .iter()
                .position(|l| l.eq_ignore_ascii_case(label))
        });
    match position {
        Some(i) => 2 - i as i32,
        None => 0,
    }
}

/// Signed delta contributed by one answer to `question`.
pub fn answer_delta(question: &Question, label: &str) -> f64 {
    if let Some(key) = &question.correct {
        return if label.trim().eq_ignore_ascii_case(key.trim()) {
            CORRECT_DELTA
        } else {
            0.0
        };
    }

    let delta = likert_delta(label) as f64;
    match question.polarity {
        Polarity::Positive => delta,
        Polarity::Negative => -delta,
    }
}

/// Returns a new accumulator with `delta * weight` added for every trait the
/// question declares. The input snapshot is left untouched.
pub fn apply_answer(traits: &TraitVector, question: &Question, label: &str) -> TraitVector {
    let delta = answer_delta(question, label);
    let mut updated = *traits;
    for (key, weight) in question.traits.known() {
        updated.set(key, updated.get(key) + delta * weight);
    }
    updated
}

/// Symmetric bound representing the extreme accumulation after `n_answered`
/// answers. Grows with the count, so a settled trait drifts toward 0.5.
#[inline(always)]
pub fn normalization_bound(n_answered: usize, max_abs_weight: f64) -> f64 {
    (n_answered as f64 * max_abs_weight * 2.0).max(MIN_NORMALIZATION_BOUND)
}

/// Maps the raw accumulator into [0, 1].
pub fn normalize(raw: &TraitVector, n_answered: usize, max_abs_weight: f64) -> TraitVector {
    let bound = normalization_bound(n_answered, max_abs_weight);
    raw.map(|v| {
        let scaled = (v + bound) / (2.0 * bound);
        // NaN (from a NaN raw value) collapses to neutral instead of leaking out.
        if scaled.is_nan() {
            0.5
        } else {
            scaled.clamp(0.0, 1.0)
        }
    })
}
