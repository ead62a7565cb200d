use super::Question;
use crate::consts::NEUTRAL_TRAIT;
use crate::scorer::types::TraitVector;
use fnv::FnvHashSet;
use std::cmp::Ordering;
use tracing::debug;

/// How much asking `question` could still move the profile: traits sitting
/// at 0.5 are maximally uncertain, traits at either extreme are settled.
pub fn informativeness(question: &Question, traits: &TraitVector) -> f64 {
    question
        .traits
        .iter()
        .map(|(code, w)| {
            let t = traits.lookup(code).unwrap_or(NEUTRAL_TRAIT);
            (1.0 - 2.0 * (t - 0.5).abs()) * w
        })
        .sum()
}

/// Picks up to `n` unused questions from `pool`.
///
/// Without a trait snapshot this is a uniform sample. With one, the top `2n`
/// by informativeness are shuffled and the first `n` kept, so near-tied
/// items rotate between sessions.
pub fn select<'a>(
    pool: &'a [Question],
    n: usize,
    used: &FnvHashSet<String>,
    traits: Option<&TraitVector>,
    rng: &mut fastrand::Rng,
) -> Vec<&'a Question> {
    let mut available: Vec<&Question> = pool.iter().filter(|q| !used.contains(&q.id)).collect();

    if n == 0 || available.is_empty() {
        return Vec::new();
    }

    match traits {
        None => {
            rng.shuffle(&mut available);
        }
        Some(t) => {
            let mut scored: Vec<(f64, &Question)> = available
                .into_iter()
                .map(|q| (informativeness(q, t), q))
                .collect();
            scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
            scored.truncate(n.saturating_mul(2));
            available = scored.into_iter().map(|(_, q)| q).collect();
            rng.shuffle(&mut available);
        }
    }

    available.truncate(n);
    debug!(
        "Selected {} of {} questions ({} used)",
        available.len(),
        pool.len(),
        used.len()
    );
    available
}
