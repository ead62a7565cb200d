use crate::consts::NEUTRAL_TRAIT;
use crate::scorer::types::{TraitVector, TraitWeights};

/// Anything that can be scored against a trait vector.
pub trait Scorable {
    fn name(&self) -> &str;
    fn trait_weights(&self) -> &TraitWeights;
}

/// Weighted sum of a candidate's weights against the trait vector.
/// Traits the vector does not carry count as neutral, not zero.
pub fn dot(weights: &TraitWeights, traits: &TraitVector) -> f64 {
    weights
        .iter()
        .map(|(code, w)| w * traits.lookup(code).unwrap_or(NEUTRAL_TRAIT))
        .sum()
}

/// Steep logistic centred on 0.5.
///
/// When the exponential is not representable the result saturates on the
/// side of the midpoint `x` falls on.
#[inline(always)]
pub fn sigmoid(x: f64, sharpness: f64) -> f64 {
    let e = (-sharpness * (x - 0.5)).exp();
    if e.is_finite() {
        1.0 / (1.0 + e)
    } else if x < 0.5 {
        0.0
    } else {
        1.0
    }
}

/// Forward pass: one activation per candidate, in candidate order.
pub fn score_candidates<C: Scorable>(
    candidates: &[C],
    traits: &TraitVector,
    sharpness: f64,
) -> Vec<f64> {
    candidates
        .iter()
        .map(|c| {
            let x = dot(c.trait_weights(), traits);
            // NaN weights would poison the distribution; treat them as midpoint.
            let x = if x.is_nan() { 0.5 } else { x };
            sigmoid(x, sharpness)
        })
        .collect()
}
