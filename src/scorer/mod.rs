pub mod accumulator;
pub mod distribution;
pub mod engine;
pub mod types;

pub use self::engine::Scorable;
pub use self::types::{TraitKey, TraitTier, TraitVector, TraitWeights};

use serde::{Deserialize, Serialize};

/// Parameters of the activation/distribution pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub sharpness: f64,
    pub temperature: f64,
}

impl ScoringProfile {
    /// Used by the three-stage drill-down.
    pub const STAGED: Self = Self {
        sharpness: 10.0,
        temperature: 4.0,
    };

    /// Used by the flat career-cluster scorer.
    pub const CLUSTER: Self = Self {
        sharpness: 12.0,
        temperature: 5.0,
    };

    pub fn new(sharpness: f64, temperature: f64) -> Self {
        Self {
            sharpness,
            temperature,
        }
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::STAGED
    }
}

/// One row of a ranked distribution. `index` points back into the candidate
/// slice that was scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub index: usize,
    pub name: String,
    pub activation: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    pub profile: ScoringProfile,
}

impl Scorer {
    pub fn new(profile: ScoringProfile) -> Self {
        Self { profile }
    }

    pub fn score<C: Scorable>(&self, candidates: &[C], traits: &TraitVector) -> Vec<f64> {
        engine::score_candidates(candidates, traits, self.profile.sharpness)
    }

    pub fn distribute(&self, activations: &[f64]) -> Vec<f64> {
        distribution::distribute(activations, self.profile.temperature)
    }

    /// Full forward pass: activations, percentages, then a stable descending
    /// ranking. Order is decided on the unrounded shares, so cent rounding
    /// never reorders candidates and ties keep insertion order.
    pub fn rank<C: Scorable>(&self, candidates: &[C], traits: &TraitVector) -> Vec<RankedEntry> {
        let activations = self.score(candidates, traits);
        let shares = distribution::shares(&activations, self.profile.temperature);
        let percents = distribution::round_to_hundred(&shares);
        distribution::rank_order(&shares)
            .into_iter()
            .map(|i| RankedEntry {
                index: i,
                name: candidates[i].name().to_string(),
                activation: activations[i],
                percent: percents[i],
            })
            .collect()
    }
}
