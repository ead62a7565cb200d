pub mod loader;
pub mod selector;

pub use self::loader::QuestionBank;
pub use self::selector::{informativeness, select};

use crate::consts::{LIKERT_LABELS, OPTION_KEYS};
use crate::scorer::types::TraitWeights;
use serde::{Deserialize, Serialize};

/// Direction an item's Likert answer pushes its traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    #[default]
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub traits: TraitWeights,
    /// Custom option labels, shown as A, B, C... in order. Absent or empty
    /// means the five-point agreement scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Correctness key for objective items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<String>,
    #[serde(default)]
    pub polarity: Polarity,
}

impl Question {
    /// `(key, label)` pairs offered for this question. At most five.
    pub fn option_labels(&self) -> Vec<(&'static str, &str)> {
        match &self.options {
            Some(opts) if !opts.is_empty() => OPTION_KEYS
                .iter()
                .zip(opts.iter())
                .map(|(k, l)| (*k, l.as_str()))
                .collect(),
            _ => OPTION_KEYS
                .iter()
                .zip(LIKERT_LABELS.iter())
                .map(|(k, l)| (*k, *l))
                .collect(),
        }
    }

    pub fn valid_keys(&self) -> Vec<&'static str> {
        self.option_labels().into_iter().map(|(k, _)| k).collect()
    }

    pub fn accepts(&self, label: &str) -> bool {
        let label = label.trim();
        self.valid_keys()
            .iter()
            .any(|k| k.eq_ignore_ascii_case(label))
    }

    pub fn is_objective(&self) -> bool {
        self.correct.is_some()
    }
}
