/// Answer keys in display order. The first five form the Likert scale.
pub const OPTION_KEYS: [&str; 5] = ["A", "B", "C", "D", "E"];

/// Default labels for a question that does not declare its own options.
pub const LIKERT_LABELS: [&str; 5] = [
    "Strongly Agree",
    "Agree",
    "Neutral",
    "Disagree",
    "Strongly Disagree",
];

/// Delta applied when an objective item is answered with its correctness key.
/// Matches the top of the Likert scale so aptitude items weigh like a
/// "Strongly Agree".
pub const CORRECT_DELTA: f64 = 2.0;

/// Floor for the symmetric normalization bound (avoids 0/0 with no answers).
pub const MIN_NORMALIZATION_BOUND: f64 = 1.0;

/// Value assumed for a trait that carries no signal.
pub const NEUTRAL_TRAIT: f64 = 0.5;

/// Pool key used when no pool or candidate set is mapped for a winner.
pub const DEFAULT_KEY: &str = "_default_";

/// Name of the synthetic result used when the deepest level resolves to nothing.
pub const CORE_PRACTITIONER: &str = "Core Practitioner";
