use super::{Narrative, NarrativeRequest};
use crate::scorer::TraitKey;
use itertools::Itertools;
use std::cmp::Ordering;

pub const FALLBACK_SOURCE: &str = "fallback (Ollama unavailable)";

/// Locally written narrative. Depends only on the request, so the same
/// session always gets the same text.
pub fn substitute(request: &NarrativeRequest) -> Narrative {
    let (field, _) = request.level(0);
    let (sub, _) = request.level(1);
    let (spec, _) = request.level(2);

    let strongest = request
        .traits
        .iter()
        .sorted_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
        .take(2)
        .map(|(k, _)| k.label().to_lowercase())
        .collect::<Vec<_>>();
    let signal = match strongest.as_slice() {
        [a, b] => format!("{} and {}", a, b),
        [a] => a.clone(),
        _ => TraitKey::Investigative.label().to_lowercase(),
    };

    Narrative {
        narrative: format!(
            "Your answers line up most closely with {spec} in {sub} ({field}). \
             Your strongest signals were {signal}, which points toward analytical, \
             problem-solving work in this area. Your profile pairs curiosity with a \
             steady, organised approach, and that combination matters in this \
             specialization."
        ),
        why_this_path: format!(
            "Your interest profile, personality dimensions and aptitude items all \
             converge on {spec}. The traits that stood out are the ones this path \
             relies on day to day."
        ),
        strengths: vec![
            "Strong analytical and pattern-recognition capacity".into(),
            "Can stay focused on complex problems for long stretches".into(),
            "Learns out of genuine curiosity".into(),
            "Structured approach to tasks and deliverables".into(),
        ],
        growth_areas: vec![
            "Spend time in neighbouring disciplines to widen your perspective".into(),
            "Practise explaining technical ideas to non-specialists".into(),
            "Look for collaborative work to balance an independent style".into(),
        ],
        key_insight: format!("{spec} suits you; trust the evidence and your own judgement."),
        source: FALLBACK_SOURCE.to_string(),
    }
}
