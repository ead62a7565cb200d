pub mod client;
pub mod fallback;
pub mod prompt;

pub use self::client::{NarrativeClient, OllamaClient};

use crate::config::NarrativeParams;
use crate::error::CpResult;
use crate::scorer::TraitVector;
use crate::session::SessionOutcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Prose explanation attached to a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub narrative: String,
    pub why_this_path: String,
    pub strengths: Vec<String>,
    pub growth_areas: Vec<String>,
    pub key_insight: String,
    /// Which model produced the text, or that the local substitute did.
    pub source: String,
}

/// What the narrative is written about.
#[derive(Debug, Clone)]
pub struct NarrativeRequest {
    /// `(winner, confidence)` per stage, broadest first.
    pub chain: Vec<(String, f64)>,
    pub traits: TraitVector,
}

impl NarrativeRequest {
    pub fn from_outcome(outcome: &SessionOutcome) -> Self {
        let chain = outcome
            .stages
            .iter()
            .filter_map(|s| s.winner())
            .map(|w| (w.name.clone(), w.percent))
            .collect();
        Self {
            chain,
            traits: outcome.traits,
        }
    }

    pub(crate) fn level(&self, i: usize) -> (&str, f64) {
        self.chain
            .get(i)
            .map(|(n, p)| (n.as_str(), *p))
            .unwrap_or(("-", 0.0))
    }
}

/// A model name and the endpoint serving it.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub endpoint: String,
    pub model: String,
}

/// Pulls the first JSON object out of model output. Tries the whole text
/// first, then the span from the first `{` to the last `}`.
pub fn extract_json(raw: &str) -> Option<Value> {
    if let Ok(v @ Value::Object(_)) = serde_json::from_str::<Value>(raw.trim()) {
        return Some(v);
    }
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&raw[start..=end]) {
        Ok(v @ Value::Object(_)) => Some(v),
        _ => None,
    }
}

/// Builds a narrative from a model payload. A payload without a non-empty
/// `narrative` string is rejected; any other missing or mistyped field is
/// taken from `substitute`.
pub fn parse_narrative(raw: &str, substitute: &Narrative, source: &str) -> Option<Narrative> {
    let value = extract_json(raw)?;
    let narrative = value
        .get("narrative")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .to_string();

    let text = |key: &str, default: &str| -> String {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
            .to_string()
    };
    let list = |key: &str, default: &[String]| -> Vec<String> {
        let items: Vec<String> = value
            .get(key)
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(Value::as_str)
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        if items.is_empty() {
            default.to_vec()
        } else {
            items
        }
    };

    Some(Narrative {
        narrative,
        why_this_path: text("why_this_path", &substitute.why_this_path),
        strengths: list("strengths", &substitute.strengths),
        growth_areas: list("growth_areas", &substitute.growth_areas),
        key_insight: text("key_insight", &substitute.key_insight),
        source: source.to_string(),
    })
}

/// Asks the primary target, then the fallback target, then writes the
/// deterministic substitute. Never fails.
pub struct Narrator {
    client: Box<dyn NarrativeClient>,
    primary: Target,
    fallback: Target,
}

impl Narrator {
    pub fn new(client: Box<dyn NarrativeClient>, primary: Target, fallback: Target) -> Self {
        Self {
            client,
            primary,
            fallback,
        }
    }

    pub fn from_params(params: &NarrativeParams) -> CpResult<Self> {
        let client = OllamaClient::new(params)?;
        let primary = Target {
            endpoint: params.narrative_endpoint.clone(),
            model: params.narrative_model.clone(),
        };
        let fallback = Target {
            endpoint: params
                .narrative_fallback_endpoint
                .clone()
                .unwrap_or_else(|| params.narrative_endpoint.clone()),
            model: params.narrative_fallback_model.clone(),
        };
        Ok(Self::new(Box::new(client), primary, fallback))
    }

    pub fn generate(&self, request: &NarrativeRequest) -> Narrative {
        let substitute = fallback::substitute(request);
        let prompt = prompt::build_prompt(request);

        for target in [&self.primary, &self.fallback] {
            match self.attempt(target, &prompt, &substitute) {
                Ok(Some(narrative)) => {
                    info!("Narrative generated by {}", target.model);
                    return narrative;
                }
                Ok(None) => warn!("{} returned no usable narrative", target.model),
                Err(e) => warn!("{} at {} failed: {}", target.model, target.endpoint, e),
            }
        }

        warn!("Narrative service unavailable, using local substitute");
        substitute
    }

    fn attempt(
        &self,
        target: &Target,
        prompt: &str,
        substitute: &Narrative,
    ) -> CpResult<Option<Narrative>> {
        let raw = self.client.complete(&target.endpoint, &target.model, prompt)?;
        let source = format!("{} (ollama)", target.model);
        Ok(parse_narrative(&raw, substitute, &source))
    }
}
