mod common;

use careerpath::config::NarrativeParams;
use careerpath::narrative::fallback::{substitute, FALLBACK_SOURCE};
use careerpath::narrative::prompt::build_prompt;
use careerpath::narrative::{parse_narrative, Narrator, NarrativeRequest, Target};
use careerpath::scorer::{TraitKey, TraitVector};
use common::MockClient;

const GOOD_REPLY: &str = r#"Here is the analysis:
{
  "narrative": "You think in systems.",
  "why_this_path": "Backend work rewards patience.",
  "strengths": ["Debugging", "Focus"],
  "growth_areas": ["Public speaking"],
  "key_insight": "Build things that last."
}"#;

fn request() -> NarrativeRequest {
    NarrativeRequest {
        chain: vec![
            ("Technology".to_string(), 41.5),
            ("Software Engineering".to_string(), 38.2),
            ("Backend Development".to_string(), 52.0),
        ],
        traits: TraitVector::filled(0.5)
            .with(TraitKey::Investigative, 0.81)
            .with(TraitKey::Conscientiousness, 0.74),
    }
}

fn target(endpoint: &str, model: &str) -> Target {
    Target {
        endpoint: endpoint.to_string(),
        model: model.to_string(),
    }
}

#[test]
fn test_substitute_mentions_strongest_traits() {
    let n = substitute(&request());
    assert_eq!(n.source, FALLBACK_SOURCE);
    assert!(n.narrative.contains("Backend Development"));
    assert!(n.narrative.contains("investigative and conscientiousness"));
    assert_eq!(n.strengths.len(), 4);
    assert_eq!(n.growth_areas.len(), 3);
    assert!(!n.key_insight.is_empty());
}

#[test]
fn test_substitute_is_deterministic() {
    assert_eq!(substitute(&request()), substitute(&request()));
}

#[test]
fn test_substitute_survives_empty_chain() {
    let req = NarrativeRequest {
        chain: Vec::new(),
        traits: TraitVector::filled(0.5),
    };
    let n = substitute(&req);
    assert!(!n.narrative.is_empty());
}

#[test]
fn test_parse_fills_missing_fields_from_substitute() {
    let sub = substitute(&request());
    let parsed = parse_narrative(
        r#"{"narrative": "Short one.", "strengths": [], "key_insight": 5}"#,
        &sub,
        "kimi-k2 (ollama)",
    )
    .unwrap();

    assert_eq!(parsed.narrative, "Short one.");
    assert_eq!(parsed.strengths, sub.strengths);
    assert_eq!(parsed.growth_areas, sub.growth_areas);
    assert_eq!(parsed.why_this_path, sub.why_this_path);
    assert_eq!(parsed.key_insight, sub.key_insight);
    assert_eq!(parsed.source, "kimi-k2 (ollama)");
}

#[test]
fn test_parse_rejects_reply_without_narrative() {
    let sub = substitute(&request());
    assert!(parse_narrative("I cannot help with that.", &sub, "m").is_none());
    assert!(parse_narrative(r#"{"strengths": ["x"]}"#, &sub, "m").is_none());
    assert!(parse_narrative(r#"{"narrative": "   "}"#, &sub, "m").is_none());
}

#[test]
fn test_primary_reply_is_used() {
    let client = MockClient::new().reply("kimi-k2", GOOD_REPLY);
    let calls = client.call_log();
    let narrator = Narrator::new(
        Box::new(client),
        target("http://primary", "kimi-k2"),
        target("http://primary", "llama3"),
    );

    let n = narrator.generate(&request());
    assert_eq!(n.source, "kimi-k2 (ollama)");
    assert_eq!(n.strengths, vec!["Debugging", "Focus"]);
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn test_fallback_model_after_primary_failure() {
    let client = MockClient::new().fail("kimi-k2").reply("llama3", GOOD_REPLY);
    let calls = client.call_log();
    let narrator = Narrator::new(
        Box::new(client),
        target("http://primary", "kimi-k2"),
        target("http://backup", "llama3"),
    );

    let n = narrator.generate(&request());
    assert_eq!(n.source, "llama3 (ollama)");
    assert_eq!(
        *calls.borrow(),
        vec![
            ("http://primary".to_string(), "kimi-k2".to_string()),
            ("http://backup".to_string(), "llama3".to_string()),
        ]
    );
}

#[test]
fn test_unparseable_primary_reply_triggers_retry() {
    let client = MockClient::new()
        .reply("kimi-k2", "no json here")
        .reply("llama3", GOOD_REPLY);
    let calls = client.call_log();
    let narrator = Narrator::new(
        Box::new(client),
        target("http://primary", "kimi-k2"),
        target("http://primary", "llama3"),
    );

    assert_eq!(narrator.generate(&request()).source, "llama3 (ollama)");
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn test_both_failing_yields_substitute() {
    let client = MockClient::new().fail("kimi-k2").fail("llama3");
    let narrator = Narrator::new(
        Box::new(client),
        target("http://primary", "kimi-k2"),
        target("http://primary", "llama3"),
    );

    let n = narrator.generate(&request());
    assert_eq!(n, substitute(&request()));
    assert_eq!(n.source, FALLBACK_SOURCE);
}

#[test]
fn test_unreachable_service_yields_substitute() {
    let params = NarrativeParams {
        // Nothing listens on the discard port.
        narrative_endpoint: "http://127.0.0.1:9/api/generate".to_string(),
        narrative_timeout_secs: 2,
        ..NarrativeParams::default()
    };
    let narrator = Narrator::from_params(&params).unwrap();
    let n = narrator.generate(&request());
    assert_eq!(n.source, FALLBACK_SOURCE);
}

#[test]
fn test_prompt_lists_chain_and_traits() {
    let prompt = build_prompt(&request());
    assert!(prompt.contains("Software Engineering (38.2% match)"));
    assert!(prompt.contains("Conscientiousness"));
    assert!(prompt.contains("growth_areas"));
}
