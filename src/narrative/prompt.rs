use super::NarrativeRequest;
use crate::scorer::TraitTier;
use std::fmt::Write;

pub fn build_prompt(request: &NarrativeRequest) -> String {
    let (field, field_pct) = request.level(0);
    let (sub, sub_pct) = request.level(1);
    let (spec, spec_pct) = request.level(2);

    let mut traits = String::new();
    for (key, value) in request.traits.iter() {
        let _ = writeln!(
            traits,
            "  {:<22}: {:.3} ({})",
            key.label(),
            value,
            TraitTier::of(value)
        );
    }

    format!(
        "You are an experienced career counselor with a background in psychometrics.

Someone has just finished a three-stage adaptive career assessment.

RESULTS
  Stage 1  Broad field    : {field} ({field_pct:.1}% match)
  Stage 2  Sub-field      : {sub} ({sub_pct:.1}% match)
  Stage 3  Specialization : {spec} ({spec_pct:.1}% match)

TRAIT PROFILE (0.0 very low, 1.0 very high)
{traits}
Write a personal career analysis. Reply with a single JSON object and nothing
else, using exactly these keys:

{{
  \"narrative\": \"3-4 sentences on why this path fits this person\",
  \"why_this_path\": \"2-3 sentences on the trait combinations behind the result\",
  \"strengths\": [\"four short items\"],
  \"growth_areas\": [\"three short items\"],
  \"key_insight\": \"one sentence\"
}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::{TraitKey, TraitVector};

    #[test]
    fn test_prompt_lists_chain_and_traits() {
        let request = NarrativeRequest {
            chain: vec![
                ("Technology".into(), 41.5),
                ("Software Development".into(), 38.25),
                ("Backend Engineering".into(), 52.0),
            ],
            traits: TraitVector::filled(0.5).with(TraitKey::Investigative, 0.8123),
        };
        let prompt = build_prompt(&request);
        assert!(prompt.contains("Technology (41.5% match)"));
        assert!(prompt.contains("Backend Engineering (52.0% match)"));
        assert!(prompt.contains("0.812 (High)"));
        assert!(prompt.contains("\"key_insight\""));
    }
}
