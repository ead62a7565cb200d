use crate::error::{CareerError, CpResult};
use crate::scorer::ScoringProfile;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub stages: StageParams,
    #[command(flatten)]
    pub scoring: ScoringParams,
    #[command(flatten)]
    pub narrative: NarrativeParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageParams {
    #[arg(long, default_value_t = 18)]
    pub stage1_questions: usize,
    #[arg(long, default_value_t = 15)]
    pub stage2_questions: usize,
    #[arg(long, default_value_t = 12)]
    pub stage3_questions: usize,

    // === FAST MODE ===
    #[arg(long, default_value_t = 0.6)]
    pub fast_multiplier: f64,
    #[arg(long, default_value_t = 6)]
    pub stage1_min_questions: usize,
    #[arg(long, default_value_t = 5)]
    pub stage2_min_questions: usize,
    #[arg(long, default_value_t = 4)]
    pub stage3_min_questions: usize,
}

impl Default for StageParams {
    fn default() -> Self {
        Self {
            stage1_questions: 18,
            stage2_questions: 15,
            stage3_questions: 12,
            fast_multiplier: 0.6,
            stage1_min_questions: 6,
            stage2_min_questions: 5,
            stage3_min_questions: 4,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    #[arg(long, default_value_t = 10.0)]
    pub sharpness: f64,
    #[arg(long, default_value_t = 4.0)]
    pub temperature: f64,
    /// Largest absolute question weight assumed by the normalizer.
    #[arg(long, default_value_t = 2.0)]
    pub max_weight: f64,

    #[arg(long, default_value_t = 12.0)]
    pub cluster_sharpness: f64,
    #[arg(long, default_value_t = 5.0)]
    pub cluster_temperature: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            sharpness: ScoringProfile::STAGED.sharpness,
            temperature: ScoringProfile::STAGED.temperature,
            max_weight: 2.0,
            cluster_sharpness: ScoringProfile::CLUSTER.sharpness,
            cluster_temperature: ScoringProfile::CLUSTER.temperature,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeParams {
    #[arg(long, default_value = "http://localhost:11434/api/generate")]
    pub narrative_endpoint: String,
    /// Endpoint for the retry; the primary endpoint is reused when unset.
    #[arg(long)]
    pub narrative_fallback_endpoint: Option<String>,
    #[arg(long, default_value = "kimi-k2")]
    pub narrative_model: String,
    #[arg(long, default_value = "llama3")]
    pub narrative_fallback_model: String,
    #[arg(long, default_value_t = 120)]
    pub narrative_timeout_secs: u64,
    #[arg(long, default_value_t = 0.65)]
    pub narrative_temperature: f64,
    #[arg(long, default_value_t = 900)]
    pub narrative_max_tokens: u32,
}

impl Default for NarrativeParams {
    fn default() -> Self {
        Self {
            narrative_endpoint: "http://localhost:11434/api/generate".to_string(),
            narrative_fallback_endpoint: None,
            narrative_model: "kimi-k2".to_string(),
            narrative_fallback_model: "llama3".to_string(),
            narrative_timeout_secs: 120,
            narrative_temperature: 0.65,
            narrative_max_tokens: 900,
        }
    }
}

impl StageParams {
    /// Questions to ask per stage. Fast mode scales each count down but never
    /// below the stage minimum.
    pub fn question_counts(&self, fast: bool) -> [usize; 3] {
        let base = [
            self.stage1_questions,
            self.stage2_questions,
            self.stage3_questions,
        ];
        if !fast {
            return base;
        }
        let mins = [
            self.stage1_min_questions,
            self.stage2_min_questions,
            self.stage3_min_questions,
        ];
        let mut out = [0; 3];
        for i in 0..3 {
            let scaled = (base[i] as f64 * self.fast_multiplier).floor() as usize;
            out[i] = scaled.max(mins[i]);
        }
        out
    }
}

impl ScoringParams {
    pub fn staged_profile(&self) -> ScoringProfile {
        ScoringProfile::new(self.sharpness, self.temperature)
    }

    pub fn cluster_profile(&self) -> ScoringProfile {
        ScoringProfile::new(self.cluster_sharpness, self.cluster_temperature)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CpResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CareerError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            CareerError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Copies every value the user typed on the command line over `self`.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident, $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(stages, stage1_questions);
        update_if_present!(stages, stage2_questions);
        update_if_present!(stages, stage3_questions);
        update_if_present!(stages, fast_multiplier);
        update_if_present!(stages, stage1_min_questions);
        update_if_present!(stages, stage2_min_questions);
        update_if_present!(stages, stage3_min_questions);

        update_if_present!(scoring, sharpness);
        update_if_present!(scoring, temperature);
        update_if_present!(scoring, max_weight);
        update_if_present!(scoring, cluster_sharpness);
        update_if_present!(scoring, cluster_temperature);

        update_if_present!(narrative, narrative_endpoint);
        update_if_present!(narrative, narrative_fallback_endpoint);
        update_if_present!(narrative, narrative_model);
        update_if_present!(narrative, narrative_fallback_model);
        update_if_present!(narrative, narrative_timeout_secs);
        update_if_present!(narrative, narrative_temperature);
        update_if_present!(narrative, narrative_max_tokens);
    }

    pub fn validate(&self) -> CpResult<()> {
        let reals = [
            ("fast_multiplier", self.stages.fast_multiplier),
            ("sharpness", self.scoring.sharpness),
            ("temperature", self.scoring.temperature),
            ("max_weight", self.scoring.max_weight),
            ("cluster_sharpness", self.scoring.cluster_sharpness),
            ("cluster_temperature", self.scoring.cluster_temperature),
            ("narrative_temperature", self.narrative.narrative_temperature),
        ];
        for (name, value) in reals {
            if !value.is_finite() || value < 0.0 {
                return Err(CareerError::Config(format!(
                    "--{} must be a finite, non-negative number (got {})",
                    name.replace('_', "-"),
                    value
                )));
            }
        }
        if self.narrative.narrative_timeout_secs == 0 {
            return Err(CareerError::Config(
                "--narrative-timeout-secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
