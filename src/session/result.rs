use super::orchestrator::{RankedCandidate, SessionOutcome};
use super::Stage;
use crate::bank::QuestionBank;
use crate::error::CpResult;
use crate::narrative::Narrative;
use crate::scorer::TraitVector;
use crate::taxonomy::Taxonomy;
use chrono::{DateTime, Local};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// SHA-256 over the serialized bank and taxonomy.
pub fn content_fingerprint(bank: &QuestionBank, taxonomy: &Taxonomy) -> CpResult<String> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(bank)?);
    hasher.update(serde_json::to_vec(taxonomy)?);
    Ok(hex::encode(hasher.finalize()))
}

/// `career_result_<YYYYmmdd_HHMMSS>.json` in the working directory.
pub fn default_output_path(now: &DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "career_result_{}.json",
        now.format("%Y%m%d_%H%M%S")
    ))
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultMeta {
    pub timestamp: String,
    pub version: String,
    pub questions_asked: usize,
    pub demo_mode: bool,
    pub seed: Option<u64>,
    pub bank_fingerprint: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub title: String,
    pub winner: String,
    pub confidence: f64,
    pub reused_previous: bool,
    pub questions: Vec<String>,
    pub distribution: Vec<RankedCandidate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResult {
    pub meta: ResultMeta,
    pub stages: Vec<StageRecord>,
    pub chain: Vec<String>,
    pub trait_profile: TraitVector,
    /// Unnormalized per-trait sums, kept for auditing the profile.
    pub raw_scores: TraitVector,
    pub career_clusters: Vec<RankedCandidate>,
    pub narrative: Option<Narrative>,
}

impl AssessmentResult {
    pub fn new(
        outcome: &SessionOutcome,
        narrative: Option<Narrative>,
        demo_mode: bool,
        seed: Option<u64>,
        fingerprint: String,
        now: &DateTime<Local>,
    ) -> Self {
        let stages = outcome
            .stages
            .iter()
            .map(|s| {
                let (winner, confidence) = s
                    .winner()
                    .map(|w| (w.name.clone(), w.percent))
                    .unwrap_or_default();
                StageRecord {
                    stage: s.stage,
                    title: s.stage.title().to_string(),
                    winner,
                    confidence,
                    reused_previous: s.reused_previous,
                    questions: s.asked.clone(),
                    distribution: s.ranking.clone(),
                }
            })
            .collect();

        Self {
            meta: ResultMeta {
                timestamp: now.to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                questions_asked: outcome.questions_asked,
                demo_mode,
                seed,
                bank_fingerprint: fingerprint,
            },
            stages,
            chain: outcome.chain.clone(),
            trait_profile: outcome.traits,
            raw_scores: outcome.raw_traits,
            career_clusters: outcome.clusters.clone(),
            narrative,
        }
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> CpResult<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        info!("Result written to {}", path.display());
        Ok(())
    }

    /// One row per ranked candidate: `stage,rank,name,percent`. Career
    /// clusters follow the stages under the stage name `cluster`.
    pub fn write_csv<W: Write>(&self, writer: W) -> CpResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["stage", "rank", "name", "percent"])?;

        let rows = self
            .stages
            .iter()
            .map(|s| (s.stage.ordinal().map(|o| o + 1).unwrap_or(0).to_string(), &s.distribution))
            .chain(std::iter::once(("cluster".to_string(), &self.career_clusters)));

        for (label, ranking) in rows {
            for (rank, c) in ranking.iter().enumerate() {
                let position = (rank + 1).to_string();
                let percent = format!("{:.2}", c.percent);
                wtr.write_record([
                    label.as_str(),
                    position.as_str(),
                    c.name.as_str(),
                    percent.as_str(),
                ])?;
            }
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> CpResult<()> {
        let path = path.as_ref();
        self.write_csv(File::create(path)?)?;
        info!("Distributions written to {}", path.display());
        Ok(())
    }
}
