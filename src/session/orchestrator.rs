use super::answer::AnswerSource;
use super::{AskContext, Stage};
use crate::bank::{select, Question, QuestionBank};
use crate::config::Config;
use crate::error::{CareerError, CpResult};
use crate::scorer::accumulator::{apply_answer, normalize};
use crate::scorer::{RankedEntry, Scorer, ScoringProfile, TraitVector};
use crate::taxonomy::{CandidateNode, Taxonomy};
use fnv::FnvHashSet;
use serde::Serialize;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, TypedBuilder)]
pub struct SessionParams {
    /// Questions per stage, broadest first.
    #[builder(default = [18, 15, 12])]
    pub question_counts: [usize; 3],
    #[builder(default = 2.0)]
    pub max_weight: f64,
    #[builder(default = ScoringProfile::STAGED)]
    pub staged: ScoringProfile,
    #[builder(default = ScoringProfile::CLUSTER)]
    pub cluster: ScoringProfile,
    #[builder(default)]
    pub seed: Option<u64>,
}

impl SessionParams {
    pub fn from_config(config: &Config, fast: bool, seed: Option<u64>) -> Self {
        Self::builder()
            .question_counts(config.stages.question_counts(fast))
            .max_weight(config.scoring.max_weight)
            .staged(config.scoring.staged_profile())
            .cluster(config.scoring.cluster_profile())
            .seed(seed)
            .build()
    }
}

/// A ranked candidate with the display metadata it carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub name: String,
    pub percent: f64,
    #[serde(skip)]
    pub activation: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

impl RankedCandidate {
    fn from_entry(entry: RankedEntry, node: &CandidateNode) -> Self {
        Self {
            name: entry.name,
            percent: entry.percent,
            activation: entry.activation,
            description: node.description.clone(),
            tools: node.tools.clone(),
            roles: node.roles.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StageOutcome {
    pub stage: Stage,
    pub asked: Vec<String>,
    pub ranking: Vec<RankedCandidate>,
    /// Set when no candidate set was mapped and the previous ranking stands in.
    pub reused_previous: bool,
    /// Normalized snapshot the ranking was computed from.
    pub traits: TraitVector,
}

impl StageOutcome {
    pub fn winner(&self) -> Option<&RankedCandidate> {
        self.ranking.first()
    }
}

#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub stages: Vec<StageOutcome>,
    /// Winner names, broadest first.
    pub chain: Vec<String>,
    pub raw_traits: TraitVector,
    pub traits: TraitVector,
    pub clusters: Vec<RankedCandidate>,
    pub questions_asked: usize,
}

/// Everything carried from one stage into the next.
#[derive(Debug, Clone, Default)]
struct SessionState {
    raw: TraitVector,
    used: FnvHashSet<String>,
    chain: Vec<String>,
}

/// Runs the three-stage drill-down over one bank and taxonomy.
pub struct Orchestrator<'a> {
    bank: &'a QuestionBank,
    taxonomy: &'a Taxonomy,
    params: SessionParams,
    rng: fastrand::Rng,
}

impl<'a> Orchestrator<'a> {
    pub fn new(bank: &'a QuestionBank, taxonomy: &'a Taxonomy, params: SessionParams) -> Self {
        let rng = match params.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            bank,
            taxonomy,
            params,
            rng,
        }
    }

    /// Drives every stage to completion. Any error from the answer source,
    /// `Aborted` included, ends the session without an outcome.
    pub fn run(&mut self, source: &mut dyn AnswerSource) -> CpResult<SessionOutcome> {
        let mut state = SessionState::default();
        let mut stages: Vec<StageOutcome> = Vec::new();
        let mut stage = Stage::Field;

        while stage != Stage::Done {
            let (next_state, outcome) = self.run_stage(stage, state, source, stages.last())?;
            state = next_state;
            stages.push(outcome);
            stage = stage.next();
        }

        let traits = normalize(&state.raw, state.used.len(), self.params.max_weight);
        let clusters = self.rank_nodes(
            &self.taxonomy.career_clusters,
            &traits,
            Scorer::new(self.params.cluster),
        );
        if let Some(top) = clusters.first() {
            info!("Top career cluster: {} ({:.2}%)", top.name, top.percent);
        }

        Ok(SessionOutcome {
            questions_asked: state.used.len(),
            stages,
            chain: state.chain,
            raw_traits: state.raw,
            traits,
            clusters,
        })
    }

    fn pool(&self, stage: Stage, chain: &[String]) -> &'a [Question] {
        let bank = self.bank;
        match (stage, chain) {
            (Stage::Field, _) => bank.stage1.as_slice(),
            (Stage::SubField, [field, ..]) => bank.stage2_pool(field),
            (Stage::Specialization, [_, sub, ..]) => bank.stage3_pool(sub),
            _ => &[],
        }
    }

    fn run_stage(
        &mut self,
        stage: Stage,
        state: SessionState,
        source: &mut dyn AnswerSource,
        previous: Option<&StageOutcome>,
    ) -> CpResult<(SessionState, StageOutcome)> {
        let ordinal = stage.ordinal().ok_or_else(|| {
            CareerError::Validation(format!("{} has no questions to ask", stage))
        })?;
        let max_weight = self.params.max_weight;
        let SessionState {
            mut raw,
            mut used,
            mut chain,
        } = state;

        info!("{}: {} ({})", stage, stage.title(), chain.join(" > "));

        let before = normalize(&raw, used.len().max(1), max_weight);
        let pool = self.pool(stage, &chain);
        let batch = select(
            pool,
            self.params.question_counts[ordinal],
            &used,
            Some(&before),
            &mut self.rng,
        );
        if batch.is_empty() {
            warn!("{}: no unused questions left in pool", stage);
        }

        let mut asked = Vec::with_capacity(batch.len());
        for (i, question) in batch.iter().enumerate() {
            let ctx = AskContext {
                stage,
                position: i + 1,
                batch_size: batch.len(),
                chain: &chain,
            };
            let answer = source.next_answer(question, &ctx)?;
            debug!("{} -> {}", question.id, answer);
            raw = apply_answer(&raw, question, &answer);
            used.insert(question.id.clone());
            asked.push(question.id.clone());
        }

        let after = normalize(&raw, used.len(), max_weight);
        debug!("{} snapshot: {:?}", stage, after);

        let path: Vec<&str> = chain.iter().map(String::as_str).collect();
        let resolution = self.taxonomy.resolve(&path);
        let (ranking, reused_previous) = match resolution.candidates() {
            Some(nodes) => (
                self.rank_nodes(nodes, &after, Scorer::new(self.params.staged)),
                false,
            ),
            None => {
                info!("{}: reusing previous ranking", stage);
                (previous.map(|p| p.ranking.clone()).unwrap_or_default(), true)
            }
        };

        let winner = ranking.first().ok_or_else(|| {
            CareerError::Validation(format!("{}: no candidates to rank", stage))
        })?;
        info!("{} winner: {} ({:.2}%)", stage, winner.name, winner.percent);
        chain.push(winner.name.clone());

        Ok((
            SessionState { raw, used, chain },
            StageOutcome {
                stage,
                asked,
                ranking,
                reused_previous,
                traits: after,
            },
        ))
    }

    fn rank_nodes(
        &self,
        nodes: &[CandidateNode],
        traits: &TraitVector,
        scorer: Scorer,
    ) -> Vec<RankedCandidate> {
        scorer
            .rank(nodes, traits)
            .into_iter()
            .map(|entry| {
                let node = &nodes[entry.index];
                RankedCandidate::from_entry(entry, node)
            })
            .collect()
    }
}
