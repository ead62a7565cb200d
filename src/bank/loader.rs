use super::Question;
use crate::consts::DEFAULT_KEY;
use crate::error::{CareerError, CpResult};
use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const EMBEDDED_BANK: &str = include_str!("../../data/questions.json");

/// Stage pools. Stage 1 is flat; stages 2 and 3 are keyed by the previous
/// stage's winner with an optional `_default_` pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    pub stage1: Vec<Question>,
    #[serde(default)]
    pub stage2: BTreeMap<String, Vec<Question>>,
    #[serde(default)]
    pub stage3: BTreeMap<String, Vec<Question>>,
}

impl QuestionBank {
    pub fn embedded() -> CpResult<Self> {
        Self::from_json(EMBEDDED_BANK)
    }

    pub fn from_json(json: &str) -> CpResult<Self> {
        let bank: Self = serde_json::from_str(json)?;
        if bank.stage1.is_empty() {
            return Err(CareerError::Validation(
                "question bank has no stage 1 questions".into(),
            ));
        }
        Ok(bank)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CpResult<Self> {
        let path = path.as_ref();
        info!("Loading question bank from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Embedded bank unless a path is given.
    pub fn resolve(path: Option<&Path>) -> CpResult<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Self::embedded(),
        }
    }

    pub fn stage2_pool(&self, field: &str) -> &[Question] {
        keyed_pool(&self.stage2, field)
    }

    pub fn stage3_pool(&self, subfield: &str) -> &[Question] {
        keyed_pool(&self.stage3, subfield)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every question together with the pool it lives in.
    pub fn iter(&self) -> impl Iterator<Item = (String, &Question)> + '_ {
        let s1 = self.stage1.iter().map(|q| ("stage1".to_string(), q));
        let s2 = self
            .stage2
            .iter()
            .flat_map(|(k, qs)| qs.iter().map(move |q| (format!("stage2/{}", k), q)));
        let s3 = self
            .stage3
            .iter()
            .flat_map(|(k, qs)| qs.iter().map(move |q| (format!("stage3/{}", k), q)));
        s1.chain(s2).chain(s3)
    }

    /// Ids that appear more than once within a single pool.
    pub fn duplicate_ids(&self) -> Vec<(String, String)> {
        let mut dups = Vec::new();
        let mut check = |pool: String, qs: &[Question]| {
            let mut seen = FnvHashSet::default();
            for q in qs {
                if !seen.insert(q.id.as_str()) {
                    dups.push((pool.clone(), q.id.clone()));
                }
            }
        };
        check("stage1".into(), &self.stage1);
        for (k, qs) in &self.stage2 {
            check(format!("stage2/{}", k), qs);
        }
        for (k, qs) in &self.stage3 {
            check(format!("stage3/{}", k), qs);
        }
        dups
    }
}

fn keyed_pool<'a>(pools: &'a BTreeMap<String, Vec<Question>>, key: &str) -> &'a [Question] {
    if let Some(pool) = pools.get(key) {
        return pool;
    }
    debug!("No question pool for '{}', using {}", key, DEFAULT_KEY);
    pools.get(DEFAULT_KEY).map(Vec::as_slice).unwrap_or(&[])
}
