use crate::bank::QuestionBank;
use crate::consts::DEFAULT_KEY;
use crate::taxonomy::Taxonomy;
use serde::Serialize;
use strum_macros::Display;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub scope: String,
    pub message: String,
}

impl Finding {
    fn error(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            scope: scope.into(),
            message: message.into(),
        }
    }

    fn warning(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            scope: scope.into(),
            message: message.into(),
        }
    }
}

/// Content checks for a bank/taxonomy pair.
pub struct Auditor<'a> {
    bank: &'a QuestionBank,
    taxonomy: &'a Taxonomy,
}

impl<'a> Auditor<'a> {
    pub fn new(bank: &'a QuestionBank, taxonomy: &'a Taxonomy) -> Self {
        Self { bank, taxonomy }
    }

    pub fn run(&self) -> Vec<Finding> {
        let mut findings = Vec::new();
        self.check_bank(&mut findings);
        self.check_taxonomy(&mut findings);

        let errors = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        if errors > 0 {
            warn!("Audit found {} error(s)", errors);
        } else {
            info!("Audit passed with {} warning(s)", findings.len());
        }
        findings
    }

    fn check_bank(&self, out: &mut Vec<Finding>) {
        for (pool, id) in self.bank.duplicate_ids() {
            out.push(Finding::error(pool, format!("duplicate question id '{}'", id)));
        }

        if !self.bank.stage2.contains_key(DEFAULT_KEY) {
            out.push(Finding::warning("stage2", "no _default_ pool"));
        }
        if !self.bank.stage3.contains_key(DEFAULT_KEY) {
            out.push(Finding::warning("stage3", "no _default_ pool"));
        }

        for (pool, q) in self.bank.iter() {
            let scope = format!("{}/{}", pool, q.id);
            for key in q.traits.unknown_keys() {
                out.push(Finding::warning(
                    scope.clone(),
                    format!("unknown trait key '{}'", key),
                ));
            }
            if let Some(opts) = &q.options {
                if opts.len() > 5 {
                    out.push(Finding::warning(
                        scope.clone(),
                        format!("{} options given, only 5 are offered", opts.len()),
                    ));
                }
            }
            if let Some(correct) = &q.correct {
                if !q.accepts(correct) {
                    out.push(Finding::error(
                        scope.clone(),
                        format!("correct key '{}' is not an offered option", correct),
                    ));
                }
            }
        }
    }

    fn check_taxonomy(&self, out: &mut Vec<Finding>) {
        if self.taxonomy.default_specializations.is_empty() {
            out.push(Finding::warning(
                "taxonomy",
                "default specialization set is empty",
            ));
        }

        for (_, node) in self.taxonomy.walk() {
            for (code, w) in node.trait_weights.iter() {
                if w < 0.0 || !w.is_finite() {
                    out.push(Finding::error(
                        node.name.clone(),
                        format!("weight for '{}' must be a non-negative number, got {}", code, w),
                    ));
                }
            }
            for key in node.trait_weights.unknown_keys() {
                out.push(Finding::warning(
                    node.name.clone(),
                    format!("unknown trait key '{}'", key),
                ));
            }
            let mut names: Vec<&str> = node.children.iter().map(|c| c.name.as_str()).collect();
            names.sort_unstable();
            for pair in names.windows(2) {
                if pair[0] == pair[1] {
                    out.push(Finding::error(
                        node.name.clone(),
                        format!("duplicate child '{}'", pair[0]),
                    ));
                }
            }
        }
    }
}

pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}
