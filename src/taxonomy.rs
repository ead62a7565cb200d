use crate::consts::CORE_PRACTITIONER;
use crate::error::{CareerError, CpResult};
use crate::scorer::types::TraitWeights;
use crate::scorer::Scorable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const EMBEDDED_TAXONOMY: &str = include_str!("../data/taxonomy.json");

/// A field, sub-field, specialization or career cluster.
///
/// `tools` and `roles` ride along to the result record and never affect
/// scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateNode {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub trait_weights: TraitWeights,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CandidateNode>,
}

impl CandidateNode {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            trait_weights: TraitWeights::new(),
            tools: Vec::new(),
            roles: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_weights(mut self, weights: TraitWeights) -> Self {
        self.trait_weights = weights;
        self
    }

    pub fn child(&self, name: &str) -> Option<&CandidateNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Placeholder used when the deepest level has nothing to offer.
    pub fn core_practitioner() -> Self {
        Self::new(CORE_PRACTITIONER, "Generalist practitioner of the chosen sub-field")
    }
}

impl Scorable for CandidateNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn trait_weights(&self) -> &TraitWeights {
        &self.trait_weights
    }
}

/// Where a candidate set came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// Children of the requested node.
    Mapped(&'a [CandidateNode]),
    /// The taxonomy-wide default specialization set.
    Default(&'a [CandidateNode]),
    /// Nothing configured at all; a single stand-in candidate.
    Synthetic(Vec<CandidateNode>),
    /// No candidates for this path; the caller decides what to reuse.
    Unmapped,
}

impl<'a> Resolution<'a> {
    pub fn candidates(&self) -> Option<&[CandidateNode]> {
        match self {
            Self::Mapped(c) | Self::Default(c) => Some(*c),
            Self::Synthetic(c) => Some(c.as_slice()),
            Self::Unmapped => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        !matches!(self, Self::Mapped(_))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Taxonomy {
    pub fields: Vec<CandidateNode>,
    #[serde(default)]
    pub default_specializations: Vec<CandidateNode>,
    #[serde(default)]
    pub career_clusters: Vec<CandidateNode>,
}

impl Taxonomy {
    pub fn embedded() -> CpResult<Self> {
        Self::from_json(EMBEDDED_TAXONOMY)
    }

    pub fn from_json(json: &str) -> CpResult<Self> {
        let taxonomy: Self = serde_json::from_str(json)?;
        if taxonomy.fields.is_empty() {
            return Err(CareerError::Validation("taxonomy has no fields".into()));
        }
        Ok(taxonomy)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CpResult<Self> {
        let path = path.as_ref();
        info!("Loading taxonomy from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn resolve_source(path: Option<&Path>) -> CpResult<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Self::embedded(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&CandidateNode> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks a sub-field up under `field` first, then under any field.
    pub fn subfield(&self, field: &str, name: &str) -> Option<&CandidateNode> {
        self.field(field)
            .and_then(|f| f.child(name))
            .or_else(|| self.fields.iter().find_map(|f| f.child(name)))
    }

    /// Candidate set for the level below `path` (empty path = fields).
    ///
    /// Sub-fields resolve to `Unmapped` when the field has no children.
    /// Specializations fall back to the default set, then to a single
    /// synthetic candidate, so the deepest level always has a result.
    pub fn resolve(&self, path: &[&str]) -> Resolution<'_> {
        match path {
            [] => Resolution::Mapped(&self.fields),
            [field] => match self.field(field) {
                Some(node) if !node.children.is_empty() => Resolution::Mapped(&node.children),
                _ => {
                    info!("No sub-fields mapped for '{}'", field);
                    Resolution::Unmapped
                }
            },
            [field, sub, ..] => match self.subfield(field, sub) {
                Some(node) if !node.children.is_empty() => Resolution::Mapped(&node.children),
                _ if !self.default_specializations.is_empty() => {
                    info!("No specializations mapped for '{}', using defaults", sub);
                    Resolution::Default(&self.default_specializations)
                }
                _ => {
                    warn!(
                        "No specializations for '{}' and no default set; using {}",
                        sub, CORE_PRACTITIONER
                    );
                    Resolution::Synthetic(vec![CandidateNode::core_practitioner()])
                }
            },
        }
    }

    /// Every node in the tree with its depth (1 = field), then clusters at 0.
    pub fn walk(&self) -> Vec<(usize, &CandidateNode)> {
        fn visit<'a>(node: &'a CandidateNode, depth: usize, out: &mut Vec<(usize, &'a CandidateNode)>) {
            out.push((depth, node));
            for child in &node.children {
                visit(child, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        for field in &self.fields {
            visit(field, 1, &mut out);
        }
        for spec in &self.default_specializations {
            out.push((3, spec));
        }
        for cluster in &self.career_clusters {
            out.push((0, cluster));
        }
        out
    }
}
