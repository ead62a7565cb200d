pub mod answer;
pub mod orchestrator;
pub mod result;

pub use self::answer::{AnswerSource, InteractiveSource, RandomSource};
pub use self::orchestrator::{Orchestrator, SessionOutcome, SessionParams, StageOutcome};
pub use self::result::AssessmentResult;

use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Drill-down state. Each stage's winner keys the next stage's pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum Stage {
    #[strum(to_string = "Stage 1")]
    #[serde(rename = "stage_1")]
    Field,
    #[strum(to_string = "Stage 2")]
    #[serde(rename = "stage_2")]
    SubField,
    #[strum(to_string = "Stage 3")]
    #[serde(rename = "stage_3")]
    Specialization,
    #[strum(to_string = "Done")]
    #[serde(rename = "done")]
    Done,
}

impl Stage {
    pub fn next(self) -> Self {
        match self {
            Self::Field => Self::SubField,
            Self::SubField => Self::Specialization,
            Self::Specialization | Self::Done => Self::Done,
        }
    }

    /// Zero-based position among the asking stages.
    pub fn ordinal(self) -> Option<usize> {
        match self {
            Self::Field => Some(0),
            Self::SubField => Some(1),
            Self::Specialization => Some(2),
            Self::Done => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Field => "Broad Field Discovery",
            Self::SubField => "Sub-Field Focus",
            Self::Specialization => "Specialization Pinpoint",
            Self::Done => "Complete",
        }
    }
}

/// What an answer source is told about the question it is asked.
#[derive(Debug, Clone)]
pub struct AskContext<'a> {
    pub stage: Stage,
    /// 1-based position within the stage's batch.
    pub position: usize,
    pub batch_size: usize,
    /// Winners so far, broadest first.
    pub chain: &'a [String],
}
