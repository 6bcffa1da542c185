use thiserror::Error;

use super::types::{Pillar, MAX_ANSWER_SCORE};

/// Contract violations detected before any scoring happens.
///
/// These indicate bad data or a caller bug, never a business outcome. The
/// engine returns one of these instead of a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("no weight configured for pillar {0}")]
    MissingWeight(Pillar),

    #[error("pillar {0} has a weight of zero")]
    ZeroWeight(Pillar),

    #[error("pillar weights sum to {total}, expected 100")]
    WeightSum { total: u64 },

    #[error("invalid scoring rules: {0}")]
    InvalidRules(String),

    #[error("answer references unknown question '{0}'")]
    UnknownQuestion(String),

    #[error("answer references inactive question '{0}'")]
    InactiveQuestion(String),

    #[error("score {score} for question '{question_id}' is outside 0..={max}", max = MAX_ANSWER_SCORE)]
    ScoreOutOfRange { question_id: String, score: u8 },
}
