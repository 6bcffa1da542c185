pub mod config;
pub mod engine;
pub mod error;
pub mod gates;
pub mod ranking;
pub mod results;
pub mod roadmap;
pub mod types;
pub mod validation;

pub use config::*;
pub use engine::{score, AnsweredQuestion};
pub use error::ScoringError;
pub use results::{GateResult, PillarResult, RankedItem, Results, RoadmapItem, RoadmapPhase, RoadmapSource};
pub use types::{Decision, Effort, Gate, GateStatus, Pillar, Rag, MAX_ANSWER_SCORE};
pub use validation::{check_scoring, validate_scoring};
