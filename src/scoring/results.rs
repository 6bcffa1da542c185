use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::{Decision, Effort, Gate, GateStatus, Pillar, Rag};

/// The document produced by one scoring run.
///
/// Persisted by the caller and re-served as-is; every collection is ordered
/// so that serializing the same results always yields the same bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Results {
    /// Version of the settings that produced this document
    pub settings_version: u32,
    pub overall_score: u8,
    pub answered_count: usize,
    pub pillar_results: BTreeMap<Pillar, PillarResult>,
    /// Pillars without any answer; excluded from the overall score
    pub unscored_pillars: Vec<Pillar>,
    pub gate_results: BTreeMap<Gate, GateResult>,
    pub top_risks: Vec<RankedItem>,
    pub quick_wins: Vec<RankedItem>,
    pub decision: Decision,
    pub roadmap: Vec<RoadmapPhase>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PillarResult {
    pub score: u8,
    pub rag: Rag,
    pub answered: usize,
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GateResult {
    pub status: GateStatus,
    pub answered: usize,
    pub lowest_score: Option<u8>,
    /// Questions that pulled the gate below PASS
    pub blockers: Vec<String>,
}

/// A question surfaced as a top risk or quick win.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    pub question_id: String,
    pub qid: String,
    pub pillar: Pillar,
    pub gate: Gate,
    pub score: u8,
    pub effort: Effort,
    pub text: String,
    pub fix_hint: String,
    pub risk_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapPhase {
    pub effort: Effort,
    pub title: String,
    pub horizon: String,
    pub items: Vec<RoadmapItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapItem {
    pub question_id: String,
    pub qid: String,
    pub pillar: Pillar,
    pub gate: Gate,
    pub action: String,
    pub source: RoadmapSource,
}

/// Which ranked list a roadmap item came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RoadmapSource {
    Risk,
    QuickWin,
    Both,
}
