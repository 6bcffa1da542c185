use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::types::Assessment;
use crate::scoring::Decision;

/// Aggregate figures for the admin dashboard.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_assessments: usize,
    pub completed_assessments: usize,
    /// Rounded mean overall score of completed assessments, 0 when none
    pub avg_score: u32,
    /// Rounded percentage of assessments that are completed, 0 when none
    pub completion_rate: u32,
    /// Count per decision label; every label is always present
    pub decisions: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub completed_at: DateTime<Utc>,
    pub overall_score: u8,
    pub decision: Decision,
}

fn rounded_div(num: u64, den: u64) -> u32 {
    if den == 0 {
        return 0;
    }
    ((2 * num + den) / (2 * den)) as u32
}

pub fn compute_stats(assessments: &[Assessment]) -> AdminStats {
    let mut decisions: BTreeMap<String, usize> = Decision::ALL
        .into_iter()
        .map(|d| (d.label().to_string(), 0))
        .collect();

    let mut score_sum: u64 = 0;
    let mut completed = 0usize;
    for results in assessments.iter().filter_map(|a| a.results()) {
        completed += 1;
        score_sum += u64::from(results.overall_score);
        *decisions.entry(results.decision.label().to_string()).or_insert(0) += 1;
    }

    let total = assessments.len();
    AdminStats {
        total_assessments: total,
        completed_assessments: completed,
        avg_score: rounded_div(score_sum, completed as u64),
        completion_rate: rounded_div(completed as u64 * 100, total as u64),
        decisions,
    }
}

/// Summaries of completed assessments, most recently calculated first.
pub fn completed_summaries(assessments: &[Assessment]) -> Vec<CompletedSummary> {
    let mut summaries: Vec<CompletedSummary> = assessments
        .iter()
        .filter_map(|a| {
            let completed = a.completed.as_ref()?;
            Some(CompletedSummary {
                id: a.id.clone(),
                name: a.profile.name.clone(),
                email: a.profile.email.clone(),
                company_name: a.profile.company_name.clone(),
                completed_at: completed.calculated_at,
                overall_score: completed.results.overall_score,
                decision: completed.results.decision,
            })
        })
        .collect();

    summaries.sort_by(|a, b| b.completed_at.cmp(&a.completed_at).then_with(|| a.id.cmp(&b.id)));
    summaries
}
