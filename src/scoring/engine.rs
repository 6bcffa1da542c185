use std::collections::BTreeMap;

use super::config::{PillarWeights, RagThresholds};
use super::error::ScoringError;
use super::gates::{decide, evaluate_gates};
use super::ranking::{rank_quick_wins, rank_top_risks};
use super::results::{PillarResult, Results};
use super::roadmap::build_roadmap;
use super::types::{Pillar, Rag, MAX_ANSWER_SCORE};
use super::validation::check_scoring;
use crate::assessment::AnswerSet;
use crate::config::Settings;
use crate::questions::{Question, QuestionBank};

/// An active question paired with its submitted score.
#[derive(Debug, Clone, Copy)]
pub struct AnsweredQuestion<'a> {
    pub question: &'a Question,
    pub score: u8,
}

/// Score an answer set against the question bank and settings.
///
/// Pure and deterministic: the same inputs always produce an identical
/// [`Results`]. Unanswered questions are skipped; a pillar without any
/// answer is left out of the weighted overall score and reported in
/// `unscored_pillars`.
///
/// # Errors
///
/// Returns a [`ScoringError`] when the weights or rules are unusable, or an
/// answer references an unknown or inactive question or carries a score
/// above [`MAX_ANSWER_SCORE`]. No partial result is produced.
pub fn score(answers: &AnswerSet, bank: &QuestionBank, settings: &Settings) -> Result<Results, ScoringError> {
    check_scoring(&settings.weights, &settings.rules)?;
    let answered = collect_answered(answers, bank)?;
    let rules = &settings.rules;

    let pillar_results = score_pillars(&answered, &settings.weights, &rules.rag);
    let unscored_pillars: Vec<Pillar> = Pillar::ALL
        .into_iter()
        .filter(|p| !pillar_results.contains_key(p))
        .collect();
    let overall_score = overall_score(&pillar_results);

    let gate_results = evaluate_gates(&answered, &rules.gates);
    let decision = decide(overall_score, &gate_results, &rules.decision);

    let top_risks = rank_top_risks(&answered, &gate_results, &settings.weights, &rules.ranking);
    let quick_wins = rank_quick_wins(&answered, &settings.weights, &rules.ranking);
    let roadmap = build_roadmap(&top_risks, &quick_wins);

    tracing::debug!(
        overall = overall_score,
        answered = answered.len(),
        unscored = unscored_pillars.len(),
        decision = %decision,
        "scored assessment"
    );

    Ok(Results {
        settings_version: settings.version,
        overall_score,
        answered_count: answered.len(),
        pillar_results,
        unscored_pillars,
        gate_results,
        top_risks,
        quick_wins,
        decision,
        roadmap,
    })
}

/// Check every answer against the bank and return the answered active
/// questions in stable bank order.
pub fn collect_answered<'a>(
    answers: &AnswerSet,
    bank: &'a QuestionBank,
) -> Result<Vec<AnsweredQuestion<'a>>, ScoringError> {
    for (question_id, score) in answers.iter() {
        let question = bank
            .get(question_id)
            .ok_or_else(|| ScoringError::UnknownQuestion(question_id.to_string()))?;
        if !question.active {
            return Err(ScoringError::InactiveQuestion(question_id.to_string()));
        }
        if score > MAX_ANSWER_SCORE {
            return Err(ScoringError::ScoreOutOfRange {
                question_id: question_id.to_string(),
                score,
            });
        }
    }

    Ok(bank
        .active()
        .filter_map(|question| {
            answers
                .get(&question.id)
                .map(|score| AnsweredQuestion { question, score })
        })
        .collect())
}

/// Normalize each pillar's answers to 0..=100 and attach its RAG status.
/// Pillars without answers are absent from the map.
fn score_pillars(
    answered: &[AnsweredQuestion<'_>],
    weights: &PillarWeights,
    rag: &RagThresholds,
) -> BTreeMap<Pillar, PillarResult> {
    let mut totals: BTreeMap<Pillar, (u32, u32)> = BTreeMap::new();
    for a in answered {
        let entry = totals.entry(a.question.pillar).or_insert((0, 0));
        entry.0 += u32::from(a.score);
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(pillar, (sum, count))| {
            let score = round_ratio(100 * u64::from(sum), u64::from(MAX_ANSWER_SCORE) * u64::from(count)) as u8;
            let result = PillarResult {
                score,
                rag: classify_rag(score, rag),
                answered: count as usize,
                weight: weights.weight_or_zero(pillar),
            };
            tracing::debug!(
                pillar = %pillar,
                score,
                rag = %result.rag,
                answered = count,
                "scored pillar"
            );
            (pillar, result)
        })
        .collect()
}

/// Weighted mean of the scored pillars, renormalized over their weights.
/// Zero when no pillar is scored; validated weights are never zero.
fn overall_score(pillars: &BTreeMap<Pillar, PillarResult>) -> u8 {
    let weight: u64 = pillars.values().map(|p| u64::from(p.weight)).sum();
    let weighted: u64 = pillars
        .values()
        .map(|p| u64::from(p.score) * u64::from(p.weight))
        .sum();
    round_ratio(weighted, weight).min(100) as u8
}

pub fn classify_rag(score: u8, thresholds: &RagThresholds) -> Rag {
    if score < thresholds.amber_from {
        Rag::Red
    } else if score < thresholds.green_from {
        Rag::Amber
    } else {
        Rag::Green
    }
}

/// `num / den` rounded half up; zero for an empty denominator.
fn round_ratio(num: u64, den: u64) -> u64 {
    if den == 0 {
        0
    } else {
        (2 * num + den) / (2 * den)
    }
}
