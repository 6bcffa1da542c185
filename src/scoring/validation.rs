use super::config::{PillarWeights, ScoringRules};
use super::error::ScoringError;
use super::types::MAX_ANSWER_SCORE;

/// Validate weights and rules at startup or before an admin update is saved.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(weights: &PillarWeights, rules: &ScoringRules) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for pillar in weights.missing() {
        errors.push(format!("weights.{}: missing", pillar));
    }
    for pillar in weights.zero_weighted() {
        errors.push(format!("weights.{}: must be at least 1", pillar));
    }

    let total = weights.total();
    if total != 100 {
        errors.push(format!("weights: sum to {}, expected 100", total));
    }

    errors.extend(rule_problems(rules));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check the invariants the engine relies on, stopping at the first violation.
pub fn check_scoring(weights: &PillarWeights, rules: &ScoringRules) -> Result<(), ScoringError> {
    if let Some(pillar) = weights.missing().into_iter().next() {
        return Err(ScoringError::MissingWeight(pillar));
    }
    if let Some(pillar) = weights.zero_weighted().into_iter().next() {
        return Err(ScoringError::ZeroWeight(pillar));
    }
    let total = weights.total();
    if total != 100 {
        return Err(ScoringError::WeightSum { total });
    }
    if let Some(problem) = rule_problems(rules).into_iter().next() {
        return Err(ScoringError::InvalidRules(problem));
    }
    Ok(())
}

fn rule_problems(rules: &ScoringRules) -> Vec<String> {
    let mut errors = Vec::new();

    let rag = &rules.rag;
    if rag.amber_from == 0 || rag.amber_from >= rag.green_from || rag.green_from > 100 {
        errors.push(format!(
            "rules.rag: need 0 < amber_from < green_from <= 100, got {} and {}",
            rag.amber_from, rag.green_from
        ));
    }

    let gates = &rules.gates;
    if gates.fail_at_or_below >= gates.conditional_at_or_below {
        errors.push(format!(
            "rules.gates: fail_at_or_below ({}) must be below conditional_at_or_below ({})",
            gates.fail_at_or_below, gates.conditional_at_or_below
        ));
    }
    if gates.conditional_at_or_below >= MAX_ANSWER_SCORE {
        errors.push(format!(
            "rules.gates.conditional_at_or_below: must be below {}",
            MAX_ANSWER_SCORE
        ));
    }
    if !gates.pass_mean.is_finite()
        || gates.pass_mean < 0.0
        || gates.pass_mean > f64::from(MAX_ANSWER_SCORE)
    {
        errors.push(format!(
            "rules.gates.pass_mean: must be within 0..={}",
            MAX_ANSWER_SCORE
        ));
    }

    if rules.decision.conditional_below > 100 {
        errors.push("rules.decision.conditional_below: must be at most 100".to_string());
    }

    if rules.ranking.top_n == 0 {
        errors.push("rules.ranking.top_n: must be at least 1".to_string());
    }
    if rules.ranking.risk_max_score >= MAX_ANSWER_SCORE {
        errors.push(format!(
            "rules.ranking.risk_max_score: must be below {}",
            MAX_ANSWER_SCORE
        ));
    }

    errors
}
