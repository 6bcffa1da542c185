use std::cmp::Reverse;
use std::collections::BTreeMap;

use super::config::{PillarWeights, RankingRules};
use super::engine::AnsweredQuestion;
use super::results::{GateResult, RankedItem};
use super::types::{Gate, GateStatus, MAX_ANSWER_SCORE};

/// Low-scoring answers, most severe first: gate status (FAIL before
/// CONDITIONAL before PASS), then score, then heavier pillars, then
/// `(sort_order, id)`.
pub fn rank_top_risks(
    answered: &[AnsweredQuestion<'_>],
    gates: &BTreeMap<Gate, GateResult>,
    weights: &PillarWeights,
    rules: &RankingRules,
) -> Vec<RankedItem> {
    let gate_status = |gate: Gate| gates.get(&gate).map(|g| g.status).unwrap_or(GateStatus::Pass);

    let mut candidates: Vec<&AnsweredQuestion<'_>> = answered
        .iter()
        .filter(|a| a.score <= rules.risk_max_score)
        .collect();
    let key = |a: &AnsweredQuestion<'_>| {
        (
            gate_status(a.question.gate),
            a.score,
            Reverse(weights.weight_or_zero(a.question.pillar)),
        )
    };
    candidates.sort_by(|x, y| {
        key(*x)
            .cmp(&key(*y))
            .then_with(|| x.question.stable_key().cmp(&y.question.stable_key()))
    });

    candidates
        .into_iter()
        .take(rules.top_n)
        .map(to_ranked)
        .collect()
}

/// Improvable answers cheap enough to fix soon: effort up to
/// `quick_win_max_effort`, ordered by effort, then score, then heavier
/// pillars, then `(sort_order, id)`.
pub fn rank_quick_wins(
    answered: &[AnsweredQuestion<'_>],
    weights: &PillarWeights,
    rules: &RankingRules,
) -> Vec<RankedItem> {
    let mut candidates: Vec<&AnsweredQuestion<'_>> = answered
        .iter()
        .filter(|a| a.score < MAX_ANSWER_SCORE && a.question.effort <= rules.quick_win_max_effort)
        .collect();
    let key = |a: &AnsweredQuestion<'_>| {
        (
            a.question.effort,
            a.score,
            Reverse(weights.weight_or_zero(a.question.pillar)),
        )
    };
    candidates.sort_by(|x, y| {
        key(*x)
            .cmp(&key(*y))
            .then_with(|| x.question.stable_key().cmp(&y.question.stable_key()))
    });

    candidates
        .into_iter()
        .take(rules.top_n)
        .map(to_ranked)
        .collect()
}

fn to_ranked(a: &AnsweredQuestion<'_>) -> RankedItem {
    let q = a.question;
    RankedItem {
        question_id: q.id.clone(),
        qid: q.qid.clone(),
        pillar: q.pillar,
        gate: q.gate,
        score: a.score,
        effort: q.effort,
        text: q.text.clone(),
        fix_hint: q.fix_hint.clone(),
        risk_text: q.risk_text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::bank::fixtures::question;
    use crate::questions::Question;
    use crate::scoring::config::GateRules;
    use crate::scoring::gates::evaluate_gates;
    use crate::scoring::types::{Effort, Pillar};

    fn answered<'a>(questions: &'a [Question], scores: &[u8]) -> Vec<AnsweredQuestion<'a>> {
        questions
            .iter()
            .zip(scores)
            .map(|(question, score)| AnsweredQuestion {
                question,
                score: *score,
            })
            .collect()
    }

    fn ids(items: &[RankedItem]) -> Vec<&str> {
        items.iter().map(|i| i.question_id.as_str()).collect()
    }

    #[test]
    fn test_risks_ordered_by_gate_severity_then_score() {
        let questions = vec![
            // G1 ends up CONDITIONAL (lowest 1)
            question("a", Pillar::P1, Gate::G1, Effort::Low, 1),
            // G2 ends up FAIL (has a 0)
            question("b", Pillar::P2, Gate::G2, Effort::Low, 2),
            question("c", Pillar::P3, Gate::G2, Effort::Low, 3),
            question("d", Pillar::P4, Gate::G1, Effort::Low, 4),
        ];
        let answered = answered(&questions, &[1, 1, 0, 3]);
        let gates = evaluate_gates(&answered, &GateRules::default());

        let risks = rank_top_risks(&answered, &gates, &PillarWeights::default(), &RankingRules::default());
        // FAIL gate first (c scored 0, then b scored 1), then the CONDITIONAL gate
        assert_eq!(ids(&risks), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_risk_ties_broken_by_weight_then_sort_order() {
        let questions = vec![
            question("a", Pillar::P1, Gate::G1, Effort::Low, 1),
            question("b", Pillar::P2, Gate::G1, Effort::Low, 2),
            question("c", Pillar::P2, Gate::G1, Effort::Low, 0),
        ];
        let answered = answered(&questions, &[0, 0, 0]);
        let gates = evaluate_gates(&answered, &GateRules::default());
        let mut weights: Vec<(Pillar, u32)> = Pillar::ALL.into_iter().map(|p| (p, 10)).collect();
        weights[0].1 = 5;
        weights[1].1 = 15;
        let weights: PillarWeights = weights.into_iter().collect();

        let risks = rank_top_risks(&answered, &gates, &weights, &RankingRules::default());
        // P2 outweighs P1; within P2, sort_order 0 before 2
        assert_eq!(ids(&risks), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_risks_bounded_by_top_n() {
        let questions: Vec<Question> = (0..8)
            .map(|i| question(&format!("q{}", i), Pillar::P1, Gate::G1, Effort::Low, i))
            .collect();
        let answered = answered(&questions, &[0; 8]);
        let gates = evaluate_gates(&answered, &GateRules::default());
        let rules = RankingRules {
            top_n: 3,
            ..RankingRules::default()
        };
        let risks = rank_top_risks(&answered, &gates, &PillarWeights::default(), &rules);
        assert_eq!(ids(&risks), vec!["q0", "q1", "q2"]);
    }

    #[test]
    fn test_high_scores_are_not_risks() {
        let questions = vec![question("a", Pillar::P1, Gate::G1, Effort::Low, 1)];
        let answered = answered(&questions, &[2]);
        let gates = evaluate_gates(&answered, &GateRules::default());
        assert!(rank_top_risks(&answered, &gates, &PillarWeights::default(), &RankingRules::default()).is_empty());
    }

    #[test]
    fn test_quick_wins_prefer_low_effort() {
        let questions = vec![
            question("med", Pillar::P1, Gate::G1, Effort::Medium, 1),
            question("low", Pillar::P2, Gate::G1, Effort::Low, 2),
            question("high", Pillar::P3, Gate::G1, Effort::High, 3),
            question("done", Pillar::P4, Gate::G1, Effort::Low, 4),
        ];
        let answered = answered(&questions, &[0, 2, 0, 3]);

        let wins = rank_quick_wins(&answered, &PillarWeights::default(), &RankingRules::default());
        // High effort is excluded; a maxed answer has nothing to win
        assert_eq!(ids(&wins), vec!["low", "med"]);
        assert_eq!(wins[0].fix_hint, "Fix low");
    }

    #[test]
    fn test_quick_wins_effort_cap() {
        let questions = vec![
            question("low", Pillar::P1, Gate::G1, Effort::Low, 1),
            question("med", Pillar::P2, Gate::G1, Effort::Medium, 2),
        ];
        let answered = answered(&questions, &[1, 0]);
        let rules = RankingRules {
            quick_win_max_effort: Effort::Low,
            ..RankingRules::default()
        };
        let wins = rank_quick_wins(&answered, &PillarWeights::default(), &rules);
        assert_eq!(ids(&wins), vec!["low"]);
    }

    #[test]
    fn test_quick_wins_lower_score_first_within_effort() {
        let questions = vec![
            question("a", Pillar::P1, Gate::G1, Effort::Low, 1),
            question("b", Pillar::P2, Gate::G1, Effort::Low, 2),
        ];
        let answered = answered(&questions, &[2, 1]);
        let wins = rank_quick_wins(&answered, &PillarWeights::default(), &RankingRules::default());
        assert_eq!(ids(&wins), vec!["b", "a"]);
    }
}
