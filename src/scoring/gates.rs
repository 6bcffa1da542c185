use std::collections::BTreeMap;

use super::config::{DecisionRules, GateRules};
use super::engine::AnsweredQuestion;
use super::results::GateResult;
use super::types::{Decision, Gate, GateStatus};

/// Evaluate every gate against the answered questions tagged with it.
///
/// Rules, first match wins:
/// 1. nothing answered in the gate: FAIL
/// 2. any score at or below `fail_at_or_below`: FAIL
/// 3. any score at or below `conditional_at_or_below`, or mean below
///    `pass_mean`: CONDITIONAL
/// 4. otherwise PASS
pub fn evaluate_gates(answered: &[AnsweredQuestion<'_>], rules: &GateRules) -> BTreeMap<Gate, GateResult> {
    Gate::ALL
        .into_iter()
        .map(|gate| {
            let members: Vec<&AnsweredQuestion<'_>> =
                answered.iter().filter(|a| a.question.gate == gate).collect();
            let result = evaluate_gate(&members, rules);
            tracing::debug!(
                gate = %gate,
                status = %result.status,
                answered = result.answered,
                "evaluated gate"
            );
            (gate, result)
        })
        .collect()
}

fn evaluate_gate(members: &[&AnsweredQuestion<'_>], rules: &GateRules) -> GateResult {
    let answered = members.len();
    let lowest_score = members.iter().map(|a| a.score).min();

    if members.is_empty() {
        return GateResult {
            status: GateStatus::Fail,
            answered,
            lowest_score,
            blockers: Vec::new(),
        };
    }

    let failing = ids_where(members, |s| s <= rules.fail_at_or_below);
    if !failing.is_empty() {
        return GateResult {
            status: GateStatus::Fail,
            answered,
            lowest_score,
            blockers: failing,
        };
    }

    let borderline = ids_where(members, |s| s <= rules.conditional_at_or_below);
    if !borderline.is_empty() {
        return GateResult {
            status: GateStatus::Conditional,
            answered,
            lowest_score,
            blockers: borderline,
        };
    }

    let sum: u32 = members.iter().map(|a| u32::from(a.score)).sum();
    if f64::from(sum) < rules.pass_mean * answered as f64 {
        return GateResult {
            status: GateStatus::Conditional,
            answered,
            lowest_score,
            blockers: ids_where(members, |s| f64::from(s) < rules.pass_mean),
        };
    }

    GateResult {
        status: GateStatus::Pass,
        answered,
        lowest_score,
        blockers: Vec::new(),
    }
}

fn ids_where(members: &[&AnsweredQuestion<'_>], pred: impl Fn(u8) -> bool) -> Vec<String> {
    members
        .iter()
        .filter(|a| pred(a.score))
        .map(|a| a.question.id.clone())
        .collect()
}

/// Derive the overall decision. Precedence is fixed:
/// any FAIL gate is NO-GO; a CONDITIONAL gate with the overall score below
/// `conditional_below` is GO with conditions; everything else is GO.
pub fn decide(overall: u8, gates: &BTreeMap<Gate, GateResult>, rules: &DecisionRules) -> Decision {
    let worst = gates
        .values()
        .map(|g| g.status)
        .min()
        .unwrap_or(GateStatus::Pass);

    match worst {
        GateStatus::Fail => Decision::NoGo,
        GateStatus::Conditional if overall < rules.conditional_below => Decision::GoWithConditions,
        _ => Decision::Go,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::bank::fixtures::question;
    use crate::questions::Question;
    use crate::scoring::types::{Effort, Pillar};

    fn gate_questions() -> Vec<Question> {
        vec![
            question("a", Pillar::P1, Gate::G1, Effort::Low, 1),
            question("b", Pillar::P2, Gate::G1, Effort::Low, 2),
            question("c", Pillar::P3, Gate::G1, Effort::Low, 3),
        ]
    }

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

    fn g1_status(scores: &[u8]) -> GateResult {
        let questions = gate_questions();
        let answered = answered(&questions, scores);
        evaluate_gates(&answered, &GateRules::default())
            .remove(&Gate::G1)
            .unwrap()
    }

    #[test]
    fn test_all_high_scores_pass() {
        let result = g1_status(&[3, 3, 2]);
        assert_eq!(result.status, GateStatus::Pass);
        assert_eq!(result.answered, 3);
        assert_eq!(result.lowest_score, Some(2));
        assert!(result.blockers.is_empty());
    }

    #[test]
    fn test_single_zero_fails_gate() {
        let result = g1_status(&[3, 0, 3]);
        assert_eq!(result.status, GateStatus::Fail);
        assert_eq!(result.blockers, vec!["b".to_string()]);
    }

    #[test]
    fn test_borderline_score_is_conditional() {
        let result = g1_status(&[3, 1, 3]);
        assert_eq!(result.status, GateStatus::Conditional);
        assert_eq!(result.blockers, vec!["b".to_string()]);
    }

    #[test]
    fn test_fail_beats_conditional() {
        let result = g1_status(&[1, 0, 1]);
        assert_eq!(result.status, GateStatus::Fail);
        assert_eq!(result.blockers, vec!["b".to_string()]);
    }

    #[test]
    fn test_low_mean_is_conditional() {
        let questions = gate_questions();
        let answered = answered(&questions, &[2, 2, 2]);
        let rules = GateRules {
            pass_mean: 2.5,
            ..GateRules::default()
        };
        let result = evaluate_gates(&answered, &rules).remove(&Gate::G1).unwrap();
        assert_eq!(result.status, GateStatus::Conditional);
        assert_eq!(result.blockers.len(), 3);
    }

    #[test]
    fn test_unanswered_gate_fails() {
        let questions = gate_questions();
        let answered = answered(&questions, &[3, 3, 3]);
        let gates = evaluate_gates(&answered, &GateRules::default());
        assert_eq!(gates.len(), 5);
        let g2 = &gates[&Gate::G2];
        assert_eq!(g2.status, GateStatus::Fail);
        assert_eq!(g2.answered, 0);
        assert_eq!(g2.lowest_score, None);
    }

    fn gates_with(statuses: &[GateStatus]) -> BTreeMap<Gate, GateResult> {
        Gate::ALL
            .into_iter()
            .zip(statuses)
            .map(|(gate, status)| {
                (
                    gate,
                    GateResult {
                        status: *status,
                        answered: 1,
                        lowest_score: Some(1),
                        blockers: vec![],
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_decision_fail_forces_no_go() {
        let gates = gates_with(&[
            GateStatus::Pass,
            GateStatus::Pass,
            GateStatus::Fail,
            GateStatus::Pass,
            GateStatus::Pass,
        ]);
        assert_eq!(decide(100, &gates, &DecisionRules::default()), Decision::NoGo);
    }

    #[test]
    fn test_decision_conditional_below_threshold() {
        let gates = gates_with(&[GateStatus::Conditional; 5]);
        assert_eq!(
            decide(74, &gates, &DecisionRules::default()),
            Decision::GoWithConditions
        );
    }

    #[test]
    fn test_decision_conditional_at_threshold_is_go() {
        let gates = gates_with(&[GateStatus::Conditional; 5]);
        assert_eq!(decide(75, &gates, &DecisionRules::default()), Decision::Go);
    }

    #[test]
    fn test_decision_all_pass_is_go() {
        let gates = gates_with(&[GateStatus::Pass; 5]);
        assert_eq!(decide(0, &gates, &DecisionRules::default()), Decision::Go);
        assert_eq!(decide(100, &gates, &DecisionRules::default()), Decision::Go);
    }

    #[test]
    fn test_decision_is_total() {
        let statuses = [GateStatus::Pass, GateStatus::Conditional, GateStatus::Fail];
        for first in statuses {
            for second in statuses {
                let gates = gates_with(&[first, second, GateStatus::Pass, GateStatus::Pass, GateStatus::Pass]);
                for overall in [0u8, 50, 74, 75, 100] {
                    let decision = decide(overall, &gates, &DecisionRules::default());
                    assert!(Decision::ALL.contains(&decision));
                    if first == GateStatus::Fail || second == GateStatus::Fail {
                        assert_eq!(decision, Decision::NoGo);
                    }
                }
            }
        }
    }
}
