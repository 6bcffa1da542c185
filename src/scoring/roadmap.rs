use super::results::{RankedItem, RoadmapItem, RoadmapPhase, RoadmapSource};
use super::types::Effort;

fn phase_title(effort: Effort) -> (&'static str, &'static str) {
    match effort {
        Effort::Low => ("Quick wins", "0-30 days"),
        Effort::Medium => ("Short term", "30-90 days"),
        Effort::High => ("Strategic", "90+ days"),
    }
}

/// Merge top risks and quick wins into effort-tiered phases.
///
/// Risks come first, then quick wins not already listed. A question on both
/// lists appears once, marked `Both`. Phases run low to high effort and
/// empty phases are dropped.
pub fn build_roadmap(top_risks: &[RankedItem], quick_wins: &[RankedItem]) -> Vec<RoadmapPhase> {
    let mut merged: Vec<(&RankedItem, RoadmapSource)> = Vec::new();
    for risk in top_risks {
        let source = if quick_wins.iter().any(|w| w.question_id == risk.question_id) {
            RoadmapSource::Both
        } else {
            RoadmapSource::Risk
        };
        merged.push((risk, source));
    }
    for win in quick_wins {
        if !merged.iter().any(|(item, _)| item.question_id == win.question_id) {
            merged.push((win, RoadmapSource::QuickWin));
        }
    }

    Effort::ALL
        .into_iter()
        .filter_map(|effort| {
            let items: Vec<RoadmapItem> = merged
                .iter()
                .filter(|(item, _)| item.effort == effort)
                .map(|(item, source)| RoadmapItem {
                    question_id: item.question_id.clone(),
                    qid: item.qid.clone(),
                    pillar: item.pillar,
                    gate: item.gate,
                    action: item.fix_hint.clone(),
                    source: *source,
                })
                .collect();
            if items.is_empty() {
                return None;
            }
            let (title, horizon) = phase_title(effort);
            Some(RoadmapPhase {
                effort,
                title: title.to_string(),
                horizon: horizon.to_string(),
                items,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::types::{Gate, Pillar};

    fn item(id: &str, effort: Effort) -> RankedItem {
        RankedItem {
            question_id: id.to_string(),
            qid: id.to_uppercase(),
            pillar: Pillar::P1,
            gate: Gate::G1,
            score: 0,
            effort,
            text: String::new(),
            fix_hint: format!("Fix {}", id),
            risk_text: String::new(),
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert!(build_roadmap(&[], &[]).is_empty());
    }

    #[test]
    fn test_phases_ordered_by_effort() {
        let risks = vec![item("h", Effort::High), item("l", Effort::Low)];
        let wins = vec![item("m", Effort::Medium)];
        let roadmap = build_roadmap(&risks, &wins);

        let efforts: Vec<Effort> = roadmap.iter().map(|p| p.effort).collect();
        assert_eq!(efforts, vec![Effort::Low, Effort::Medium, Effort::High]);
        assert_eq!(roadmap[0].title, "Quick wins");
        assert_eq!(roadmap[2].horizon, "90+ days");
        assert_eq!(roadmap[1].items[0].action, "Fix m");
    }

    #[test]
    fn test_overlap_listed_once_as_both() {
        let risks = vec![item("a", Effort::Low), item("b", Effort::Low)];
        let wins = vec![item("b", Effort::Low), item("c", Effort::Low)];
        let roadmap = build_roadmap(&risks, &wins);

        assert_eq!(roadmap.len(), 1);
        let items = &roadmap[0].items;
        let ids: Vec<&str> = items.iter().map(|i| i.question_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(items[0].source, RoadmapSource::Risk);
        assert_eq!(items[1].source, RoadmapSource::Both);
        assert_eq!(items[2].source, RoadmapSource::QuickWin);
    }

    #[test]
    fn test_empty_phase_omitted() {
        let roadmap = build_roadmap(&[item("h", Effort::High)], &[]);
        assert_eq!(roadmap.len(), 1);
        assert_eq!(roadmap[0].effort, Effort::High);
        assert_eq!(roadmap[0].title, "Strategic");
    }
}
