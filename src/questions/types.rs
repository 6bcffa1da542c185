use serde::{Deserialize, Serialize};

use crate::scoring::types::{Effort, Gate, Pillar};

/// A questionnaire item. Belongs to exactly one pillar and one gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Stable key that answers reference
    pub id: String,
    /// Human-facing code, e.g. "INF-03"
    pub qid: String,
    pub pillar: Pillar,
    pub gate: Gate,
    pub text: String,
    #[serde(default)]
    pub why_it_matters: String,
    #[serde(default)]
    pub evidence_to_check: String,
    pub effort: Effort,
    pub fix_hint: String,
    pub risk_text: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_active() -> bool {
    true
}

impl Question {
    /// Key used for stable display and tie-breaking: `(sort_order, id)`.
    pub fn stable_key(&self) -> (i32, &str) {
        (self.sort_order, self.id.as_str())
    }

    /// Test fixtures created through the admin flow carry a `TEST` qid prefix.
    pub fn is_test_fixture(&self) -> bool {
        self.qid.starts_with("TEST")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_question() {
        let yaml = r#"
id: q-infra-1
qid: INF-01
pillar: P3
gate: G2
text: Are all customizations documented?
effort: M
fixHint: Build a customization inventory
riskText: Undocumented customizations break on upgrade
"#;
        let q: Question = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(q.pillar, Pillar::P3);
        assert_eq!(q.gate, Gate::G2);
        assert_eq!(q.effort, Effort::Medium);
        assert!(q.active);
        assert_eq!(q.sort_order, 0);
        assert!(q.why_it_matters.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_gate() {
        let yaml = r#"
id: q1
qid: X
pillar: P1
gate: G9
text: t
effort: L
fixHint: f
riskText: r
"#;
        let result: Result<Question, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_test_fixture() {
        let json = r#"{"id":"a","qid":"TEST1","pillar":"P1","gate":"G1","text":"t","effort":"L","fixHint":"f","riskText":"r"}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert!(q.is_test_fixture());
    }
}
