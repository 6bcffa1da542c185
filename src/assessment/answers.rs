use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One submitted answer as it arrives from a respondent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: String,
    pub score: u8,
}

/// Answers keyed by question id. Re-inserting a key overwrites the earlier
/// score; nothing is appended.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, u8>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from submitted entries. Later duplicates win.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = AnswerEntry>,
    {
        let mut set = Self::new();
        for entry in entries {
            set.insert(entry.question_id, entry.score);
        }
        set
    }

    /// Record a score, returning the one it replaced.
    pub fn insert(&mut self, question_id: String, score: u8) -> Option<u8> {
        self.0.insert(question_id, score)
    }

    pub fn get(&self, question_id: &str) -> Option<u8> {
        self.0.get(question_id).copied()
    }

    /// Answers in question id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(id, score)| (id.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, score: u8) -> AnswerEntry {
        AnswerEntry {
            question_id: id.to_string(),
            score,
        }
    }

    #[test]
    fn test_last_write_wins() {
        let set = AnswerSet::from_entries(vec![entry("q1", 1), entry("q2", 3), entry("q1", 2)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("q1"), Some(2));
        assert_eq!(set.get("q2"), Some(3));
    }

    #[test]
    fn test_insert_returns_previous() {
        let mut set = AnswerSet::new();
        assert_eq!(set.insert("q1".to_string(), 0), None);
        assert_eq!(set.insert("q1".to_string(), 3), Some(0));
        assert_eq!(set.get("q1"), Some(3));
    }

    #[test]
    fn test_parse_submission() {
        let json = r#"[{"questionId":"q1","score":2},{"questionId":"q2","score":3}]"#;
        let entries: Vec<AnswerEntry> = serde_json::from_str(json).unwrap();
        let set = AnswerSet::from_entries(entries);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("q1"), Some(2));
    }

    #[test]
    fn test_iter_in_id_order() {
        let set = AnswerSet::from_entries(vec![entry("b", 1), entry("a", 2)]);
        let ids: Vec<&str> = set.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
