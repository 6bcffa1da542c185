use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answers::{AnswerEntry, AnswerSet};
use crate::scoring::Results;

/// Storage format version written by this build.
pub const ASSESSMENT_VERSION: u32 = 1;

/// Respondent and migration context captured at intake.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub role: String,
    pub erp: String,
    #[serde(default)]
    pub epicor_version: Option<String>,
    pub timeline: String,
}

/// A results document together with when it was calculated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletedResults {
    pub calculated_at: DateTime<Utc>,
    pub results: Results,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub version: u32,
    pub id: String,
    pub profile: Profile,
    #[serde(default)]
    pub answers: AnswerSet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub completed: Option<CompletedResults>,
}

impl Assessment {
    /// Create an empty assessment for a new respondent.
    pub fn start(profile: Profile, now: DateTime<Utc>) -> Self {
        Self {
            version: ASSESSMENT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            profile,
            answers: AnswerSet::new(),
            created_at: now,
            updated_at: now,
            completed: None,
        }
    }

    /// Replace the whole answer set. Later duplicates within `entries` win.
    /// Previously calculated results stay until the next calculation.
    pub fn replace_answers<I>(&mut self, entries: I, now: DateTime<Utc>)
    where
        I: IntoIterator<Item = AnswerEntry>,
    {
        self.answers = AnswerSet::from_entries(entries);
        self.updated_at = now;
    }

    /// Store a freshly calculated results document, replacing any earlier one.
    pub fn record_results(&mut self, results: Results, now: DateTime<Utc>) {
        self.completed = Some(CompletedResults {
            calculated_at: now,
            results,
        });
        self.updated_at = now;
    }

    pub fn is_completed(&self) -> bool {
        self.completed.is_some()
    }

    pub fn results(&self) -> Option<&Results> {
        self.completed.as_ref().map(|c| &c.results)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::profile;
    use super::*;
    use chrono::Duration;

    fn entry(id: &str, score: u8) -> AnswerEntry {
        AnswerEntry {
            question_id: id.to_string(),
            score,
        }
    }

    #[test]
    fn test_start_is_empty() {
        let now = Utc::now();
        let assessment = Assessment::start(profile(), now);
        assert_eq!(assessment.version, ASSESSMENT_VERSION);
        assert!(assessment.answers.is_empty());
        assert!(!assessment.is_completed());
        assert_eq!(assessment.created_at, now);
        assert!(uuid::Uuid::parse_str(&assessment.id).is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        let now = Utc::now();
        let a = Assessment::start(profile(), now);
        let b = Assessment::start(profile(), now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_replace_answers_discards_previous_set() {
        let now = Utc::now();
        let mut assessment = Assessment::start(profile(), now);
        assessment.replace_answers(vec![entry("q1", 1), entry("q2", 2)], now);
        let later = now + Duration::minutes(5);
        assessment.replace_answers(vec![entry("q2", 3)], later);

        assert_eq!(assessment.answers.len(), 1);
        assert_eq!(assessment.answers.get("q1"), None);
        assert_eq!(assessment.answers.get("q2"), Some(3));
        assert_eq!(assessment.updated_at, later);
    }

    #[test]
    fn test_profile_wire_names() {
        let json = r#"{
            "name": "John Manufacturing",
            "email": "john@manufacturing.com",
            "companyName": "Manufacturing Corp Ltd",
            "role": "IT Director",
            "erp": "Epicor",
            "epicorVersion": "10.2.700",
            "timeline": "6-12 months"
        }"#;
        let parsed: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, profile());
    }
}
