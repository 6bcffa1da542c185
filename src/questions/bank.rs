use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

use super::types::Question;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("question '{qid}' has an empty id")]
    EmptyId { qid: String },

    #[error("duplicate question id '{0}'")]
    DuplicateId(String),
}

/// The question bank, kept in stable `(sort_order, id)` order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

/// On-disk shape of a bank file.
#[derive(Debug, Serialize, Deserialize)]
struct BankFile {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(mut questions: Vec<Question>) -> Result<Self, BankError> {
        let mut seen = HashSet::new();
        for q in &questions {
            if q.id.trim().is_empty() {
                return Err(BankError::EmptyId { qid: q.qid.clone() });
            }
            if !seen.insert(q.id.as_str()) {
                return Err(BankError::DuplicateId(q.id.clone()));
            }
        }
        questions.sort_by(|a, b| a.stable_key().cmp(&b.stable_key()));
        Ok(Self { questions })
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// All questions, active or not, in stable order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Active questions in stable order.
    pub fn active(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.active)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Add one question, keeping the bank ordered.
    ///
    /// The bank is unchanged when the question's id is empty or already taken.
    pub fn add(&mut self, question: Question) -> Result<(), BankError> {
        let mut questions = self.questions.clone();
        questions.push(question);
        *self = QuestionBank::new(questions)?;
        Ok(())
    }

    /// Drop admin-created test fixtures. Returns how many were removed.
    pub fn remove_test_fixtures(&mut self) -> usize {
        let before = self.questions.len();
        self.questions.retain(|q| !q.is_test_fixture());
        before - self.questions.len()
    }
}

/// Load a question bank from a YAML file of the form `questions: [...]`.
pub fn load_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read question bank at {}", path.display()))?;

    let file: BankFile = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse question bank: invalid YAML in {}", path.display()))?;

    let bank = QuestionBank::new(file.questions)
        .with_context(|| format!("Invalid question bank in {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        total = bank.len(),
        active = bank.active().count(),
        "loaded question bank"
    );

    Ok(bank)
}

/// Load a single question from a YAML file.
pub fn load_question(path: &Path) -> Result<Question> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read question at {}", path.display()))?;

    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse question: invalid YAML in {}", path.display()))
}

/// Write a question bank back to YAML atomically.
pub fn save_bank(path: &Path, bank: &QuestionBank) -> Result<()> {
    let file = BankFile {
        questions: bank.questions.clone(),
    };
    let yaml = serde_saphyr::to_string(&file)
        .map_err(|e| anyhow::anyhow!("Failed to serialize question bank: {}", e))?;

    let mut out = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    out.write_all(yaml.as_bytes())
        .context("Failed to write question bank")?;
    out.commit().context("Failed to save question bank")?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::questions::Question;
    use crate::scoring::types::{Effort, Gate, Pillar};

    pub fn question(id: &str, pillar: Pillar, gate: Gate, effort: Effort, sort_order: i32) -> Question {
        Question {
            id: id.to_string(),
            qid: id.to_uppercase(),
            pillar,
            gate,
            text: format!("Question {}?", id),
            why_it_matters: String::new(),
            evidence_to_check: String::new(),
            effort,
            fix_hint: format!("Fix {}", id),
            risk_text: format!("Risk {}", id),
            active: true,
            sort_order,
        }
    }

    /// 25 questions: every pillar covered, gates assigned round-robin,
    /// efforts cycling L, M, H.
    pub fn standard_bank() -> Vec<Question> {
        (0..25)
            .map(|i| {
                let pillar = Pillar::ALL[i % 10];
                let gate = Gate::ALL[i % 5];
                let effort = Effort::ALL[i % 3];
                question(&format!("q{:02}", i + 1), pillar, gate, effort, i as i32)
            })
            .collect()
    }
}
