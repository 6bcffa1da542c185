use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use super::types::{Assessment, ASSESSMENT_VERSION};

/// Directory holding one JSON file per assessment.
pub fn assessments_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("assessments")
}

fn assessment_path(data_dir: &Path, id: &str) -> Result<PathBuf> {
    // Ids become file names; refuse anything that could escape the directory
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        anyhow::bail!("Invalid assessment id '{}'", id);
    }
    Ok(assessments_dir(data_dir).join(format!("{}.json", id)))
}

/// Load an assessment by id.
///
/// Fails if the file is missing, malformed, or written by an unsupported
/// storage version.
pub fn load_assessment(data_dir: &Path, id: &str) -> Result<Assessment> {
    let path = assessment_path(data_dir, id)?;
    if !path.exists() {
        anyhow::bail!("Assessment '{}' not found", id);
    }
    read_assessment(&path)
}

fn read_assessment(path: &Path) -> Result<Assessment> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open assessment file at {}", path.display()))?;

    let assessment: Assessment = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load assessment from {}", path.display()))?;

    if assessment.version != ASSESSMENT_VERSION {
        anyhow::bail!("Unsupported assessment version: {}", assessment.version);
    }

    Ok(assessment)
}

/// Save an assessment to JSON atomically
///
/// Readers never observe a half-written file; concurrent writers resolve to
/// whichever commits last.
pub fn save_assessment(data_dir: &Path, assessment: &Assessment) -> Result<()> {
    let path = assessment_path(data_dir, &assessment.id)?;
    crate::config::ensure_dir(&assessments_dir(data_dir))?;

    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, assessment).context("Failed to serialize assessment")?;

    file.commit().context("Failed to save assessment")?;

    tracing::debug!(id = %assessment.id, path = %path.display(), "saved assessment");
    Ok(())
}

/// Load every stored assessment, oldest first (ties broken by id).
///
/// Unreadable files are skipped with a warning so one bad record does not
/// hide the rest.
pub fn list_assessments(data_dir: &Path) -> Result<Vec<Assessment>> {
    let dir = assessments_dir(data_dir);
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut assessments = Vec::new();
    let entries = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read assessments directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match read_assessment(&path) {
            Ok(a) => assessments.push(a),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable assessment"),
        }
    }

    assessments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    Ok(assessments)
}
