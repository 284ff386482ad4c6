// src/types/slot.rs
//! Input slots: the résumé channel and the two job-description channels

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Which document channel a file upload targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSlot {
    Resume,
    Job,
}

impl DocumentSlot {
    /// Multipart field name used by the per-kind upload endpoints
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Resume => "resume",
            Self::Job => "job",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Resume => "Résumé",
            Self::Job => "Job description",
        }
    }
}

impl std::str::FromStr for DocumentSlot {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "resume" | "cv" => Ok(Self::Resume),
            "job" | "job-description" => Ok(Self::Job),
            other => anyhow::bail!("Unknown document kind: {}. Use resume or job", other),
        }
    }
}

/// A file read from disk, ready to be sent as multipart
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(Self { filename, bytes })
    }
}

/// A validated upload response: both fields present and non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadSlot {
    pub uploaded: bool,
    pub filename: String,
    pub content: String,
}

impl UploadSlot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_document(document: UploadedDocument) -> Self {
        Self {
            uploaded: true,
            filename: document.filename,
            content: document.content,
        }
    }

    /// Pasted text slot. Blank text yields an empty slot.
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::empty();
        }
        Self {
            uploaded: true,
            filename: String::new(),
            content: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobInputState {
    Empty,
    FileOnly,
    TextOnly,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobSource {
    File,
    Text,
}

/// Job description input: an uploaded file and pasted text, tracked separately
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobInput {
    pub file: UploadSlot,
    pub text: UploadSlot,
}

impl JobInput {
    pub fn state(&self) -> JobInputState {
        match (self.file.uploaded, self.text.uploaded) {
            (false, false) => JobInputState::Empty,
            (true, false) => JobInputState::FileOnly,
            (false, true) => JobInputState::TextOnly,
            (true, true) => JobInputState::Both,
        }
    }

    /// The file wins when both sources are present.
    pub fn active_source(&self) -> Option<JobSource> {
        match self.state() {
            JobInputState::Empty => None,
            JobInputState::FileOnly | JobInputState::Both => Some(JobSource::File),
            JobInputState::TextOnly => Some(JobSource::Text),
        }
    }

    pub fn active_content(&self) -> Option<&str> {
        self.active_source().map(|source| match source {
            JobSource::File => self.file.content.as_str(),
            JobSource::Text => self.text.content.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_slot(content: &str) -> UploadSlot {
        UploadSlot::from_document(UploadedDocument {
            filename: "job.pdf".to_string(),
            content: content.to_string(),
        })
    }

    #[test]
    fn test_blank_text_yields_empty_slot() {
        assert_eq!(UploadSlot::from_text("   \n\t"), UploadSlot::empty());
        assert!(!UploadSlot::from_text("").uploaded);
    }

    #[test]
    fn test_text_slot_keeps_exact_text() {
        let slot = UploadSlot::from_text("Senior backend engineer, 5 years Go");
        assert!(slot.uploaded);
        assert_eq!(slot.content, "Senior backend engineer, 5 years Go");
    }

    #[test]
    fn test_job_input_states() {
        let mut job = JobInput::default();
        assert_eq!(job.state(), JobInputState::Empty);
        assert_eq!(job.active_content(), None);

        job.text = UploadSlot::from_text("pasted");
        assert_eq!(job.state(), JobInputState::TextOnly);
        assert_eq!(job.active_content(), Some("pasted"));

        job.file = file_slot("from file");
        assert_eq!(job.state(), JobInputState::Both);
        assert_eq!(job.active_source(), Some(JobSource::File));
        assert_eq!(job.active_content(), Some("from file"));

        job.text = UploadSlot::empty();
        assert_eq!(job.state(), JobInputState::FileOnly);
    }

    #[test]
    fn test_document_slot_parsing() {
        assert_eq!("resume".parse::<DocumentSlot>().unwrap(), DocumentSlot::Resume);
        assert_eq!("JOB".parse::<DocumentSlot>().unwrap(), DocumentSlot::Job);
        assert!("cover-letter".parse::<DocumentSlot>().is_err());
        assert_eq!(DocumentSlot::Job.field_name(), "job");
    }
}
