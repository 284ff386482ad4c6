// src/core/backend.rs
//! The seam between the orchestrator and the remote analysis service

use async_trait::async_trait;

use super::error::CallResult;
use crate::types::{AnalysisResult, DocumentSlot, DocumentUpload, UploadedDocument};

/// Remote analysis service. Every method is one independent HTTP call.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Upload a document and get back its extracted text
    async fn upload_document(
        &self,
        slot: DocumentSlot,
        upload: &DocumentUpload,
    ) -> CallResult<UploadedDocument>;

    /// Send pasted job text; returns the content the service stored
    async fn upload_job_text(&self, text: &str) -> CallResult<String>;

    async fn analyze(&self, resume_text: &str, job_text: &str) -> CallResult<AnalysisResult>;

    async fn summarize_resume(&self, resume_text: &str) -> CallResult<String>;

    async fn generate_recommendations(&self, resume_text: &str) -> CallResult<Vec<String>>;

    async fn analyze_discrepancies(&self, resume_text: &str, job_text: &str)
        -> CallResult<String>;
}
