// src/core/service_client.rs
//! HTTP client for the résumé analysis service

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info, trace};

use super::backend::AnalysisBackend;
use super::error::{CallError, CallResult};
use crate::config::{ClientConfig, UploadRoute};
use crate::types::{
    response::{
        parse_body, AnalyzeResponse, DiscrepanciesResponse, JobTextResponse,
        RecommendationsResponse, ResumeJobRequest, ResumeTextRequest, RootResponse,
        SummaryResponse, UploadResponse,
    },
    AnalysisResult, DocumentSlot, DocumentUpload, UploadedDocument,
};
use crate::utils;

const ROOT_ENDPOINT: &str = "/";
const UPLOAD_DOCUMENT_ENDPOINT: &str = "/upload-document";
const UPLOAD_RESUME_ENDPOINT: &str = "/upload-resume";
const UPLOAD_JOB_ENDPOINT: &str = "/upload-job";
const ANALYZE_ENDPOINT: &str = "/analyze";
const SUMMARIZE_ENDPOINT: &str = "/summarize-resume";
const RECOMMENDATIONS_ENDPOINT: &str = "/generate-recommendations";
const DISCREPANCIES_ENDPOINT: &str = "/analyze-discrepancies";

const DOCUMENT_FIELD: &str = "document";

pub struct ServiceClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(seconds));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Service banner from `GET /`
    pub async fn health(&self) -> CallResult<String> {
        let url = self.config.endpoint(ROOT_ENDPOINT);
        info!("Checking analysis service: {}", url);

        let response = self.client.get(&url).send().await?;
        let body = Self::read_body(response, ROOT_ENDPOINT).await?;
        let root: RootResponse = parse_body(&body)?;
        Ok(root.message)
    }

    /// Endpoint and multipart field for a document upload
    fn upload_target(&self, slot: DocumentSlot) -> (&'static str, &'static str) {
        match (self.config.upload_route, slot) {
            (UploadRoute::Document, _) => (UPLOAD_DOCUMENT_ENDPOINT, DOCUMENT_FIELD),
            (UploadRoute::PerKind, DocumentSlot::Resume) => {
                (UPLOAD_RESUME_ENDPOINT, slot.field_name())
            }
            (UploadRoute::PerKind, DocumentSlot::Job) => (UPLOAD_JOB_ENDPOINT, slot.field_name()),
        }
    }

    /// Read the body of a response, turning non-2xx into `CallError::Status`
    async fn read_body(response: reqwest::Response, endpoint: &str) -> CallResult<String> {
        let status = response.status();
        trace!("Response status from {}: {}", endpoint, status);

        if status.is_success() {
            let body = response.text().await?;
            trace!("Raw response from {}: {}", endpoint, body);
            Ok(body)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Service error from {} ({}): {}", endpoint, status, body);
            Err(CallError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// POST a JSON payload and parse the JSON answer
    async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> CallResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint(endpoint);
        trace!("Calling analysis service: {}", url);

        let response = self.client.post(&url).json(payload).send().await?;
        let body = Self::read_body(response, endpoint).await?;
        parse_body(&body)
    }
}

#[async_trait]
impl AnalysisBackend for ServiceClient {
    async fn upload_document(
        &self,
        slot: DocumentSlot,
        upload: &DocumentUpload,
    ) -> CallResult<UploadedDocument> {
        let (endpoint, field) = self.upload_target(slot);
        let url = self.config.endpoint(endpoint);
        let content_type = utils::content_type_for(&upload.filename);

        let form = Form::new().part(
            field,
            Part::bytes(upload.bytes.clone())
                .file_name(upload.filename.clone())
                .mime_str(content_type)
                .map_err(|e| CallError::InvalidRequest(e.to_string()))?,
        );

        info!(
            "Uploading {} ({} bytes) to {}",
            upload.filename,
            upload.bytes.len(),
            url
        );

        let response = self.client.post(&url).multipart(form).send().await?;
        let body = Self::read_body(response, endpoint).await?;
        parse_body::<UploadResponse>(&body)?.into_document()
    }

    async fn upload_job_text(&self, text: &str) -> CallResult<String> {
        let url = self.config.endpoint(UPLOAD_JOB_ENDPOINT);
        info!("Sending job text ({} chars) to {}", text.len(), url);

        let response = self
            .client
            .post(&url)
            .form(&[("job_text", text)])
            .send()
            .await?;
        let body = Self::read_body(response, UPLOAD_JOB_ENDPOINT).await?;
        parse_body::<JobTextResponse>(&body)?.into_content()
    }

    async fn analyze(&self, resume_text: &str, job_text: &str) -> CallResult<AnalysisResult> {
        let payload = ResumeJobRequest {
            resume_text,
            job_text,
        };
        let response: AnalyzeResponse = self.post_json(ANALYZE_ENDPOINT, &payload).await?;
        AnalysisResult::try_from(response)
    }

    async fn summarize_resume(&self, resume_text: &str) -> CallResult<String> {
        let payload = ResumeTextRequest { resume_text };
        let response: SummaryResponse = self.post_json(SUMMARIZE_ENDPOINT, &payload).await?;
        response.into_summary()
    }

    async fn generate_recommendations(&self, resume_text: &str) -> CallResult<Vec<String>> {
        let payload = ResumeTextRequest { resume_text };
        let response: RecommendationsResponse =
            self.post_json(RECOMMENDATIONS_ENDPOINT, &payload).await?;
        response.into_recommendations()
    }

    async fn analyze_discrepancies(
        &self,
        resume_text: &str,
        job_text: &str,
    ) -> CallResult<String> {
        let payload = ResumeJobRequest {
            resume_text,
            job_text,
        };
        let response: DiscrepanciesResponse =
            self.post_json(DISCREPANCIES_ENDPOINT, &payload).await?;
        response.into_discrepancies()
    }
}
