// src/config.rs
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// How documents are posted to the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadRoute {
    /// `POST /upload-document`, multipart field `document`
    #[default]
    Document,
    /// `POST /upload-resume` or `/upload-job`, field named after the kind
    PerKind,
}

/// Where pasted job text goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobTextRoute {
    /// Kept in the client as typed
    #[default]
    Local,
    /// Sent form-encoded to `/upload-job`; the returned content is stored
    Remote,
}

/// Client configuration, injected into the service client and orchestrator
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// None leaves the transport default in place
    pub timeout_seconds: Option<u64>,
    pub upload_route: UploadRoute,
    pub job_text_route: JobTextRoute,
    pub genai_enabled: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: None,
            upload_route: UploadRoute::default(),
            job_text_route: JobTextRoute::default(),
            genai_enabled: true,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    pub fn with_upload_route(mut self, route: UploadRoute) -> Self {
        self.upload_route = route;
        self
    }

    pub fn with_job_text_route(mut self, route: JobTextRoute) -> Self {
        self.job_text_route = route;
        self
    }

    pub fn with_genai(mut self, enabled: bool) -> Self {
        self.genai_enabled = enabled;
        self
    }

    /// Full URL for an endpoint path such as `/analyze`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
