// src/types/response.rs
//! Wire formats returned by the analysis service, and their validation

use serde::{Deserialize, Serialize};

use crate::core::{CallError, CallResult};
use crate::types::{AnalysisResult, SkillMatch, UploadedDocument};

// ===== Request bodies =====

#[derive(Debug, Serialize)]
pub struct ResumeTextRequest<'a> {
    pub resume_text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResumeJobRequest<'a> {
    pub resume_text: &'a str,
    pub job_text: &'a str,
}

// ===== Service Response Types =====

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub filename: Option<String>,
    pub content: Option<String>,
}

impl UploadResponse {
    pub fn into_document(self) -> CallResult<UploadedDocument> {
        let filename = non_empty(self.filename, "filename")?;
        let content = non_empty(self.content, "content")?;
        Ok(UploadedDocument { filename, content })
    }
}

/// Response of the form-encoded job text path
#[derive(Debug, Deserialize)]
pub struct JobTextResponse {
    pub content: Option<String>,
}

impl JobTextResponse {
    pub fn into_content(self) -> CallResult<String> {
        non_empty(self.content, "content")
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(rename = "resumeSkills")]
    pub resume_skills: Option<Vec<SkillMatch>>,
    #[serde(rename = "jobSkills")]
    pub job_skills: Option<Vec<SkillMatch>>,
    pub skills: Option<Vec<SkillMatch>>,
    pub similarity: Option<f64>,
}

impl TryFrom<AnalyzeResponse> for AnalysisResult {
    type Error = CallError;

    fn try_from(response: AnalyzeResponse) -> CallResult<Self> {
        let similarity = response
            .similarity
            .ok_or_else(|| CallError::Malformed("missing field `similarity`".to_string()))?;
        if !similarity.is_finite() {
            return Err(CallError::Malformed(format!(
                "similarity is not a finite number: {}",
                similarity
            )));
        }

        match (response.resume_skills, response.skills) {
            (Some(resume_skills), _) => Ok(AnalysisResult::Split {
                resume_skills,
                job_skills: response.job_skills.unwrap_or_default(),
                similarity,
            }),
            (None, Some(skills)) => Ok(AnalysisResult::Legacy { skills, similarity }),
            (None, None) => Err(CallError::Malformed(
                "missing field `resumeSkills` or `skills`".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    pub summary: Option<String>,
}

impl SummaryResponse {
    pub fn into_summary(self) -> CallResult<String> {
        non_blank(self.summary, "summary")
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Option<Vec<String>>,
}

impl RecommendationsResponse {
    /// Blank entries are dropped; an empty list is malformed
    pub fn into_recommendations(self) -> CallResult<Vec<String>> {
        let items: Vec<String> = self
            .recommendations
            .ok_or_else(|| CallError::Malformed("missing field `recommendations`".to_string()))?
            .into_iter()
            .filter(|item| !item.trim().is_empty())
            .collect();

        if items.is_empty() {
            return Err(CallError::Malformed(
                "field `recommendations` is empty".to_string(),
            ));
        }
        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
pub struct DiscrepanciesResponse {
    pub discrepancies: Option<String>,
}

impl DiscrepanciesResponse {
    pub fn into_discrepancies(self) -> CallResult<String> {
        non_blank(self.discrepancies, "discrepancies")
    }
}

/// Banner returned by `GET /`
#[derive(Debug, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Parse a 2xx body; anything unparseable counts as malformed
pub fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> CallResult<T> {
    serde_json::from_str(body).map_err(|e| CallError::Malformed(e.to_string()))
}

/// Generated text must carry more than whitespace
fn non_blank(value: Option<String>, field: &str) -> CallResult<String> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(CallError::Malformed(format!("field `{}` is empty", field)))
        }
        other => non_empty(other, field),
    }
}

fn non_empty(value: Option<String>, field: &str) -> CallResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(CallError::Malformed(format!("field `{}` is empty", field))),
        None => Err(CallError::Malformed(format!("missing field `{}`", field))),
    }
}
