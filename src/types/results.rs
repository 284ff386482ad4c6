// src/types/results.rs
//! Analysis and generative-AI results as published to the view

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub word: String,
    pub score: f64,
}

/// Skill extraction + similarity. The service has returned two shapes over time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Split {
        #[serde(rename = "resumeSkills")]
        resume_skills: Vec<SkillMatch>,
        #[serde(rename = "jobSkills")]
        job_skills: Vec<SkillMatch>,
        similarity: f64,
    },
    Legacy {
        skills: Vec<SkillMatch>,
        similarity: f64,
    },
}

impl AnalysisResult {
    pub fn similarity(&self) -> f64 {
        match self {
            Self::Split { similarity, .. } | Self::Legacy { similarity, .. } => *similarity,
        }
    }

    pub fn resume_skills(&self) -> &[SkillMatch] {
        match self {
            Self::Split { resume_skills, .. } => resume_skills,
            Self::Legacy { skills, .. } => skills,
        }
    }

    /// Only the split shape carries job skills
    pub fn job_skills(&self) -> Option<&[SkillMatch]> {
        match self {
            Self::Split { job_skills, .. } => Some(job_skills),
            Self::Legacy { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenAiResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discrepancies: Option<String>,
}

impl GenAiResult {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.recommendations.is_none() && self.discrepancies.is_none()
    }
}
