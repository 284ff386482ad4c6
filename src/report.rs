// src/report.rs
//! Terminal rendering of analysis results

use anyhow::{Context, Result};
use serde::Serialize;

use crate::orchestrator::OrchestratorState;
use crate::types::{AnalysisResult, GenAiResult, SkillMatch};
use crate::utils::format_percent;

#[derive(Serialize)]
struct ResultsView<'a> {
    #[serde(rename = "analysisResults")]
    analysis_results: Option<&'a AnalysisResult>,
    #[serde(rename = "genAIResults")]
    genai_results: Option<&'a GenAiResult>,
}

pub fn render_text(state: &OrchestratorState) -> String {
    let mut out = String::new();
    out.push_str("Analysis Results\n================\n");

    let Some(analysis) = &state.analysis_results else {
        out.push_str("No results to display yet.\n");
        if let Some(genai) = &state.genai_results {
            render_genai(&mut out, genai);
        }
        return out;
    };

    match analysis.job_skills() {
        Some(job_skills) => {
            render_skills(&mut out, "Résumé Skills Extracted:", analysis.resume_skills());
            render_skills(&mut out, "Job Skills Extracted:", job_skills);
        }
        None => render_skills(&mut out, "Skills Extracted:", analysis.resume_skills()),
    }

    out.push_str(&format!(
        "\nSimilarity Score: {}\n",
        format_percent(analysis.similarity())
    ));

    if let Some(genai) = &state.genai_results {
        render_genai(&mut out, genai);
    }

    out
}

fn render_skills(out: &mut String, title: &str, skills: &[SkillMatch]) {
    out.push_str(&format!("\n{}\n", title));
    if skills.is_empty() {
        out.push_str("  (none)\n");
    }
    for skill in skills {
        out.push_str(&format!(
            "  - {} (Confidence: {})\n",
            skill.word,
            format_percent(skill.score)
        ));
    }
}

fn render_genai(out: &mut String, genai: &GenAiResult) {
    if let Some(summary) = &genai.summary {
        out.push_str(&format!("\nRésumé Summary:\n{}\n", summary.trim()));
    }
    if let Some(recommendations) = &genai.recommendations {
        out.push_str("\nRecommendations:\n");
        for (i, item) in recommendations.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, item));
        }
    }
    if let Some(discrepancies) = &genai.discrepancies {
        out.push_str(&format!("\nGap Analysis:\n{}\n", discrepancies.trim()));
    }
}

pub fn render_json(state: &OrchestratorState) -> Result<String> {
    let view = ResultsView {
        analysis_results: state.analysis_results.as_ref(),
        genai_results: state.genai_results.as_ref(),
    };
    serde_json::to_string_pretty(&view).context("Failed to serialize results")
}
