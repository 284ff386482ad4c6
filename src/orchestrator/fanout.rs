// src/orchestrator/fanout.rs
//! Concurrent analysis calls with per-call outcomes

use futures::future::join_all;
use serde::Serialize;

use crate::core::{AnalysisBackend, CallError, CallResult};
use crate::types::{AnalysisResult, GenAiResult};

/// Texts sent to the analysis endpoints, resolved from the slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisInputs {
    pub resume_text: String,
    pub job_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisTask {
    Analyze,
    Summary,
    Recommendations,
    Discrepancies,
}

impl AnalysisTask {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::Summary => "summarize-resume",
            Self::Recommendations => "generate-recommendations",
            Self::Discrepancies => "analyze-discrepancies",
        }
    }

    /// Tasks for one analysis run; the generative-AI calls are optional
    pub fn planned(genai_enabled: bool) -> Vec<Self> {
        if genai_enabled {
            vec![
                Self::Analyze,
                Self::Summary,
                Self::Recommendations,
                Self::Discrepancies,
            ]
        } else {
            vec![Self::Analyze]
        }
    }

    async fn run<B>(self, backend: &B, inputs: &AnalysisInputs) -> CallResult<TaskOutput>
    where
        B: AnalysisBackend + ?Sized,
    {
        match self {
            Self::Analyze => backend
                .analyze(&inputs.resume_text, &inputs.job_text)
                .await
                .map(TaskOutput::Analysis),
            Self::Summary => backend
                .summarize_resume(&inputs.resume_text)
                .await
                .map(TaskOutput::Summary),
            Self::Recommendations => backend
                .generate_recommendations(&inputs.resume_text)
                .await
                .map(TaskOutput::Recommendations),
            Self::Discrepancies => backend
                .analyze_discrepancies(&inputs.resume_text, &inputs.job_text)
                .await
                .map(TaskOutput::Discrepancies),
        }
    }
}

impl std::fmt::Display for AnalysisTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutput {
    Analysis(AnalysisResult),
    Summary(String),
    Recommendations(Vec<String>),
    Discrepancies(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutcome {
    pub task: AnalysisTask,
    pub result: CallResult<TaskOutput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Complete,
    CompletedWithWarnings,
    Failed,
}

/// Folded outcomes of one fan-out
#[derive(Debug, Clone, PartialEq)]
pub struct FanOutReport {
    pub analysis: Option<AnalysisResult>,
    pub genai: GenAiResult,
    pub failures: Vec<(AnalysisTask, CallError)>,
    pub verdict: Verdict,
}

impl FanOutReport {
    pub fn failed_tasks(&self) -> Vec<AnalysisTask> {
        self.failures.iter().map(|(task, _)| *task).collect()
    }
}

/// Run every task concurrently and wait for all of them.
/// A failing call never cancels the others.
pub async fn run_tasks<B>(
    backend: &B,
    inputs: &AnalysisInputs,
    tasks: &[AnalysisTask],
) -> Vec<TaskOutcome>
where
    B: AnalysisBackend + ?Sized,
{
    let calls = tasks.iter().map(|&task| async move {
        TaskOutcome {
            task,
            result: task.run(backend, inputs).await,
        }
    });

    join_all(calls).await
}

pub fn fold_outcomes(outcomes: Vec<TaskOutcome>) -> FanOutReport {
    let total = outcomes.len();
    let mut analysis = None;
    let mut genai = GenAiResult::default();
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome.result {
            Ok(TaskOutput::Analysis(result)) => analysis = Some(result),
            Ok(TaskOutput::Summary(summary)) => genai.summary = Some(summary),
            Ok(TaskOutput::Recommendations(items)) => genai.recommendations = Some(items),
            Ok(TaskOutput::Discrepancies(text)) => genai.discrepancies = Some(text),
            Err(err) => failures.push((outcome.task, err)),
        }
    }

    let verdict = if total == 0 || failures.len() == total {
        Verdict::Failed
    } else if failures.is_empty() {
        Verdict::Complete
    } else {
        Verdict::CompletedWithWarnings
    };

    FanOutReport {
        analysis,
        genai,
        failures,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkillMatch;

    fn ok(task: AnalysisTask, output: TaskOutput) -> TaskOutcome {
        TaskOutcome {
            task,
            result: Ok(output),
        }
    }

    fn failed(task: AnalysisTask) -> TaskOutcome {
        TaskOutcome {
            task,
            result: Err(CallError::Status {
                status: 500,
                body: r#"{"detail": "boom"}"#.to_string(),
            }),
        }
    }

    fn analysis() -> AnalysisResult {
        AnalysisResult::Legacy {
            skills: vec![SkillMatch {
                word: "Rust".to_string(),
                score: 0.9,
            }],
            similarity: 0.5,
        }
    }

    #[test]
    fn test_all_succeed() {
        let report = fold_outcomes(vec![
            ok(AnalysisTask::Analyze, TaskOutput::Analysis(analysis())),
            ok(AnalysisTask::Summary, TaskOutput::Summary("s".to_string())),
            ok(
                AnalysisTask::Recommendations,
                TaskOutput::Recommendations(vec!["r".to_string()]),
            ),
            ok(
                AnalysisTask::Discrepancies,
                TaskOutput::Discrepancies("d".to_string()),
            ),
        ]);
        assert_eq!(report.verdict, Verdict::Complete);
        assert!(report.failures.is_empty());
        assert_eq!(report.analysis, Some(analysis()));
        assert_eq!(report.genai.recommendations, Some(vec!["r".to_string()]));
    }

    #[test]
    fn test_partial_failure_keeps_successes() {
        let report = fold_outcomes(vec![
            ok(AnalysisTask::Analyze, TaskOutput::Analysis(analysis())),
            ok(AnalysisTask::Summary, TaskOutput::Summary("s".to_string())),
            failed(AnalysisTask::Recommendations),
            failed(AnalysisTask::Discrepancies),
        ]);
        assert_eq!(report.verdict, Verdict::CompletedWithWarnings);
        assert_eq!(
            report.failed_tasks(),
            vec![AnalysisTask::Recommendations, AnalysisTask::Discrepancies]
        );
        assert_eq!(report.genai.summary.as_deref(), Some("s"));
        assert!(report.genai.recommendations.is_none());
        assert!(report.genai.discrepancies.is_none());
    }

    #[test]
    fn test_all_fail() {
        let report = fold_outcomes(vec![
            failed(AnalysisTask::Analyze),
            failed(AnalysisTask::Summary),
        ]);
        assert_eq!(report.verdict, Verdict::Failed);
        assert!(report.analysis.is_none());
        assert!(report.genai.is_empty());
    }

    #[test]
    fn test_planned_tasks() {
        assert_eq!(AnalysisTask::planned(true).len(), 4);
        assert_eq!(AnalysisTask::planned(false), vec![AnalysisTask::Analyze]);
        assert_eq!(AnalysisTask::Summary.to_string(), "summarize-resume");
    }
}
