// src/orchestrator/state.rs
//! Pure state transitions. Each one returns a `Transition` tag; no I/O happens here.

use serde::Serialize;

use super::fanout::{AnalysisInputs, AnalysisTask, FanOutReport, Verdict};
use crate::core::{CallError, CallResult};
use crate::types::{
    AnalysisResult, DocumentSlot, GenAiResult, JobInput, JobInputState, JobSource, UploadSlot,
    UploadedDocument,
};

/// Everything the view renders. Lives for the session only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrchestratorState {
    pub resume: UploadSlot,
    pub job: JobInput,
    pub analysis_results: Option<AnalysisResult>,
    pub genai_results: Option<GenAiResult>,
    pub analyzing: bool,
    /// Bumped by `clear_all` so input widgets reset their own buffers
    pub clear_trigger: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    ResumeMissing,
    JobMissing,
    AlreadyAnalyzing,
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResumeMissing => f.write_str("no résumé has been uploaded"),
            Self::JobMissing => f.write_str("no job description has been provided"),
            Self::AlreadyAnalyzing => f.write_str("an analysis is already running"),
        }
    }
}

/// Outcome tag of a state change; notifications are derived from it
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    DocumentUploaded {
        slot: DocumentSlot,
        filename: String,
    },
    UploadFailed {
        slot: DocumentSlot,
        error: CallError,
    },
    JobTextStored,
    JobTextCleared,
    JobTextFailed {
        error: CallError,
    },
    Cleared {
        trigger: u64,
    },
    AnalysisBlocked(BlockReason),
    AnalysisStarted {
        source: JobSource,
        both_sources: bool,
    },
    AnalysisFinished {
        verdict: Verdict,
        failed: Vec<AnalysisTask>,
    },
}

impl OrchestratorState {
    pub fn job_state(&self) -> JobInputState {
        self.job.state()
    }

    pub fn can_analyze(&self) -> bool {
        self.ready_inputs().is_ok()
    }

    /// Store a validated upload; a failed call leaves the slot untouched
    pub fn apply_upload(
        &mut self,
        slot: DocumentSlot,
        result: CallResult<UploadedDocument>,
    ) -> Transition {
        match result {
            Ok(document) => {
                let filename = document.filename.clone();
                let target = match slot {
                    DocumentSlot::Resume => &mut self.resume,
                    DocumentSlot::Job => &mut self.job.file,
                };
                *target = UploadSlot::from_document(document);
                Transition::DocumentUploaded { slot, filename }
            }
            Err(error) => Transition::UploadFailed { slot, error },
        }
    }

    /// Store job text. Blank text clears the slot.
    pub fn apply_job_text(&mut self, result: CallResult<String>) -> Transition {
        match result {
            Ok(text) => {
                self.job.text = UploadSlot::from_text(&text);
                if self.job.text.uploaded {
                    Transition::JobTextStored
                } else {
                    Transition::JobTextCleared
                }
            }
            Err(error) => Transition::JobTextFailed { error },
        }
    }

    pub fn clear_all(&mut self) -> Transition {
        self.resume = UploadSlot::empty();
        self.job = JobInput::default();
        self.clear_trigger = self.clear_trigger.wrapping_add(1);
        Transition::Cleared {
            trigger: self.clear_trigger,
        }
    }

    fn ready_inputs(&self) -> Result<(AnalysisInputs, JobSource), BlockReason> {
        if self.analyzing {
            return Err(BlockReason::AlreadyAnalyzing);
        }
        if !self.resume.uploaded {
            return Err(BlockReason::ResumeMissing);
        }
        let source = self.job.active_source().ok_or(BlockReason::JobMissing)?;
        let job_text = self.job.active_content().unwrap_or_default().to_string();

        Ok((
            AnalysisInputs {
                resume_text: self.resume.content.clone(),
                job_text,
            },
            source,
        ))
    }

    /// Mark the analysis as running and hand out the texts to send
    pub fn begin_analysis(&mut self) -> Result<(AnalysisInputs, Transition), BlockReason> {
        let (inputs, source) = self.ready_inputs()?;
        self.analyzing = true;
        let transition = Transition::AnalysisStarted {
            source,
            both_sources: self.job.state() == JobInputState::Both,
        };
        Ok((inputs, transition))
    }

    /// Publish what succeeded. When every call failed the previous results stay.
    pub fn finish_analysis(&mut self, report: FanOutReport) -> Transition {
        self.analyzing = false;
        let failed = report.failed_tasks();

        if report.verdict != Verdict::Failed {
            self.analysis_results = report.analysis;
            self.genai_results = if report.genai.is_empty() {
                None
            } else {
                Some(report.genai)
            };
        }

        Transition::AnalysisFinished {
            verdict: report.verdict,
            failed,
        }
    }
}
