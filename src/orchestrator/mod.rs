// src/orchestrator/mod.rs
//! Upload/analyze orchestrator: drives the backend calls, applies the pure
//! transitions and emits the resulting notifications.

pub mod fanout;
pub mod state;

pub use fanout::{AnalysisInputs, AnalysisTask, FanOutReport, TaskOutcome, TaskOutput, Verdict};
pub use state::{BlockReason, OrchestratorState, Transition};

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::{ClientConfig, JobTextRoute};
use crate::core::AnalysisBackend;
use crate::notify::{Notification, Notifier};
use crate::types::{DocumentSlot, DocumentUpload};

pub struct Orchestrator<B, N> {
    backend: B,
    notifier: N,
    job_text_route: JobTextRoute,
    genai_enabled: bool,
    state: watch::Sender<OrchestratorState>,
}

impl<B, N> Orchestrator<B, N>
where
    B: AnalysisBackend,
    N: Notifier,
{
    pub fn new(backend: B, notifier: N, config: &ClientConfig) -> Self {
        let (state, _) = watch::channel(OrchestratorState::default());
        Self {
            backend,
            notifier,
            job_text_route: config.job_text_route,
            genai_enabled: config.genai_enabled,
            state,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> OrchestratorState {
        self.state.borrow().clone()
    }

    /// Receiver that sees every state change, `analyzing` included
    pub fn subscribe(&self) -> watch::Receiver<OrchestratorState> {
        self.state.subscribe()
    }

    pub fn can_analyze(&self) -> bool {
        self.state.borrow().can_analyze()
    }

    pub async fn submit_file(&mut self, slot: DocumentSlot, upload: &DocumentUpload) -> Transition {
        let result = self.backend.upload_document(slot, upload).await;
        if let Err(e) = &result {
            error!(
                kind = e.kind(),
                "Failed to upload {} for {:?}: {}", upload.filename, slot, e
            );
        }

        let transition = self.update(|state| state.apply_upload(slot, result));
        self.emit(&transition);
        transition
    }

    pub async fn submit_job_text(&mut self, text: &str) -> Transition {
        let result = match self.job_text_route {
            JobTextRoute::Remote if !text.trim().is_empty() => {
                self.backend.upload_job_text(text).await
            }
            _ => Ok(text.to_string()),
        };
        if let Err(e) = &result {
            error!(kind = e.kind(), "Failed to submit job text: {}", e);
        }

        let transition = self.update(|state| state.apply_job_text(result));
        self.emit(&transition);
        transition
    }

    pub fn clear_all(&mut self) -> Transition {
        let transition = self.update(|state| state.clear_all());
        self.emit(&transition);
        transition
    }

    /// Run every analysis call concurrently and publish what succeeded.
    /// Without a résumé and a job source this is a no-op.
    pub async fn analyze(&mut self) -> Transition {
        let (inputs, started) = match self.update(|state| state.begin_analysis()) {
            Ok(ready) => ready,
            Err(reason) => {
                debug!("Analysis not started: {}", reason);
                return Transition::AnalysisBlocked(reason);
            }
        };
        if let Transition::AnalysisStarted {
            both_sources: true, ..
        } = started
        {
            warn!("Job file and job text both present, using the file");
        }
        self.emit(&started);

        let tasks = AnalysisTask::planned(self.genai_enabled);
        info!(
            "Starting analysis: {} calls, resume {} chars, job {} chars",
            tasks.len(),
            inputs.resume_text.len(),
            inputs.job_text.len()
        );

        let outcomes = fanout::run_tasks(&self.backend, &inputs, &tasks).await;
        let report = fanout::fold_outcomes(outcomes);

        for (task, err) in &report.failures {
            warn!(task = task.name(), kind = err.kind(), "Analysis call failed: {}", err);
        }
        info!("Analysis finished: {:?}", report.verdict);

        let finished = self.update(|state| state.finish_analysis(report));
        self.emit(&finished);
        finished
    }

    /// Apply a transition to a copy of the state and publish it if it changed
    fn update<T>(&self, apply: impl FnOnce(&mut OrchestratorState) -> T) -> T {
        let mut next = self.state.borrow().clone();
        let output = apply(&mut next);
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        output
    }

    fn emit(&self, transition: &Transition) {
        if let Some(notification) = Notification::for_transition(transition) {
            self.notifier.notify(&notification);
        }
    }
}
