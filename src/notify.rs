// src/notify.rs
//! Transient user-facing notifications, derived from transition outcomes

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::orchestrator::{Transition, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Info => "ℹ️",
            Self::Warning => "⚠️",
            Self::Error => "❌",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    /// The notification a transition should raise, if any.
    /// A blocked analysis is a silent no-op.
    pub fn for_transition(transition: &Transition) -> Option<Self> {
        use NotificationLevel::*;

        let (level, message) = match transition {
            Transition::DocumentUploaded { slot, filename } => {
                (Success, format!("{} uploaded: {}", slot.label(), filename))
            }
            Transition::UploadFailed { slot, error } => {
                (Error, format!("{} upload failed: {}", slot.label(), error))
            }
            Transition::JobTextStored => (Success, "Job description text saved".to_string()),
            Transition::JobTextCleared => (Info, "Job description text cleared".to_string()),
            Transition::JobTextFailed { error } => (
                Error,
                format!("Job description text upload failed: {}", error),
            ),
            Transition::Cleared { .. } => (Info, "All inputs cleared".to_string()),
            Transition::AnalysisBlocked(_) => return None,
            Transition::AnalysisStarted { both_sources, .. } => {
                if !both_sources {
                    return None;
                }
                (
                    Warning,
                    "Both a job file and pasted text are present; using the uploaded file"
                        .to_string(),
                )
            }
            Transition::AnalysisFinished { verdict, failed } => match verdict {
                Verdict::Complete => (Success, "Analysis complete".to_string()),
                Verdict::CompletedWithWarnings => {
                    let names: Vec<&str> = failed.iter().map(|t| t.name()).collect();
                    (
                        Warning,
                        format!(
                            "Analysis completed with warnings ({} failed)",
                            names.join(", ")
                        ),
                    )
                }
                Verdict::Failed => (Error, "Analysis failed".to_string()),
            },
        };

        Some(Self::new(level, message))
    }
}

/// Where notifications are shown
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Writes notifications into the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Success | NotificationLevel::Info => {
                info!(id = %notification.id, "{}", notification.message)
            }
            NotificationLevel::Warning => warn!(id = %notification.id, "{}", notification.message),
            NotificationLevel::Error => error!(id = %notification.id, "{}", notification.message),
        }
    }
}

/// Prints to stderr and logs
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    log: TracingNotifier,
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        eprintln!("{} {}", notification.level.icon(), notification.message);
        self.log.notify(notification);
    }
}

/// Keeps every notification in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, level: NotificationLevel) -> usize {
        self.notifications()
            .iter()
            .filter(|n| n.level == level)
            .count()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: &Notification) {
        if let Ok(mut received) = self.received.lock() {
            received.push(notification.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CallError;
    use crate::orchestrator::{AnalysisTask, BlockReason};
    use crate::types::{DocumentSlot, JobSource};

    #[test]
    fn test_upload_notifications() {
        let ok = Notification::for_transition(&Transition::DocumentUploaded {
            slot: DocumentSlot::Resume,
            filename: "cv.pdf".to_string(),
        })
        .unwrap();
        assert_eq!(ok.level, NotificationLevel::Success);
        assert_eq!(ok.message, "Résumé uploaded: cv.pdf");

        let failed = Notification::for_transition(&Transition::UploadFailed {
            slot: DocumentSlot::Job,
            error: CallError::Status {
                status: 400,
                body: "bad pdf".to_string(),
            },
        })
        .unwrap();
        assert_eq!(failed.level, NotificationLevel::Error);
        assert!(failed.message.starts_with("Job description upload failed"));
    }

    #[test]
    fn test_silent_transitions() {
        assert!(
            Notification::for_transition(&Transition::AnalysisBlocked(BlockReason::JobMissing))
                .is_none()
        );
        assert!(Notification::for_transition(&Transition::AnalysisStarted {
            source: JobSource::Text,
            both_sources: false
        })
        .is_none());
    }

    #[test]
    fn test_warning_lists_failed_calls() {
        let warning = Notification::for_transition(&Transition::AnalysisFinished {
            verdict: Verdict::CompletedWithWarnings,
            failed: vec![AnalysisTask::Recommendations, AnalysisTask::Discrepancies],
        })
        .unwrap();
        assert_eq!(warning.level, NotificationLevel::Warning);
        assert_eq!(
            warning.message,
            "Analysis completed with warnings (generate-recommendations, analyze-discrepancies failed)"
        );
    }

    #[test]
    fn test_memory_notifier_shares_buffer() {
        let notifier = MemoryNotifier::new();
        let handle = notifier.clone();
        notifier.notify(&Notification::new(NotificationLevel::Info, "hello"));

        assert_eq!(handle.notifications().len(), 1);
        assert_eq!(handle.count(NotificationLevel::Info), 1);
        assert_eq!(handle.count(NotificationLevel::Error), 0);
    }
}
