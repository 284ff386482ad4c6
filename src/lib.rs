// src/lib.rs
//! Client for the résumé/job-description matching service.
//!
//! The [`orchestrator::Orchestrator`] keeps the résumé and job-description
//! slots, drives the analysis fan-out against an [`crate::core::AnalysisBackend`]
//! and reports every outcome through a [`notify::Notifier`].

pub mod cli;
pub mod config;
pub mod core;
pub mod environment;
pub mod notify;
pub mod orchestrator;
pub mod report;
pub mod types;
pub mod utils;

pub use config::ClientConfig;
pub use crate::core::{AnalysisBackend, CallError, ServiceClient};
pub use orchestrator::{Orchestrator, OrchestratorState, Transition};

/// Default location of the JSON log file
pub fn default_log_path() -> std::path::PathBuf {
    std::env::temp_dir().join("resume-scanner.log")
}
