// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::ClientConfig;
use crate::core::{AnalysisBackend, ServiceClient};
use crate::environment::EnvironmentConfig;
use crate::notify::ConsoleNotifier;
use crate::orchestrator::{Orchestrator, Transition, Verdict};
use crate::report;
use crate::types::{DocumentSlot, DocumentUpload};
use crate::utils::{self, SUPPORTED_EXTENSIONS};

#[derive(Parser)]
#[command(name = "resume-scanner")]
#[command(about = "Match a résumé against a job description with the analysis service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Analysis service base URL (overrides config file and environment)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// TOML config file with [local] and [production] tables
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON log output, truncated on startup
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload a résumé and a job description, then run the analysis
    Analyze {
        #[arg(long)]
        resume: PathBuf,
        /// Job description file
        #[arg(long)]
        job: Option<PathBuf>,
        /// Job description pasted as text
        #[arg(long, conflicts_with = "job_text_file")]
        job_text: Option<String>,
        /// Read the pasted job description from a plain text file
        #[arg(long)]
        job_text_file: Option<PathBuf>,
        /// Skip summary, recommendations and gap analysis
        #[arg(long)]
        no_genai: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Upload one document and print the extracted text
    Upload {
        file: PathBuf,
        #[arg(long, default_value = "resume")]
        kind: DocumentSlot,
    },
    /// Check that the analysis service answers
    Ping,
}

impl Cli {
    pub fn resolve_config(&self) -> Result<ClientConfig> {
        let env_config = EnvironmentConfig::load(self.config.as_deref())?;
        let mut config = env_config.client;

        if let Some(url) = &self.api_url {
            config = config.with_base_url(url);
        }
        if let Command::Analyze { no_genai: true, .. } = self.command {
            config = config.with_genai(false);
        }

        info!(
            "Using analysis service {} ({} environment)",
            config.base_url, env_config.environment
        );
        Ok(config)
    }
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;

    match cli.command {
        Command::Analyze {
            resume,
            job,
            job_text,
            job_text_file,
            json,
            ..
        } => {
            let job_text = match (job_text, job_text_file) {
                (Some(text), _) => Some(text),
                (None, Some(path)) => Some(
                    tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Failed to read file: {}", path.display()))?,
                ),
                (None, None) => None,
            };

            if job.is_none() && job_text.is_none() {
                anyhow::bail!("Provide a job description with --job, --job-text or --job-text-file");
            }

            run_analysis(config, &resume, job.as_deref(), job_text.as_deref(), json).await
        }

        Command::Upload { file, kind } => {
            utils::validate_file_extension(&file.to_string_lossy(), SUPPORTED_EXTENSIONS)?;
            let client = ServiceClient::new(config)?;
            let upload = DocumentUpload::from_path(&file).await?;

            let document = client
                .upload_document(kind, &upload)
                .await
                .with_context(|| format!("Failed to upload {}", file.display()))?;

            eprintln!("✅ {} uploaded: {}", kind.label(), document.filename);
            println!("{}", document.content);
            Ok(())
        }

        Command::Ping => {
            let client = ServiceClient::new(config)?;
            let message = client
                .health()
                .await
                .context("Analysis service did not answer")?;
            println!("{}", message);
            Ok(())
        }
    }
}

async fn run_analysis(
    config: ClientConfig,
    resume: &Path,
    job: Option<&Path>,
    job_text: Option<&str>,
    json: bool,
) -> Result<()> {
    utils::validate_file_extension(&resume.to_string_lossy(), SUPPORTED_EXTENSIONS)?;
    if let Some(job) = job {
        utils::validate_file_extension(&job.to_string_lossy(), SUPPORTED_EXTENSIONS)?;
    }

    let client = ServiceClient::new(config.clone())?;
    let mut orchestrator = Orchestrator::new(client, ConsoleNotifier::default(), &config);

    let resume_upload = DocumentUpload::from_path(resume).await?;
    orchestrator
        .submit_file(DocumentSlot::Resume, &resume_upload)
        .await;

    if let Some(job) = job {
        let job_upload = DocumentUpload::from_path(job).await?;
        orchestrator.submit_file(DocumentSlot::Job, &job_upload).await;
    }

    if let Some(text) = job_text {
        orchestrator.submit_job_text(text).await;
    }

    match orchestrator.analyze().await {
        Transition::AnalysisBlocked(reason) => anyhow::bail!("Cannot analyze: {}", reason),
        Transition::AnalysisFinished {
            verdict: Verdict::Failed,
            ..
        } => anyhow::bail!("Analysis failed: no call to the analysis service succeeded"),
        _ => {}
    }

    let state = orchestrator.state();
    if json {
        println!("{}", report::render_json(&state)?);
    } else {
        print!("{}", report::render_text(&state));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{API_URL_ENV, ENV_LOCK};

    #[test]
    fn test_api_url_flag_beats_env_and_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scanner.toml");
        std::fs::write(
            &path,
            "[local]\nbase_url = \"http://from-file:8000\"\n\n[production]\nbase_url = \"http://from-file:8000\"\n",
        )
        .unwrap();
        let config_arg = path.to_string_lossy().into_owned();

        let with_flag = Cli::try_parse_from([
            "resume-scanner",
            "ping",
            "--config",
            config_arg.as_str(),
            "--api-url",
            "http://from-flag:7000/",
        ])
        .unwrap();
        let without_flag =
            Cli::try_parse_from(["resume-scanner", "ping", "--config", config_arg.as_str()])
                .unwrap();

        std::env::set_var(API_URL_ENV, "http://from-env:9000");
        let flagged = with_flag.resolve_config();
        let env_only = without_flag.resolve_config();
        std::env::remove_var(API_URL_ENV);
        let file_only = without_flag.resolve_config();

        assert_eq!(flagged.unwrap().base_url, "http://from-flag:7000");
        assert_eq!(env_only.unwrap().base_url, "http://from-env:9000");
        assert_eq!(file_only.unwrap().base_url, "http://from-file:8000");
    }

    #[test]
    fn test_no_genai_flag_disables_genai() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scanner.toml");
        std::fs::write(&path, "[local]\ngenai_enabled = true\n").unwrap();
        let config_arg = path.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from([
            "resume-scanner",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job-text",
            "Backend role",
            "--no-genai",
            "--config",
            config_arg.as_str(),
        ])
        .unwrap();
        assert!(!cli.resolve_config().unwrap().genai_enabled);
    }

    #[test]
    fn test_parse_analyze_command() {
        let cli = Cli::try_parse_from([
            "resume-scanner",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job-text",
            "Senior backend engineer, 5 years Go",
            "--no-genai",
        ])
        .unwrap();

        match cli.command {
            Command::Analyze {
                resume,
                job,
                job_text,
                no_genai,
                json,
                ..
            } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert!(job.is_none());
                assert_eq!(job_text.as_deref(), Some("Senior backend engineer, 5 years Go"));
                assert!(no_genai);
                assert!(!json);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_job_text_conflicts_with_text_file() {
        let result = Cli::try_parse_from([
            "resume-scanner",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job-text",
            "x",
            "--job-text-file",
            "job.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_upload_kind_and_global_flags() {
        let cli = Cli::try_parse_from([
            "resume-scanner",
            "upload",
            "job.pdf",
            "--kind",
            "job",
            "--api-url",
            "http://scanner.local",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://scanner.local"));
        assert!(matches!(
            cli.command,
            Command::Upload {
                kind: DocumentSlot::Job,
                ..
            }
        ));
    }
}
