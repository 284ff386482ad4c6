// src/environment.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::ClientConfig;

pub const DEFAULT_CONFIG_FILE: &str = "resume-scanner.toml";
pub const API_URL_ENV: &str = "RESUME_SCANNER_API_URL";

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub client: ClientConfig,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    local: Option<ClientConfig>,
    production: Option<ClientConfig>,
}

impl EnvironmentConfig {
    /// Load configuration based on environment.
    /// An explicit `config_path` must exist; the default file is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut client = match config_path {
            Some(path) => Self::load_from_file(path, &environment)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from_file(&default_path, &environment)?
                } else {
                    ClientConfig::default()
                }
            }
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                client = client.with_base_url(url.trim());
            }
        }

        Ok(Self {
            environment,
            client,
        })
    }

    fn get_environment() -> String {
        std::env::var("RESUME_SCANNER_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(path: &Path, environment: &str) -> Result<ClientConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content, environment)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Pick the table matching `environment`; a missing table means defaults
    pub fn from_toml(content: &str, environment: &str) -> Result<ClientConfig> {
        let file: ConfigFile = toml::from_str(content)?;

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        Ok(section
            .map(|c| {
                let base_url = c.base_url.clone();
                c.with_base_url(&base_url)
            })
            .unwrap_or_default())
    }
}

/// Serializes tests that touch `API_URL_ENV`
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
