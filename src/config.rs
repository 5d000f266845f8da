//! Configuration management for the resume scanner

use crate::error::{Result, ScannerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Optional TOML file replacing the builtin category taxonomy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy_file: Option<PathBuf>,
    pub scoring: ScoringConfig,
    pub augmenter: AugmenterConfig,
    pub output: OutputConfig,
}

/// Weights and penalties for the weighted scoring policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub keyword_weight: f64,
    pub category_weight: f64,
    pub missing_section_penalty: f64,
    pub issue_penalty: f64,
}

/// Knowledge-graph skill augmenter settings. The API key may also be
/// supplied through the `KG_API_KEY` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmenterConfig {
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub result_limit: usize,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            taxonomy_file: None,
            scoring: ScoringConfig {
                keyword_weight: 0.7,
                category_weight: 0.3,
                missing_section_penalty: 5.0,
                issue_penalty: 10.0,
            },
            augmenter: AugmenterConfig {
                endpoint: "https://kgsearch.googleapis.com/v1/entities:search".to_string(),
                api_key: None,
                timeout_secs: 5,
                result_limit: 10,
                enable_cache: true,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ScannerError::Configuration(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScannerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scanner")
            .join("config.toml")
    }
}

impl AugmenterConfig {
    /// Configured key, falling back to the `KG_API_KEY` environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("KG_API_KEY").ok())
            .filter(|key| !key.is_empty())
    }
}
