//! User configuration stored in the data directory
//!
//! Directory structure:
//! ~/.typedist/
//!   config.yaml          # Analysis defaults (label field, delimiter, ...)
//!   typedist.log         # Log file used by the interactive chart view
//!
//! Every key is optional; a missing file means all defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use typedist_core::{DEFAULT_LABEL_FIELD, DistributionAnalyzer, LoadOptions, UnknownLabelPolicy};

/// Name of the config file inside the data directory
pub const CONFIG_FILE: &str = "config.yaml";

/// Errors raised while reading or applying the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),
}

/// Configuration stored in config.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Column holding the type label in survey files
    pub label_field: String,
    /// Field delimiter of survey files
    pub delimiter: String,
    /// Handling of labels outside the 16 types
    pub unknown_labels: UnknownLabelPolicy,
    /// Where `export` writes when no output path is given
    pub export_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            label_field: DEFAULT_LABEL_FIELD.to_string(),
            delimiter: ",".to_string(),
            unknown_labels: UnknownLabelPolicy::Ignore,
            export_path: PathBuf::from("mbti_distributions.json"),
        }
    }
}

impl AppConfig {
    /// Load `config.yaml` from `data_dir`, falling back to defaults when the
    /// file does not exist or is empty
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join(CONFIG_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_saphyr::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        config.load_options()?;

        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Dataset reader options derived from this config
    pub fn load_options(&self) -> Result<LoadOptions, ConfigError> {
        let mut chars = self.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() => Ok(LoadOptions {
                delimiter: c as u8,
            }),
            _ => Err(ConfigError::InvalidDelimiter(self.delimiter.clone())),
        }
    }

    /// Analyzer over the 16 types with this config's label policy
    #[must_use]
    pub fn analyzer(&self) -> DistributionAnalyzer {
        DistributionAnalyzer::new().with_unknown_labels(self.unknown_labels)
    }
}
