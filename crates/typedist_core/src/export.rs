//! JSON export of named distributions
//!
//! Document layout:
//!
//! ```json
//! {
//!   "metadata": { "types": ["ISTJ", ...], "description": "...", "generated_at": "..." },
//!   "distributions": { "global": { "ISTJ": 11.6, ... }, ... }
//! }
//! ```
//!
//! Names and category keys keep their insertion order, and `load_export`
//! reads back exactly what was written.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::model::{CategorySet, Distribution};

/// Description written into the metadata block
pub const EXPORT_DESCRIPTION: &str = "MBTI type distribution data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Category labels in canonical order
    pub types: CategorySet,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<jiff::Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub metadata: ExportMetadata,
    pub distributions: IndexMap<String, Distribution>,
}

impl ExportDocument {
    /// Build a document stamped with the current time
    #[must_use]
    pub fn new(categories: &CategorySet, distributions: IndexMap<String, Distribution>) -> Self {
        Self {
            metadata: ExportMetadata {
                types: categories.clone(),
                description: EXPORT_DESCRIPTION.to_string(),
                generated_at: Some(jiff::Timestamp::now()),
            },
            distributions,
        }
    }

    #[must_use]
    pub fn distribution(&self, name: &str) -> Option<&Distribution> {
        self.distributions.get(name)
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Write `distributions` together with the category list to `destination`.
///
/// The file is replaced atomically. Returns the document that was written.
pub fn export_distributions<'a, I>(
    distributions: I,
    categories: &CategorySet,
    destination: &Path,
) -> Result<ExportDocument>
where
    I: IntoIterator<Item = (&'a str, &'a Distribution)>,
{
    let distributions: IndexMap<String, Distribution> = distributions
        .into_iter()
        .map(|(name, dist)| (name.to_string(), dist.clone()))
        .collect();

    let document = ExportDocument::new(categories, distributions);
    atomic_write(destination, &document.to_json_string()?)?;

    tracing::info!(
        path = %destination.display(),
        distributions = document.distributions.len(),
        "exported distributions"
    );
    Ok(document)
}

/// Read a document written by `export_distributions`
pub fn load_export(path: &Path) -> Result<ExportDocument> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(AnalysisError::DataSourceNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    ExportDocument::from_json_str(&content)
}

/// Write-then-rename so an interrupted export never leaves a truncated file
fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = temp_path_for(path);
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
