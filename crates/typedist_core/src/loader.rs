//! Delimited-text dataset loading

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{AnalysisError, Result};
use crate::model::Dataset;

/// Options for reading delimited text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter byte
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Load a dataset from a delimited text file with a header row.
///
/// A missing file is reported as `DataSourceNotFound` so callers can carry on
/// without the dataset.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(AnalysisError::DataSourceNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let dataset = Dataset::from_reader(file, options)?;
    tracing::info!(
        path = %path.display(),
        records = dataset.len(),
        fields = dataset.schema().len(),
        "loaded dataset"
    );
    Ok(dataset)
}

impl Dataset {
    /// Parse delimited text with a header row. Rows whose width differs from
    /// the header are a `Parse` error.
    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        Dataset::new(headers, rows)
    }
}
