//! Tests for the distribution analyzer
//!
//! Tests are organized by topic:
//! - `distribution` - Percentage tables from labeled datasets
//! - `comparison` - Differences, largest difference and correlation
//! - `grouped` - Group-wise distributions
//! - `loader` - Delimited-text loading
//! - `export` - JSON export and reload
//! - `report` - Report layout


use crate::model::Dataset;

/// Single-column dataset of `mbti_type` labels
pub(crate) fn labels_dataset(labels: &[&str]) -> Dataset {
    Dataset::new(["mbti_type"], labels.iter().map(|label| [*label])).unwrap()
}
