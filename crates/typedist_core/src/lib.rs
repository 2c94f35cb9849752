//! Personality-type distribution analysis library
//!
//! This crate computes and compares categorical distributions over the 16
//! MBTI type labels. It provides:
//! - Percentage distributions from labeled survey datasets
//! - Comparison of two distributions (differences, largest difference,
//!   Pearson correlation)
//! - Group-wise distributions keyed by a demographic field
//! - Built-in global and China reference tables
//! - A plain-text report and a lossless JSON export
//!
//! # Example
//!
//! ```
//! use typedist_core::{Dataset, DistributionAnalyzer};
//!
//! let analyzer = DistributionAnalyzer::new();
//! let survey = Dataset::new(
//!     ["mbti_type", "gender"],
//!     [["INTJ", "F"], ["INTJ", "M"], ["ENFP", "F"], ["ISTJ", "M"]],
//! )?;
//!
//! let distribution = analyzer.compute_distribution(&survey, "mbti_type")?;
//! assert_eq!(distribution.get("INTJ"), 50.0);
//!
//! let comparison = analyzer.compare_distributions(&distribution, analyzer.global_distribution())?;
//! assert_eq!(comparison.max_difference.category, "INTJ");
//! # Ok::<(), typedist_core::AnalysisError>(())
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analyzer;
pub mod error;
pub mod export;
pub mod loader;
pub mod reference;
pub mod report;
pub mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analyzer::{
    DEFAULT_LABEL_FIELD, DistributionAnalyzer, GroupedDistributions, UnknownLabelPolicy,
};
pub use error::{AnalysisError, Result};
pub use export::{ExportDocument, ExportMetadata, export_distributions, load_export};
pub use loader::{LoadOptions, load_dataset};
pub use model::{
    CategorySet, Comparison, Dataset, Distribution, Field, FieldKind, MBTI_TYPES, MaxDifference,
    Schema,
};
pub use report::{
    ReportData, SurveySummary, format_correlation, format_difference, format_percentage,
    render_report,
};
