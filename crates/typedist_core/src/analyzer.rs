//! The distribution analyzer
//!
//! Owns a category set and the built-in reference tables, and turns labeled
//! datasets into percentage distributions, comparisons and reports.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::model::{CategorySet, Comparison, Dataset, Distribution, MaxDifference};
use crate::reference::{self, ReferenceTable};
use crate::report::{ReportData, SurveySummary, render_report};
use crate::stats::pearson_correlation;

/// Default name of the label column in survey data
pub const DEFAULT_LABEL_FIELD: &str = "mbti_type";

/// What to do with label values that are not part of the category set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownLabelPolicy {
    /// Count the record toward the total but toward no category. Percentages
    /// then sum to less than 100.
    #[default]
    Ignore,
    /// Fail with `UnknownLabel`
    Reject,
}

/// Per-group distributions in first-seen group order. Each group succeeds or
/// fails on its own.
pub type GroupedDistributions = IndexMap<String, Result<Distribution>>;

#[derive(Debug, Clone)]
pub struct DistributionAnalyzer {
    categories: CategorySet,
    references: [ReferenceTable; 2],
    unknown_labels: UnknownLabelPolicy,
}

impl Default for DistributionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DistributionAnalyzer {
    /// Analyzer over the canonical MBTI types
    #[must_use]
    pub fn new() -> Self {
        Self::with_categories(CategorySet::mbti())
    }

    /// Analyzer over a custom category set. The reference tables are still the
    /// built-in MBTI baselines.
    #[must_use]
    pub fn with_categories(categories: CategorySet) -> Self {
        Self {
            categories,
            references: reference::builtin_tables(),
            unknown_labels: UnknownLabelPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_unknown_labels(mut self, policy: UnknownLabelPolicy) -> Self {
        self.unknown_labels = policy;
        self
    }

    #[must_use]
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    #[must_use]
    pub fn unknown_label_policy(&self) -> UnknownLabelPolicy {
        self.unknown_labels
    }

    #[must_use]
    pub fn global_distribution(&self) -> &Distribution {
        &self.references[0].distribution
    }

    #[must_use]
    pub fn china_distribution(&self) -> &Distribution {
        &self.references[1].distribution
    }

    /// Built-in reference tables in fixed order
    pub fn references(&self) -> impl Iterator<Item = &ReferenceTable> {
        self.references.iter()
    }

    /// Look up a built-in distribution by name
    #[must_use]
    pub fn reference(&self, name: &str) -> Option<&Distribution> {
        self.references
            .iter()
            .find(|table| table.name == name)
            .map(|table| &table.distribution)
    }

    /// Percentage of records carrying each category in `label_field`.
    ///
    /// Categories that never occur yield 0.0. Fails with `InvalidField` when
    /// the field is not part of the schema and `EmptyDataset` when there are
    /// no records.
    pub fn compute_distribution(
        &self,
        dataset: &Dataset,
        label_field: &str,
    ) -> Result<Distribution> {
        let labels = dataset.column(label_field)?;
        self.tally(labels.enumerate(), label_field)
    }

    /// Compare `a` against `b` over the category set.
    ///
    /// Differences are `a[c] - b[c]` with missing entries read as 0.0. The
    /// largest absolute difference goes to the first category in canonical
    /// order on ties. Fails with `DegenerateInput` when either side has zero
    /// variance.
    pub fn compare_distributions(&self, a: &Distribution, b: &Distribution) -> Result<Comparison> {
        let differences: Distribution = self
            .categories
            .iter()
            .map(|label| (label.to_string(), a.get(label) - b.get(label)))
            .collect();

        let mut max_difference: Option<(&str, f64)> = None;
        for (label, diff) in differences.iter() {
            match max_difference {
                Some((_, best)) if diff.abs() <= best.abs() => {}
                _ => max_difference = Some((label, diff)),
            }
        }
        let max_difference = max_difference
            .map(|(category, value)| MaxDifference {
                category: category.to_string(),
                value,
            })
            .ok_or_else(|| AnalysisError::InvalidCategorySet("no categories".to_string()))?;

        let correlation =
            pearson_correlation(&a.aligned(&self.categories), &b.aligned(&self.categories))?;

        Ok(Comparison {
            differences,
            max_difference,
            correlation,
        })
    }

    /// One distribution per distinct value of `group_field`.
    ///
    /// Group values are trimmed like labels, so `"F"` and `" F"` share a
    /// group. Groups appear in the order their value is first seen. Missing fields
    /// fail the whole call; anything else that goes wrong inside a group is
    /// recorded for that group only.
    pub fn compute_grouped_distributions(
        &self,
        dataset: &Dataset,
        group_field: &str,
        label_field: &str,
    ) -> Result<GroupedDistributions> {
        let groups = dataset.column(group_field)?;
        let labels = dataset.column(label_field)?;
        if dataset.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }

        let mut partitions: IndexMap<&str, Vec<(usize, &str)>> = IndexMap::new();
        for (row, (group, label)) in groups.zip(labels).enumerate() {
            partitions.entry(group.trim()).or_default().push((row, label));
        }

        tracing::debug!(
            group_field,
            groups = partitions.len(),
            records = dataset.len(),
            "partitioned dataset"
        );

        Ok(partitions
            .into_iter()
            .map(|(group, rows)| {
                let result = self.tally(rows.into_iter(), label_field);
                if let Err(e) = &result {
                    tracing::warn!(group, error = %e, "group distribution failed");
                }
                (group.to_string(), result)
            })
            .collect())
    }

    /// Build the text report: the global ranking, China compared with global,
    /// and the survey compared with global when survey data is supplied.
    pub fn generate_report(&self, survey: Option<&Dataset>, label_field: &str) -> Result<String> {
        let global = self.global_distribution();
        let regional = self.compare_distributions(self.china_distribution(), global)?;

        let survey = survey
            .map(|data| self.summarize_survey(data, label_field))
            .transpose()?;

        Ok(render_report(&ReportData {
            reference_label: "Global",
            reference: global,
            comparison_label: "China",
            comparison: &regional,
            survey,
        }))
    }

    fn summarize_survey(&self, data: &Dataset, label_field: &str) -> Result<SurveySummary> {
        let distribution = self.compute_distribution(data, label_field)?;
        let correlation =
            match self.compare_distributions(&distribution, self.global_distribution()) {
                Ok(comparison) => Some(comparison.correlation),
                Err(AnalysisError::DegenerateInput(reason)) => {
                    tracing::warn!(%reason, "survey correlation is undefined");
                    None
                }
                Err(e) => return Err(e),
            };

        Ok(SurveySummary {
            sample_size: data.len(),
            correlation,
        })
    }

    /// Count labels into percentages. `labels` yields `(row, label)` with
    /// zero-based record indices.
    fn tally<'a>(
        &self,
        labels: impl Iterator<Item = (usize, &'a str)>,
        label_field: &str,
    ) -> Result<Distribution> {
        let mut counts = vec![0usize; self.categories.len()];
        let mut total = 0usize;
        let mut ignored = 0usize;

        for (row, label) in labels {
            total += 1;
            let label = label.trim();
            match self.categories.position(label) {
                Some(idx) => counts[idx] += 1,
                None => match self.unknown_labels {
                    UnknownLabelPolicy::Ignore => ignored += 1,
                    UnknownLabelPolicy::Reject => {
                        return Err(AnalysisError::UnknownLabel {
                            value: label.to_string(),
                            row: row + 1,
                        });
                    }
                },
            }
        }

        if total == 0 {
            return Err(AnalysisError::EmptyDataset);
        }
        if ignored > 0 {
            tracing::warn!(
                label_field,
                ignored,
                total,
                "labels outside the category set were not counted"
            );
        }

        Ok(self
            .categories
            .iter()
            .zip(counts)
            .map(|(label, count)| (label.to_string(), (count as f64 / total as f64) * 100.0))
            .collect())
    }
}
