//! Percentage distributions over category labels

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::CategorySet;

/// Percentage frequency of each category label.
///
/// Entries keep insertion order, which for computed distributions is the
/// canonical order of the category set they were computed over. Values are
/// percentages in `[0, 100]` and need not sum to exactly 100.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution {
    values: IndexMap<String, f64>,
}

impl Distribution {
    /// Build a distribution from `(label, percentage)` pairs
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .collect()
    }

    /// Percentage for `label`; labels without an entry read as 0.0
    #[must_use]
    pub fn get(&self, label: &str) -> f64 {
        self.values.get(label).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.values.contains_key(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(label, value)| (label.as_str(), *value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all percentages
    #[must_use]
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }

    /// Values aligned to the canonical order of `categories`
    #[must_use]
    pub fn aligned(&self, categories: &CategorySet) -> Vec<f64> {
        categories.iter().map(|label| self.get(label)).collect()
    }

    /// Entries sorted by descending percentage. Equal values keep their
    /// insertion order.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries
    }
}

impl FromIterator<(String, f64)> for Distribution {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_label_reads_zero() {
        let dist = Distribution::from_pairs([("A", 60.0), ("B", 40.0)]);
        assert_eq!(dist.get("A"), 60.0);
        assert_eq!(dist.get("Z"), 0.0);
        assert!(!dist.contains("Z"));
    }

    #[test]
    fn test_ranked_is_stable_on_ties() {
        let dist = Distribution::from_pairs([("A", 10.0), ("B", 30.0), ("C", 10.0), ("D", 50.0)]);
        let labels: Vec<&str> = dist.ranked().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["D", "B", "A", "C"]);
    }

    #[test]
    fn test_aligned_fills_gaps() {
        let categories = CategorySet::new(["X", "Y", "Z"]).unwrap();
        let dist = Distribution::from_pairs([("Z", 5.0), ("X", 1.0)]);
        assert_eq!(dist.aligned(&categories), vec![1.0, 0.0, 5.0]);
    }
}
