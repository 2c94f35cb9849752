//! Ordered category sets
//!
//! A `CategorySet` fixes both the vocabulary of labels a distribution is
//! computed over and the canonical order used for comparisons, correlation
//! vectors, tie-breaking and export.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// The 16 MBTI type labels in canonical order
pub const MBTI_TYPES: [&str; 16] = [
    "ISTJ", "ISFJ", "INFJ", "INTJ", //
    "ISTP", "ISFP", "INFP", "INTP", //
    "ESTP", "ESFP", "ENFP", "ENTP", //
    "ESTJ", "ESFJ", "ENFJ", "ENTJ",
];

/// Non-empty, duplicate-free, ordered set of category labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CategorySet {
    labels: Vec<String>,
    /// Label to canonical position, built once with the set
    index: FxHashMap<String, usize>,
}

impl CategorySet {
    /// Build a category set, rejecting empty input and duplicate labels
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(AnalysisError::InvalidCategorySet(
                "at least one category is required".to_string(),
            ));
        }

        let mut index = FxHashMap::default();
        for (position, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), position).is_some() {
                return Err(AnalysisError::InvalidCategorySet(format!(
                    "duplicate category '{label}'"
                )));
            }
        }

        Ok(Self { labels, index })
    }

    /// The canonical 16 MBTI types
    #[must_use]
    pub fn mbti() -> Self {
        let labels: Vec<String> = MBTI_TYPES.iter().map(|s| (*s).to_string()).collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(position, label)| (label.clone(), position))
            .collect();
        Self { labels, index }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in canonical order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Position of `label` in canonical order
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::mbti()
    }
}

impl TryFrom<Vec<String>> for CategorySet {
    type Error = AnalysisError;

    fn try_from(labels: Vec<String>) -> Result<Self> {
        Self::new(labels)
    }
}

impl From<CategorySet> for Vec<String> {
    fn from(set: CategorySet) -> Self {
        set.labels
    }
}
