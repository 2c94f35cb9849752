//! Results of comparing two distributions

use serde::{Deserialize, Serialize};

use super::Distribution;

/// Category with the largest absolute difference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxDifference {
    pub category: String,
    /// Signed difference `a - b` for `category`
    pub value: f64,
}

/// Pointwise comparison of two distributions over a category set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Signed differences `a[c] - b[c]` in canonical category order
    pub differences: Distribution,
    pub max_difference: MaxDifference,
    /// Pearson correlation of the paired values
    pub correlation: f64,
}

impl Comparison {
    /// Difference for a single category (0.0 when not part of the set)
    #[must_use]
    pub fn difference(&self, category: &str) -> f64 {
        self.differences.get(category)
    }
}
