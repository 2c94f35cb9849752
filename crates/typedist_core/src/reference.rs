//! Built-in reference distributions
//!
//! Population baselines shipped with the analyzer. The tables are plain
//! constants; `DistributionAnalyzer::new` turns them into `Distribution`
//! values once and never mutates them afterwards.

use crate::model::Distribution;

/// Name of the global population baseline
pub const GLOBAL: &str = "global";
/// Name of the China population estimate
pub const CHINA: &str = "china";

/// Global population distribution (percent)
pub const GLOBAL_DISTRIBUTION: [(&str, f64); 16] = [
    ("ISTJ", 11.6),
    ("ISFJ", 13.8),
    ("INFJ", 1.5),
    ("INTJ", 2.1),
    ("ISTP", 5.4),
    ("ISFP", 8.8),
    ("INFP", 4.4),
    ("INTP", 3.3),
    ("ESTP", 4.3),
    ("ESFP", 7.3),
    ("ENFP", 8.1),
    ("ENTP", 2.5),
    ("ESTJ", 8.7),
    ("ESFJ", 12.3),
    ("ENFJ", 2.5),
    ("ENTJ", 2.7),
];

/// China population distribution estimate based on published studies (percent)
pub const CHINA_DISTRIBUTION: [(&str, f64); 16] = [
    ("ISTJ", 13.2),
    ("ISFJ", 15.1),
    ("INFJ", 2.1),
    ("INTJ", 2.8),
    ("ISTP", 6.1),
    ("ISFP", 9.2),
    ("INFP", 5.1),
    ("INTP", 3.9),
    ("ESTP", 4.8),
    ("ESFP", 7.9),
    ("ENFP", 8.8),
    ("ENTP", 2.9),
    ("ESTJ", 9.5),
    ("ESFJ", 13.6),
    ("ENFJ", 2.8),
    ("ENTJ", 3.1),
];

/// A named built-in distribution
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    pub name: &'static str,
    pub description: &'static str,
    pub distribution: Distribution,
}

/// Materialize the built-in tables, in fixed order (global, china)
#[must_use]
pub fn builtin_tables() -> [ReferenceTable; 2] {
    [
        ReferenceTable {
            name: GLOBAL,
            description: "Global population",
            distribution: Distribution::from_pairs(GLOBAL_DISTRIBUTION),
        },
        ReferenceTable {
            name: CHINA,
            description: "China population",
            distribution: Distribution::from_pairs(CHINA_DISTRIBUTION),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MBTI_TYPES;

    #[test]
    fn test_tables_cover_canonical_order() {
        for table in [GLOBAL_DISTRIBUTION, CHINA_DISTRIBUTION] {
            let labels: Vec<&str> = table.iter().map(|(label, _)| *label).collect();
            assert_eq!(labels, MBTI_TYPES.to_vec());
        }
    }

    #[test]
    fn test_tables_are_close_to_full_population() {
        // Published figures are rounded, so only approximately 100%
        let global: f64 = GLOBAL_DISTRIBUTION.iter().map(|(_, v)| v).sum();
        assert!((global - 100.0).abs() < 1.0, "global sums to {global}");

        let china: f64 = CHINA_DISTRIBUTION.iter().map(|(_, v)| v).sum();
        assert!(china > 100.0, "china estimate sums to {china}");
    }
}
