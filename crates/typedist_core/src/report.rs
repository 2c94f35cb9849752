//! Plain-text report rendering
//!
//! Pure formatting: percentages to one decimal, differences with an explicit
//! sign, correlations to three decimals.

use crate::model::{Comparison, Distribution};

/// Report title line
pub const REPORT_TITLE: &str = "# MBTI Type Distribution Report";

/// Survey figures shown in the report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurveySummary {
    pub sample_size: usize,
    /// `None` when the correlation is undefined (zero variance)
    pub correlation: Option<f64>,
}

/// Everything `render_report` needs, already computed
#[derive(Debug, Clone)]
pub struct ReportData<'a> {
    /// Name of the primary reference, e.g. "Global"
    pub reference_label: &'a str,
    pub reference: &'a Distribution,
    /// Name of the distribution compared against the reference, e.g. "China"
    pub comparison_label: &'a str,
    pub comparison: &'a Comparison,
    pub survey: Option<SurveySummary>,
}

pub fn render_report(data: &ReportData<'_>) -> String {
    let mut report = Vec::new();
    report.push(format!("{REPORT_TITLE}\n"));

    report.push(format!(
        "## {} Population Distribution\n",
        data.reference_label
    ));
    for (label, percentage) in data.reference.ranked() {
        report.push(format!("- **{label}**: {}", format_percentage(percentage)));
    }

    report.push(format!(
        "\n## {} vs {}\n",
        data.comparison_label, data.reference_label
    ));
    let max = &data.comparison.max_difference;
    report.push(format!(
        "- Largest difference: {} (difference: {})",
        max.category,
        format_difference(max.value)
    ));
    report.push(format!(
        "- Correlation: {}",
        format_correlation(Some(data.comparison.correlation))
    ));

    if let Some(survey) = &data.survey {
        report.push("\n## Survey Data Analysis\n".to_string());
        report.push(format!("- Sample size: {}", survey.sample_size));
        report.push(format!(
            "- Correlation with {}: {}",
            data.reference_label.to_lowercase(),
            format_correlation(survey.correlation)
        ));
    }

    report.join("\n")
}

/// Percentage on the 0-100 scale to one decimal, e.g. `12.3%`
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Percentage-point difference with an explicit sign, e.g. `+1.6%`
#[must_use]
pub fn format_difference(value: f64) -> String {
    format!("{value:+.1}%")
}

/// Correlation to three decimals, or the undefined marker
#[must_use]
pub fn format_correlation(correlation: Option<f64>) -> String {
    match correlation {
        Some(r) => format!("{r:.3}"),
        None => "undefined (zero variance)".to_string(),
    }
}
