//! Command implementations behind the `typedist` binary.
//!
//! Every command writes its human-readable output to the supplied writer so
//! it can be exercised in tests; only `chart` takes over the terminal.

use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use typedist_core::reference::{CHINA, GLOBAL};
use typedist_core::{
    AnalysisError, Dataset, DistributionAnalyzer, LoadOptions, export_distributions,
    format_correlation, format_percentage, load_dataset,
};

use crate::chart::{ComparisonChart, Series};
use crate::config::{AppConfig, ConfigError};

/// Name under which survey data is exported
pub const SURVEY: &str = "survey";

/// Everything a command needs, resolved from config and flags
pub struct Context {
    pub config: AppConfig,
    pub analyzer: DistributionAnalyzer,
    pub load_options: LoadOptions,
    pub label_field: String,
}

impl Context {
    pub fn new(config: AppConfig, label_override: Option<String>) -> Result<Self, ConfigError> {
        let load_options = config.load_options()?;
        let analyzer = config.analyzer();
        let label_field = label_override.unwrap_or_else(|| config.label_field.clone());

        Ok(Self {
            config,
            analyzer,
            load_options,
            label_field,
        })
    }

    /// Load a survey file. A missing file is reported and skipped so the
    /// command can continue with reference data only.
    pub fn load_survey(
        &self,
        path: Option<&Path>,
        out: &mut impl Write,
    ) -> color_eyre::Result<Option<Dataset>> {
        let Some(path) = path else {
            return Ok(None);
        };

        match load_dataset(path, &self.load_options) {
            Ok(dataset) => Ok(Some(dataset)),
            Err(AnalysisError::DataSourceNotFound(missing)) => {
                tracing::warn!(path = %missing.display(), "survey file not found, continuing without it");
                writeln!(out, "data file {} does not exist", missing.display())?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Default flow: print the report, then export both reference tables
pub fn run_default(ctx: &Context, out: &mut impl Write) -> color_eyre::Result<()> {
    report(ctx, None, out)?;
    writeln!(out)?;
    export(ctx, None, None, out)
}

pub fn report(ctx: &Context, survey: Option<&Path>, out: &mut impl Write) -> color_eyre::Result<()> {
    let survey = ctx.load_survey(survey, out)?;
    let text = ctx
        .analyzer
        .generate_report(survey.as_ref(), &ctx.label_field)?;
    writeln!(out, "{text}")?;
    Ok(())
}

/// Export the built-in tables, plus the survey distribution when one loads.
/// Writes to `output`, or the configured export path.
pub fn export(
    ctx: &Context,
    output: Option<&Path>,
    survey: Option<&Path>,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    let destination: PathBuf = output.map_or_else(|| ctx.config.export_path.clone(), Path::to_path_buf);

    let survey_distribution = match ctx.load_survey(survey, out)? {
        Some(data) => Some(ctx.analyzer.compute_distribution(&data, &ctx.label_field)?),
        None => None,
    };

    let mut distributions = vec![
        (GLOBAL, ctx.analyzer.global_distribution()),
        (CHINA, ctx.analyzer.china_distribution()),
    ];
    if let Some(dist) = &survey_distribution {
        distributions.push((SURVEY, dist));
    }

    let document = export_distributions(distributions, ctx.analyzer.categories(), &destination)?;
    writeln!(
        out,
        "Exported {} distributions to {}",
        document.distributions.len(),
        destination.display()
    )?;
    Ok(())
}

/// Per-group distributions of `path` split by `group_field`.
///
/// A group that fails is reported inline and the remaining groups are still
/// printed.
pub fn groups(
    ctx: &Context,
    path: &Path,
    group_field: &str,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    let dataset = load_dataset(path, &ctx.load_options)?;
    let grouped =
        ctx.analyzer
            .compute_grouped_distributions(&dataset, group_field, &ctx.label_field)?;

    let mut sizes: IndexMap<&str, usize> = IndexMap::new();
    for group in dataset.column(group_field)? {
        *sizes.entry(group.trim()).or_default() += 1;
    }

    for (index, (group, result)) in grouped.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        let size = sizes.get(group.as_str()).copied().unwrap_or_default();
        writeln!(out, "## {group_field} = {group} (n={size})")?;

        let distribution = match result {
            Ok(distribution) => distribution,
            Err(e) => {
                writeln!(out, "- error: {e}")?;
                continue;
            }
        };

        for (label, percentage) in distribution.ranked() {
            if percentage > 0.0 {
                writeln!(out, "- **{label}**: {}", format_percentage(percentage))?;
            }
        }

        let correlation = ctx
            .analyzer
            .compare_distributions(distribution, ctx.analyzer.global_distribution())
            .map(|comparison| comparison.correlation)
            .ok();
        writeln!(
            out,
            "- Correlation with global: {}",
            format_correlation(correlation)
        )?;
    }
    Ok(())
}

/// Schema and record count of a data file
pub fn inspect(ctx: &Context, path: &Path, out: &mut impl Write) -> color_eyre::Result<()> {
    let dataset = load_dataset(path, &ctx.load_options)?;

    writeln!(out, "{}", path.display())?;
    writeln!(out, "Records: {}", dataset.len())?;
    writeln!(out, "Fields:")?;
    for field in dataset.schema().fields() {
        writeln!(out, "  {:<20} {}", field.name, field.kind.label())?;
    }
    Ok(())
}

/// Interactive chart: survey vs global when a survey loads, else china vs global
pub fn chart(ctx: &Context, survey: Option<&Path>) -> color_eyre::Result<()> {
    let mut notices = Vec::new();
    let survey = ctx.load_survey(survey, &mut notices)?;
    if !notices.is_empty() {
        eprint!("{}", String::from_utf8_lossy(&notices));
    }

    let analyzer = &ctx.analyzer;
    let global = analyzer.global_distribution();

    let (label, distribution) = match survey {
        Some(data) => ("Survey", analyzer.compute_distribution(&data, &ctx.label_field)?),
        None => ("China", analyzer.china_distribution().clone()),
    };

    let correlation = match analyzer.compare_distributions(&distribution, global) {
        Ok(comparison) => Some(comparison.correlation),
        Err(AnalysisError::DegenerateInput(reason)) => {
            tracing::warn!(%reason, "correlation is undefined");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let chart = ComparisonChart::new(
        analyzer.categories(),
        Series {
            label,
            distribution: &distribution,
        },
        Series {
            label: "Global",
            distribution: global,
        },
    )
    .with_correlation(correlation);

    tracing::info!(label, "opening chart");
    ratatui::run(|terminal| chart.run(terminal))?;

    if let Err(err) = ratatui::try_restore() {
        tracing::error!("Failed to restore terminal: {err}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use typedist_core::{UnknownLabelPolicy, load_export};

    fn context() -> Context {
        Context::new(AppConfig::default(), None).unwrap()
    }

    fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_label_override_wins_over_config() {
        let ctx = Context::new(AppConfig::default(), Some("type".to_string())).unwrap();
        assert_eq!(ctx.label_field, "type");
        assert_eq!(context().label_field, "mbti_type");
    }

    #[test]
    fn test_invalid_delimiter_fails_context() {
        let config = AppConfig {
            delimiter: "tab".to_string(),
            ..Default::default()
        };
        assert!(Context::new(config, None).is_err());
    }

    #[test]
    fn test_missing_survey_is_reported_and_skipped() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("survey.csv");
        let mut out = Vec::new();

        report(&context(), Some(&missing), &mut out).unwrap();

        let text = output(out);
        assert!(text.starts_with(&format!("data file {} does not exist\n", missing.display())));
        assert!(text.contains("# MBTI Type Distribution Report"));
        assert!(!text.contains("Survey Data Analysis"));
    }

    #[test]
    fn test_report_includes_survey() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("survey.csv");
        fs::write(&path, "mbti_type\nINTJ\nINTJ\nENFP\nISFJ\n").unwrap();
        let mut out = Vec::new();

        report(&context(), Some(&path), &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("## Survey Data Analysis"));
        assert!(text.contains("- Sample size: 4"));
    }

    #[test]
    fn test_default_flow_exports_references() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            export_path: dir.path().join("out.json"),
            ..Default::default()
        };
        let ctx = Context::new(config, None).unwrap();
        let mut out = Vec::new();

        run_default(&ctx, &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("## China vs Global"));
        assert!(text.contains("Exported 2 distributions"));

        let document = load_export(&dir.path().join("out.json")).unwrap();
        assert_eq!(
            document.distributions.keys().collect::<Vec<_>>(),
            vec![GLOBAL, CHINA]
        );
        assert_eq!(
            document.distribution(GLOBAL),
            Some(ctx.analyzer.global_distribution())
        );
    }

    #[test]
    fn test_export_with_survey() {
        let dir = tempdir().unwrap();
        let survey = dir.path().join("survey.csv");
        fs::write(&survey, "mbti_type\nINTJ\nENFP\n").unwrap();
        let destination = dir.path().join("export.json");
        let mut out = Vec::new();

        export(&context(), Some(&destination), Some(&survey), &mut out).unwrap();

        let document = load_export(&destination).unwrap();
        let survey = document.distribution(SURVEY).unwrap();
        assert_eq!(survey.get("INTJ"), 50.0);
        assert_eq!(survey.get("ENFP"), 50.0);
        assert_eq!(survey.get("ISTJ"), 0.0);
    }

    #[test]
    fn test_groups_prints_each_group() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("survey.csv");
        fs::write(
            &path,
            "mbti_type,gender\nINTJ,F\nENFP,M\nINTJ,F\nISTJ,M\nENFP,F\n",
        )
        .unwrap();
        let mut out = Vec::new();

        groups(&context(), &path, "gender", &mut out).unwrap();

        let text = output(out);
        let f = text.find("## gender = F (n=3)").unwrap();
        let m = text.find("## gender = M (n=2)").unwrap();
        assert!(f < m);
        assert!(text.contains("- **INTJ**: 66.7%"));
        assert!(text.contains("- **ISTJ**: 50.0%"));
        assert_eq!(text.matches("- Correlation with global: ").count(), 2);
    }

    #[test]
    fn test_groups_reports_failing_group_and_continues() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("survey.csv");
        fs::write(&path, "mbti_type,site\nXXXX,a\nINTJ,b\nENFP,b\n").unwrap();
        let config = AppConfig {
            unknown_labels: UnknownLabelPolicy::Reject,
            ..Default::default()
        };
        let ctx = Context::new(config, None).unwrap();
        let mut out = Vec::new();

        groups(&ctx, &path, "site", &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("## site = a (n=1)\n- error: "));
        assert!(text.contains("## site = b (n=2)"));
        assert!(text.contains("- **INTJ**: 50.0%"));
    }

    #[test]
    fn test_groups_counts_padded_values_together() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("survey.csv");
        fs::write(&path, "mbti_type,gender
INTJ,F
ENFP, F
ISTJ,M
").unwrap();
        let mut out = Vec::new();

        groups(&context(), &path, "gender", &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("## gender = F (n=2)"));
        assert!(text.contains("## gender = M (n=1)"));
        assert!(!text.contains("=  F"));
    }

    #[test]
    fn test_groups_unknown_field_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("survey.csv");
        fs::write(&path, "mbti_type\nINTJ\n").unwrap();

        let err = groups(&context(), &path, "region", &mut Vec::new()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_inspect_lists_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("survey.csv");
        fs::write(&path, "mbti_type,age\nINTJ,31\nENFP,27\n").unwrap();
        let mut out = Vec::new();

        inspect(&context(), &path, &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("Records: 2"));
        assert!(text.lines().any(|l| l.trim_start().starts_with("mbti_type") && l.ends_with("categorical")));
        assert!(text.lines().any(|l| l.trim_start().starts_with("age") && l.ends_with("numeric")));
    }
}
