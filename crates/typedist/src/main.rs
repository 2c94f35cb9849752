use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use typedist::{AppConfig, Context, commands, init_file_logging, init_logging};

#[derive(Parser, Debug)]
#[command(name = "typedist")]
#[command(about = "Compare MBTI type distributions against reference populations")]
struct Args {
    /// Path to the data directory (default: ~/.typedist/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Column holding the type label (overrides config.yaml)
    #[arg(long, global = true)]
    label_field: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the distribution report
    Report {
        /// Survey CSV to analyze alongside the reference tables
        #[arg(long)]
        survey: Option<PathBuf>,
    },
    /// Export distributions as JSON
    Export {
        /// Destination file (default: export_path from config.yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Survey CSV to export as "survey"
        #[arg(long)]
        survey: Option<PathBuf>,
    },
    /// Distribution per value of a grouping field
    Groups {
        /// Survey CSV
        file: PathBuf,
        /// Field to group by
        #[arg(long)]
        by: String,
    },
    /// Show the fields and record count of a CSV file
    Inspect { file: PathBuf },
    /// Interactive chart against the global distribution
    Chart {
        /// Survey CSV to plot (default: the China reference table)
        #[arg(long)]
        survey: Option<PathBuf>,
    },
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".typedist")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    // The chart owns the terminal, so its logs go to a file
    let _guard = match &args.command {
        Some(Command::Chart { .. }) => Some(init_file_logging(&data_dir, &args.log_level)?),
        _ => {
            init_logging(&args.log_level)?;
            None
        }
    };

    let config = AppConfig::load(&data_dir)?;
    let ctx = Context::new(config, args.label_field)?;
    let mut out = io::stdout().lock();

    match args.command {
        None => commands::run_default(&ctx, &mut out)?,
        Some(Command::Report { survey }) => commands::report(&ctx, survey.as_deref(), &mut out)?,
        Some(Command::Export { output, survey }) => {
            commands::export(&ctx, output.as_deref(), survey.as_deref(), &mut out)?
        }
        Some(Command::Groups { file, by }) => commands::groups(&ctx, &file, &by, &mut out)?,
        Some(Command::Inspect { file }) => commands::inspect(&ctx, &file, &mut out)?,
        Some(Command::Chart { survey }) => commands::chart(&ctx, survey.as_deref())?,
    }

    tracing::debug!("typedist finished");
    Ok(())
}
