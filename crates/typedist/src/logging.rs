use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Name of the log file inside the data directory
pub const LOG_FILE: &str = "typedist.log";

/// Maximum log file size before trimming (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Size to keep after trimming (1 MB of most recent logs)
const KEEP_SIZE: u64 = 1024 * 1024;

/// Filter from `RUST_LOG`, or `level` for both crates
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("typedist={level},typedist_core={level}")))
}

/// Initialize logging to stderr for non-interactive commands.
///
/// The level can be overridden with the `RUST_LOG` environment variable.
pub fn init_logging(level: &str) -> color_eyre::Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init()?;
    Ok(())
}

/// Initialize logging to `{data_dir}/typedist.log`.
///
/// Used while the terminal UI owns the screen. When the log exceeds 5MB the
/// oldest entries are dropped, keeping the last 1MB. Keep the returned guard
/// alive until exit so buffered lines are flushed.
pub fn init_file_logging(data_dir: &Path, level: &str) -> color_eyre::Result<WorkerGuard> {
    fs::create_dir_all(data_dir)?;

    let log_path = data_dir.join(LOG_FILE);
    if let Err(e) = trim_log(&log_path, MAX_LOG_SIZE, KEEP_SIZE) {
        eprintln!("Warning: Failed to trim log file: {}", e);
    }

    let appender = tracing_appender::rolling::never(data_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()?;

    tracing::info!(log_path = %log_path.display(), "typedist logging initialized");
    Ok(guard)
}

/// Drop everything but the last `keep` bytes once the file grows past `max`.
/// The cut is moved forward to the next line start.
fn trim_log(path: &Path, max: u64, keep: u64) -> std::io::Result<()> {
    let len = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    if len <= max {
        return Ok(());
    }

    let mut tail = Vec::new();
    {
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(len.saturating_sub(keep)))?;
        file.read_to_end(&mut tail)?;
    }

    let start = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |i| i + 1);

    let mut file = File::create(path)?;
    file.write_all(b"--- Log trimmed (older entries removed) ---\n")?;
    file.write_all(&tail[start..])?;
    Ok(())
}
