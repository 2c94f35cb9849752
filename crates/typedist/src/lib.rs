//! Command-line front-end for the type distribution analyzer
//!
//! Wires `typedist_core` to:
//! - a YAML config file in the data directory
//! - `tracing` output on stderr, or a log file while the chart view is open
//! - text commands (report, export, groups, inspect)
//! - an interactive terminal chart comparing two distributions

pub mod chart;
pub mod commands;
pub mod config;
pub mod logging;

pub use chart::{ComparisonChart, Series};
pub use commands::Context;
pub use config::{AppConfig, ConfigError};
pub use logging::{init_file_logging, init_logging};
