use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// How much of the controller's activity to log on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Silent; only the replay summary and markup are printed
    Off,
    /// Config or catalog failures
    Error,
    /// Ignored duplicate blocks in `enabled_blocks`
    Warn,
    /// Controller teardown and replay totals
    Info,
    /// Each search issued, settled or canceled
    Debug,
    /// Each popup render, hide and dropped stale result
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "asg")]
#[command(about = "asg - replay keystrokes through the suggestion popup and print what it shows")]
#[command(version)]
pub struct Cli {
    /// Input text after each keystroke, in order (e.g. `s sh sho`)
    #[arg(required = true)]
    pub keystrokes: Vec<String>,

    /// Popup config file (.toml or .json)
    #[arg(short = 'C', long, env = "ASG_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON result set to search (defaults to a built-in demo catalog)
    #[arg(short = 'c', long)]
    pub catalog: Option<PathBuf>,

    /// Simulated backend latency in milliseconds
    #[arg(long = "latency-ms", default_value = "50")]
    pub latency_ms: u64,

    /// Delay between keystrokes in milliseconds
    #[arg(long = "interval-ms", default_value = "10")]
    pub interval_ms: u64,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Effective log level; an explicit `--log-level` wins over `--verbose`
    pub fn level(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::WARN,
        }
    }
}
