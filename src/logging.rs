//! Log file setup
//!
//! The library itself only emits `tracing` events and never installs a
//! subscriber. Scripts and notebooks calling the API usually have no logging
//! of their own, so [`setup_logging`] offers an opt-in file sink at
//! `<config dir>/denvr/denvr.log`. Token refreshes, retries and dropped
//! arguments all show up there at `debug`. Applications that already run a
//! subscriber should skip it; installation then fails quietly.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(format!("Unknown log level: {other}")),
        }
    }
}

/// Install a file-backed subscriber at [`get_log_path`]. Keep the returned
/// guard alive for as long as logs should be flushed; `LogLevel::Off`
/// installs nothing.
pub fn setup_logging(level: LogLevel) -> Option<WorkerGuard> {
    setup_logging_to(level, &get_log_path())
}

/// [`setup_logging`] writing to an explicit file
pub fn setup_logging_to(level: LogLevel, log_path: &Path) -> Option<WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let file = match open_log_file(log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("denvr: cannot open log file {}: {}", log_path.display(), e);
            return None;
        },
    };

    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(writer.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .ok()?;

    tracing::info!(version = crate::VERSION, ?level, path = %log_path.display(), "denvr logging started");

    Some(guard)
}

/// Open `path` for appending, creating parent directories as needed
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Default log location, next to other per-user config
pub fn get_log_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("denvr"))
        .or_else(|| dirs::home_dir().map(|home| home.join(".denvr")))
        .unwrap_or_default()
        .join("denvr.log")
}
