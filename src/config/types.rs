//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel and OnDuplicate represent user-facing knobs with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// What to do when a planned destination name is already taken, either by a
/// file from an earlier run or by another source file sorted in the same run.
///
/// Two distinct source files landing on the same destination within one run
/// always get deterministic " (n)" suffixes (or a skip, under `Skip`); the
/// policy decides how files already present on disk are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnDuplicate {
    /// Replace a file left by an earlier run (default; re-runs converge).
    #[default]
    Overwrite,
    /// Never replace anything; pick a unique " (n)" name instead.
    RenameWithSuffix,
    /// Never replace anything; record the file as skipped.
    Skip,
}

impl OnDuplicate {
    /// Parse common string names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" | "replace" => Some(OnDuplicate::Overwrite),
            "rename" | "suffix" => Some(OnDuplicate::RenameWithSuffix),
            "skip" | "ignore" => Some(OnDuplicate::Skip),
            _ => None,
        }
    }
}

impl fmt::Display for OnDuplicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OnDuplicate::Overwrite => "overwrite",
            OnDuplicate::RenameWithSuffix => "rename",
            OnDuplicate::Skip => "skip",
        };
        f.write_str(s)
    }
}

impl FromStr for OnDuplicate {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid duplicate policy: '{s}'"))
    }
}

/// Runtime configuration for one organizing run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned recursively for files to sort
    pub source_root: PathBuf,
    /// Directory receiving one bucket subdirectory per extension
    pub output_root: PathBuf,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, plan and log actions but do not copy any files
    pub dry_run: bool,
    /// How to handle destination names that are already taken
    pub on_duplicate: OnDuplicate,
    /// Copy worker threads (0 = one per CPU core via the global pool)
    pub workers: usize,
}

impl Config {
    /// Construct a Config with explicit roots; other fields use defaults.
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            log_level: LogLevel::Normal,
            log_file: None,
            dry_run: false,
            on_duplicate: OnDuplicate::Overwrite,
            workers: 0,
        }
    }
}
