//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - SOURCE_DIR and OUTPUT_DIR are required positionals, except when the user
//!   only asks for `--print-config`.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel, OnDuplicate};
use crate::output;

/// CLI wrapper for the filebucket library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Sort files into per-extension bucket directories"
)]
pub struct Args {
    /// Directory that is scanned recursively for files to sort.
    #[arg(
        value_name = "SOURCE_DIR",
        value_hint = ValueHint::DirPath,
        required_unless_present = "print_config"
    )]
    pub source_root: Option<PathBuf>,

    /// Directory that receives one bucket subdirectory per file extension.
    #[arg(
        value_name = "OUTPUT_DIR",
        value_hint = ValueHint::DirPath,
        required_unless_present = "print_config"
    )]
    pub output_root: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Append logs to this file in addition to the console.
    #[arg(
        long,
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        help = "Append logs to this file in addition to the console"
    )]
    pub log_file: Option<PathBuf>,

    /// Print where filebucket will look for the config file (or FILEBUCKET_CONFIG if set), then exit.
    #[arg(
        long,
        help = "Print the config file location used by filebucket and exit"
    )]
    pub print_config: bool,

    /// Dry-run: log planned copies but do not copy anything.
    #[arg(long, help = "Show what would be done, but do not copy any files")]
    pub dry_run: bool,

    /// What to do when a destination name is already taken.
    #[arg(
        long,
        value_name = "POLICY",
        help = "Duplicate handling: overwrite, rename, skip"
    )]
    pub on_duplicate: Option<String>,

    /// Number of copy worker threads (0 = one per CPU core).
    #[arg(
        short = 'w',
        long,
        value_name = "N",
        help = "Number of copy worker threads (0 = one per CPU core)"
    )]
    pub workers: Option<usize>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if let Some(raw) = self.on_duplicate.as_deref() {
            match OnDuplicate::parse(raw) {
                Some(policy) => cfg.on_duplicate = policy,
                None => output::print_warn(&format!(
                    "Unknown --on-duplicate value '{raw}'; keeping '{}'",
                    cfg.on_duplicate
                )),
            }
        }
        if let Some(n) = self.workers {
            cfg.workers = n;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
