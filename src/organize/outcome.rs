//! Per-file task and outcome types plus the end-of-run report.
//!
//! The accounting rule through the whole pipeline: every discovered file ends
//! in exactly one Outcome. Planning may pre-resolve a file to a skip, workers
//! turn the rest into copied/failed, and a shutdown turns not-yet-started
//! copies into interrupted skips. Nothing is silently dropped.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One regular file discovered under the source root.
#[derive(Debug, Clone)]
pub struct FileTask {
    pub source: PathBuf,
    /// Size at discovery time. 0 when the stat failed; the copy itself will
    /// surface the underlying error as a failed outcome.
    pub size: u64,
}

/// Why a discovered file was deliberately not copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Destination name already taken and the policy is skip.
    Duplicate,
    /// Dry-run; the copy was planned but not performed.
    DryRun,
    /// Shutdown was requested before this file's copy started.
    Interrupted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::Duplicate => "duplicate",
            SkipReason::DryRun => "dry-run",
            SkipReason::Interrupted => "interrupted",
        };
        f.write_str(s)
    }
}

/// Terminal result for one discovered file.
#[derive(Debug, Clone)]
pub enum Outcome {
    Copied {
        source: PathBuf,
        dest: PathBuf,
        bytes: u64,
    },
    Skipped {
        source: PathBuf,
        dest: PathBuf,
        reason: SkipReason,
    },
    Failed {
        source: PathBuf,
        error: String,
    },
}

impl Outcome {
    pub fn source(&self) -> &Path {
        match self {
            Outcome::Copied { source, .. }
            | Outcome::Skipped { source, .. }
            | Outcome::Failed { source, .. } => source,
        }
    }
}

/// Aggregated result of one organizing run.
#[derive(Debug)]
pub struct RunReport {
    /// Regular files found under the source root.
    pub discovered: usize,
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
    pub bytes_copied: u64,
    /// Distinct bucket directories the plan mapped files into.
    pub buckets: usize,
    /// Non-regular entries (symlinks, sockets, ...) left in place.
    pub skipped_special: usize,
    /// Non-fatal conditions worth showing the user (walk errors, pool fallback).
    pub warnings: Vec<String>,
    pub elapsed: Duration,
    /// One terminal outcome per discovered file.
    pub outcomes: Vec<Outcome>,
}

impl RunReport {
    /// Tally counts from the collected outcomes.
    pub fn new(
        discovered: usize,
        buckets: usize,
        skipped_special: usize,
        warnings: Vec<String>,
        outcomes: Vec<Outcome>,
        elapsed: Duration,
    ) -> Self {
        let mut copied = 0usize;
        let mut skipped = 0usize;
        let mut failed = 0usize;
        let mut bytes_copied = 0u64;
        for outcome in &outcomes {
            match outcome {
                Outcome::Copied { bytes, .. } => {
                    copied += 1;
                    bytes_copied += bytes;
                }
                Outcome::Skipped { .. } => skipped += 1,
                Outcome::Failed { .. } => failed += 1,
            }
        }
        Self {
            discovered,
            copied,
            skipped,
            failed,
            bytes_copied,
            buckets,
            skipped_special,
            warnings,
            elapsed,
            outcomes,
        }
    }

    /// True when every discovered file was copied.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }

    /// True when shutdown cut the run short.
    pub fn was_interrupted(&self) -> bool {
        self.outcomes.iter().any(|o| {
            matches!(
                o,
                Outcome::Skipped {
                    reason: SkipReason::Interrupted,
                    ..
                }
            )
        })
    }

    /// One-line human summary for the end of the run.
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "Sorted {} of {} files into {} buckets in {:.1}s",
            self.copied,
            self.discovered,
            self.buckets,
            self.elapsed.as_secs_f64()
        );
        if self.failed > 0 || self.skipped > 0 {
            let mut extras = Vec::new();
            if self.failed > 0 {
                extras.push(format!("{} failed", self.failed));
            }
            if self.skipped > 0 {
                extras.push(format!("{} skipped", self.skipped));
            }
            line.push_str(&format!(" ({})", extras.join(", ")));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_outcomes() -> Vec<Outcome> {
        vec![
            Outcome::Copied {
                source: "/s/a.txt".into(),
                dest: "/o/txt/a.txt".into(),
                bytes: 10,
            },
            Outcome::Copied {
                source: "/s/b.txt".into(),
                dest: "/o/txt/b.txt".into(),
                bytes: 32,
            },
            Outcome::Skipped {
                source: "/s/c.txt".into(),
                dest: "/o/txt/c.txt".into(),
                reason: SkipReason::Duplicate,
            },
            Outcome::Failed {
                source: "/s/d.jpg".into(),
                error: "permission denied".into(),
            },
        ]
    }

    #[test]
    fn report_tallies_outcomes() {
        let report = RunReport::new(
            4,
            2,
            1,
            vec!["walk error".into()],
            sample_outcomes(),
            Duration::from_millis(1500),
        );
        assert_eq!(report.discovered, 4);
        assert_eq!(report.copied, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.bytes_copied, 42);
        assert_eq!(report.outcomes.len(), report.discovered);
        assert!(!report.is_clean());
        assert!(!report.was_interrupted());
    }

    #[test]
    fn summary_line_mentions_failures_and_skips() {
        let report = RunReport::new(
            4,
            2,
            0,
            Vec::new(),
            sample_outcomes(),
            Duration::from_secs(2),
        );
        let line = report.summary_line();
        assert!(line.contains("Sorted 2 of 4 files into 2 buckets"), "{line}");
        assert!(line.contains("1 failed"), "{line}");
        assert!(line.contains("1 skipped"), "{line}");
    }

    #[test]
    fn clean_report_has_short_summary() {
        let outcomes = vec![Outcome::Copied {
            source: "/s/a.txt".into(),
            dest: "/o/txt/a.txt".into(),
            bytes: 1,
        }];
        let report = RunReport::new(1, 1, 0, Vec::new(), outcomes, Duration::from_secs(1));
        assert!(report.is_clean());
        assert!(!report.summary_line().contains('('));
    }
}
