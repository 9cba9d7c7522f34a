//! Organizing pipeline: discover files, plan destinations, fan out copies,
//! and report every outcome.
//!
//! The phases are deliberately separated. Discovery and planning are
//! single-threaded and deterministic; only the copy execution fans out. That
//! keeps destination assignment free of filesystem races between workers.

mod atomic;
pub mod bucket;
pub mod copy;
pub mod dispatch;
mod helpers;
mod io_copy;
pub mod metadata;
pub mod outcome;
mod util;
pub mod walk;

pub use bucket::{CopyPlan, PlannedCopy, UNKNOWN_BUCKET, bucket_name, plan_destinations};
pub use outcome::{FileTask, Outcome, RunReport, SkipReason};
pub use walk::{Discovery, discover};

use anyhow::Result;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;

/// Free-space preflight: warn when the bytes to copy exceed what the output
/// filesystem reports as available. Advisory only; individual copies still
/// surface ENOSPC as per-file failures.
fn check_free_space(output_root: &Path, required: u64, warnings: &mut Vec<String>) {
    match fs2::available_space(output_root) {
        Ok(available) if available < required => {
            let msg = format!(
                "output filesystem may run out of space: {required} bytes to copy, {available} available"
            );
            warn!("{msg}");
            warnings.push(msg);
        }
        Ok(_) => {}
        Err(e) => debug!(error = %e, "could not query available space"),
    }
}

/// Run the full pipeline for one validated Config and report per-file outcomes.
pub fn organize(cfg: &Config) -> Result<RunReport> {
    let started = Instant::now();

    let Discovery {
        tasks,
        mut warnings,
        skipped_special,
    } = walk::discover(&cfg.source_root);
    let discovered = tasks.len();

    let required: u64 = tasks.iter().map(|t| t.size).sum();
    check_free_space(&cfg.output_root, required, &mut warnings);

    let plan = bucket::plan_destinations(tasks, &cfg.output_root, cfg.on_duplicate);
    debug!(
        copies = plan.copies.len(),
        settled = plan.settled.len(),
        buckets = plan.buckets,
        "plan ready"
    );

    let mut outcomes = plan.settled;
    if cfg.dry_run {
        for planned in plan.copies {
            info!(
                source = %planned.task.source.display(),
                dest = %planned.dest.display(),
                "Dry-run: would copy"
            );
            outcomes.push(Outcome::Skipped {
                source: planned.task.source,
                dest: planned.dest,
                reason: SkipReason::DryRun,
            });
        }
    } else {
        outcomes.extend(dispatch::run_copies(plan.copies, cfg.workers, &mut warnings));
    }

    let report = RunReport::new(
        discovered,
        plan.buckets,
        skipped_special,
        warnings,
        outcomes,
        started.elapsed(),
    );
    info!(
        discovered = report.discovered,
        copied = report.copied,
        skipped = report.skipped,
        failed = report.failed,
        bytes = report.bytes_copied,
        buckets = report.buckets,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "Organize finished"
    );
    Ok(report)
}
