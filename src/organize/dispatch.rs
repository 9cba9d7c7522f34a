//! Parallel execution of the copy plan.
//!
//! Fan-out: planned copies run on rayon workers. Fan-in: every copy returns
//! an Outcome and the collected vector keeps plan order. A requested shutdown
//! turns not-yet-started copies into interrupted skips; in-flight copies run
//! to completion so no temp files are left behind.

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::shutdown;

use super::bucket::PlannedCopy;
use super::copy;
use super::outcome::{Outcome, SkipReason};

/// Execute the planned copies with `workers` threads (0 = shared global pool).
pub fn run_copies(
    copies: Vec<PlannedCopy>,
    workers: usize,
    warnings: &mut Vec<String>,
) -> Vec<Outcome> {
    if copies.is_empty() {
        return Vec::new();
    }

    if workers == 0 {
        return copies.par_iter().map(execute_one).collect();
    }

    match ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(|| copies.par_iter().map(execute_one).collect()),
        Err(e) => {
            let msg =
                format!("failed to build a {workers}-thread pool ({e}); using the shared pool");
            warn!("{msg}");
            warnings.push(msg);
            copies.par_iter().map(execute_one).collect()
        }
    }
}

fn execute_one(planned: &PlannedCopy) -> Outcome {
    if shutdown::is_requested() {
        return Outcome::Skipped {
            source: planned.task.source.clone(),
            dest: planned.dest.clone(),
            reason: SkipReason::Interrupted,
        };
    }
    match copy::copy_file(planned) {
        Ok(bytes) => {
            info!(
                source = %planned.task.source.display(),
                dest = %planned.dest.display(),
                bucket = %planned.bucket.to_string_lossy(),
                bytes,
                "Copied file"
            );
            Outcome::Copied {
                source: planned.task.source.clone(),
                dest: planned.dest.clone(),
                bytes,
            }
        }
        Err(e) => {
            let error = format!("{e:#}");
            error!(
                source = %planned.task.source.display(),
                dest = %planned.dest.display(),
                error = %error,
                "Copy failed"
            );
            Outcome::Failed {
                source: planned.task.source.clone(),
                error,
            }
        }
    }
}
