//! Application orchestrator.
//! Loads/merges config, initializes logging, installs signal handlers, validates paths,
//! and runs the organize pipeline.

use anyhow::{Result, bail};
use filebucket::FileBucketError;
use filebucket::output as out;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use filebucket::config::{CONFIG_ENV_VAR, LoadResult, load_or_init, validate_and_normalize};
use filebucket::{Config, default_config_path, organize, shutdown};

use crate::logging::init_tracing;
use filebucket::cli::Args;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var(CONFIG_ENV_VAR) {
            out::print_info(&format!("Using {CONFIG_ENV_VAR} (explicit):\n  {cfg_env}\n"));
            out::print_info(&format!(
                "To override, unset {CONFIG_ENV_VAR} or set it to another file."
            ));
            return Ok(());
        }
        match default_config_path() {
            Ok(p) => {
                out::print_info(&format!(
                    "Default filebucket config path:\n  {}\n",
                    p.display()
                ));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info(
                        "No config file exists there yet. A template will be created on the next run.",
                    );
                }
            }
            Err(e) => {
                out::print_error(&format!("Could not determine a default config path: {e}"));
            }
        }
        return Ok(());
    }

    let (Some(source_root), Some(output_root)) =
        (args.source_root.clone(), args.output_root.clone())
    else {
        // clap enforces the positionals; this guards direct callers of run().
        bail!("both SOURCE_DIR and OUTPUT_DIR are required");
    };
    let mut cfg = Config::new(source_root, output_root);

    // Config file values apply first; CLI flags override them below.
    match load_or_init()? {
        LoadResult::Loaded(settings) => settings.apply(&mut cfg),
        LoadResult::CreatedTemplate(path) => {
            out::print_success(&format!(
                "A template filebucket config was written to: {}",
                path.display()
            ));
            out::print_info(
                "Edit it to set defaults for `log_level`, `log_file`, `on_duplicate` and `workers`; command-line flags always win.",
            );
        }
        LoadResult::Missing => {}
    }
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt: Option<tracing_appender::non_blocking::WorkerGuard> =
        init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing in-flight copies...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        })
        .expect("failed to install signal handler");
    }

    if shutdown::is_requested() {
        return Ok(());
    }

    debug!("Starting filebucket: {:?}", args);

    // Main run (so we can drop guard after)
    let result = (|| -> Result<()> {
        // Ensure the roots are usable and canonicalize paths
        if let Err(e) = validate_and_normalize(&mut cfg) {
            if let Some(fb) = e.downcast_ref::<FileBucketError>() {
                let code = fb.code();
                match fb {
                    FileBucketError::SourceNotFound(path) => {
                        error!(code, kind = "source_not_found", path = %path.display(), "Validation failed")
                    }
                    FileBucketError::SourceNotADirectory(path) => {
                        error!(code, kind = "source_not_a_directory", path = %path.display(), "Validation failed")
                    }
                    FileBucketError::SourceUnreadable { path, context } => {
                        error!(code, kind = "source_unreadable", path = %path.display(), %context, "Validation failed")
                    }
                    FileBucketError::OutputNotADirectory(path) => {
                        error!(code, kind = "output_not_a_directory", path = %path.display(), "Validation failed")
                    }
                    FileBucketError::OutputNotWritable { path, context } => {
                        error!(code, kind = "output_not_writable", path = %path.display(), %context, "Validation failed")
                    }
                    FileBucketError::PathsOverlap {
                        source_path,
                        output,
                    } => {
                        error!(code, kind = "paths_overlap", source = %source_path.display(), output = %output.display(), "Validation failed")
                    }
                    FileBucketError::Interrupted => {
                        error!(code, kind = "interrupted", "Validation aborted by user")
                    }
                }
            } else {
                error!(error = ?e, "Validation failed");
            }
            return Err(e);
        }

        let report = organize(&cfg)?;

        for w in &report.warnings {
            out::print_warn(w);
        }
        out::print_user(&report.summary_line());
        if report.failed > 0 {
            out::print_warn(&format!(
                "{} file(s) failed to copy; see the log for details",
                report.failed
            ));
        }
        if report.skipped_special > 0 {
            out::print_info(&format!(
                "{} non-regular source entries were left in place",
                report.skipped_special
            ));
        }
        if report.was_interrupted() || shutdown::is_requested() {
            let code = FileBucketError::Interrupted.code();
            error!(code, kind = "interrupted", "Run aborted by user");
            return Err(FileBucketError::Interrupted.into());
        }

        info!(source = %cfg.source_root.display(), output = %cfg.output_root.display(), "Run completed");
        Ok(())
    })();

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}
