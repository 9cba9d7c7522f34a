//! Core library for `filebucket`.
//!
//! Sorts the regular files under a source directory into per-extension
//! bucket subdirectories of an output directory, copying concurrently and
//! reporting one terminal outcome per discovered file.
//!
//! The pipeline lives in [`organize`]: discover files, plan destinations,
//! fan out the copies, report. [`config`] carries the runtime knobs and path
//! validation, [`errors`] the typed fatal errors, and the binary's CLI
//! surface is defined in [`cli`].

pub mod cli;
pub mod config;
pub mod errors;
pub mod organize;
pub mod output;
pub mod shutdown;

pub use config::{
    CONFIG_ENV_VAR, Config, LoadResult, LogLevel, OnDuplicate, default_config_path,
    default_log_path, load_or_init, load_settings_from_path, path_has_symlink_ancestor,
    validate_and_normalize,
};
pub use errors::FileBucketError;
pub use organize::{
    FileTask, Outcome, RunReport, SkipReason, UNKNOWN_BUCKET, bucket_name, discover, organize,
    plan_destinations,
};
