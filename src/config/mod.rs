//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel, OnDuplicate};
pub use validate::validate_and_normalize;
pub use xml::{
    CONFIG_ENV_VAR, LoadResult, XmlSettings, create_template_config, load_or_init,
    load_settings_from_path,
};
