//! XML configuration support.
//! - Loads behavior knobs from config.xml (quick_xml).
//! - Creates a commented template if missing (unless FILEBUCKET_CONFIG is set).
//!
//! The config file never carries the source/output roots; those always come
//! from the command line. Only ambient knobs (logging, duplicate policy,
//! worker count) live here, and CLI flags override all of them.

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel, OnDuplicate};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "FILEBUCKET_CONFIG";

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "on_duplicate")]
    on_duplicate: Option<String>,
    #[serde(rename = "workers", default, deserialize_with = "de_usize_trimmed_opt")]
    workers: Option<usize>,
}

// Custom deserializer that trims surrounding whitespace for optional usize
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse::<usize>().ok()))
}

/// Knobs parsed from a config file. Unset fields leave the Config untouched.
#[derive(Debug, Default)]
pub struct XmlSettings {
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub on_duplicate: Option<OnDuplicate>,
    pub workers: Option<usize>,
}

impl XmlSettings {
    /// Fold these settings into `cfg`. CLI overrides are applied afterwards.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(lvl) = &self.log_level {
            cfg.log_level = lvl.clone();
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(policy) = self.on_duplicate {
            cfg.on_duplicate = policy;
        }
        if let Some(w) = self.workers {
            cfg.workers = w;
        }
    }
}

/// Result of the initial config lookup.
#[derive(Debug)]
pub enum LoadResult {
    /// A config file existed and parsed (possibly with all fields unset).
    Loaded(XmlSettings),
    /// No file at the default location; a commented template was written there.
    CreatedTemplate(PathBuf),
    /// No config in effect (missing, unparseable, or template creation failed).
    Missing,
}

/// Locate and load the config, creating a template at the default path on
/// first run. FILEBUCKET_CONFIG takes precedence and must point at a loadable
/// file; a missing or broken explicit config is a hard error.
pub fn load_or_init() -> Result<LoadResult> {
    if let Some(p) = env::var_os(CONFIG_ENV_VAR) {
        let path = PathBuf::from(p);
        let settings = load_settings_from_path(&path)
            .with_context(|| format!("load config from {CONFIG_ENV_VAR}={}", path.display()))?;
        return Ok(LoadResult::Loaded(settings));
    }

    let cfg_path = match default_config_path() {
        Ok(p) => p,
        Err(e) => {
            debug!("No default config path available: {e:#}");
            return Ok(LoadResult::Missing);
        }
    };

    if !cfg_path.exists() {
        return match create_template_config(&cfg_path) {
            Ok(()) => Ok(LoadResult::CreatedTemplate(cfg_path)),
            Err(e) => {
                warn!(path = %cfg_path.display(), error = %format!("{e:#}"), "Could not create template config; continuing with defaults");
                Ok(LoadResult::Missing)
            }
        };
    }

    match load_settings_from_path(&cfg_path) {
        Ok(settings) => Ok(LoadResult::Loaded(settings)),
        Err(e) => {
            // Unknown fields are a refusal to start (serde deny_unknown_fields);
            // anything else is logged and the defaults are used.
            let msg = format!("{e:#}");
            if msg.contains("unknown field") {
                return Err(anyhow!(
                    "Unknown field in filebucket config {}: {}. Refusing to start.",
                    cfg_path.display(),
                    msg
                ));
            }
            warn!(path = %cfg_path.display(), error = %msg, "Failed to parse config; continuing with defaults");
            Ok(LoadResult::Missing)
        }
    }
}

/// Load settings from a specific XML file path (quick_xml).
pub fn load_settings_from_path(path: &Path) -> Result<XmlSettings> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig =
        from_xml_str(&contents).with_context(|| format!("parse config xml '{}'", path.display()))?;

    let log_level = parsed
        .log_level
        .as_deref()
        .and_then(|s| s.trim().parse::<LogLevel>().ok());
    let log_file = parsed.log_file.as_deref().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    });
    let on_duplicate = parsed
        .on_duplicate
        .as_deref()
        .and_then(|s| s.trim().parse::<OnDuplicate>().ok());

    Ok(XmlSettings {
        log_level,
        log_file,
        on_duplicate,
        workers: parsed.workers,
    })
}

/// Create the default template config file and parent directory.
/// Uses exclusive creation to avoid following attacker-controlled symlinks on Unix.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        set_dir_mode_private(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/filebucket.log".into());

    let content = format!(
        "<!--\n  filebucket configuration (XML)\n\n  Fields (all optional; command-line flags override these):\n    log_level     -> quiet | normal | info | debug\n    log_file      -> append logs to this file as well as stdout\n    on_duplicate  -> overwrite | rename | skip (what to do when a destination name is taken)\n    workers       -> copy worker threads (0 = one per CPU core)\n\n  The source and output directories always come from the command line:\n    filebucket <SOURCE_DIR> <OUTPUT_DIR>\n-->\n<config>\n  <log_level>normal</log_level>\n  <on_duplicate>overwrite</on_duplicate>\n  <workers>0</workers>\n  <!-- <log_file>{}</log_file> -->\n</config>\n",
        suggested_log
    );

    write_new_private(path, content.as_bytes())
        .with_context(|| format!("write template config '{}'", path.display()))?;

    info!("Created template config at {}", path.display());
    Ok(())
}

/// Exclusive-create the file (never follows an existing path) with 0600 on Unix.
fn write_new_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut opts = fs::OpenOptions::new();
    opts.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut f = opts.open(path)?;
    f.write_all(contents)?;
    f.sync_all()
}

#[cfg(unix)]
fn set_dir_mode_private(dir: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let _ = fs::set_permissions(dir, fs::Permissions::from_mode(0o700));
}

#[cfg(not(unix))]
fn set_dir_mode_private(_dir: &Path) {}
