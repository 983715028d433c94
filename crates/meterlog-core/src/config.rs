//! Configuration types for meterlog.
//!
//! [`Config::load`] layers, in order: the embedded defaults, the config file
//! (`~/.config/meterlog/config.toml` unless a path is given) and `METERLOG_*`
//! environment variables. [`Config::defaults`] returns the embedded defaults
//! without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::registry::MeterRegistry;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[log]
dir    = "."
prefix = "meter-log"

# Known meters, keyed by the id the meter broadcasts.
#
# [meters]
# 701193108 = "POTABLE"
[meters]
"#;

const ENV_PREFIX: &str = "METERLOG";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    /// Meter id → label.
    #[serde(default)]
    pub meters: HashMap<String, String>,
}

/// `[log]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Directory the per-run event log is created in. Must already exist.
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
    /// File name prefix; the run's start time is appended.
    #[serde(default = "default_log_prefix")]
    pub prefix: String,
}

fn default_log_dir() -> PathBuf { PathBuf::from(".") }
fn default_log_prefix() -> String { "meter-log".to_string() }

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            prefix: default_log_prefix(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration layered on top of the built-in defaults.
    ///
    /// With `path = None` the default location is used and created with the
    /// defaults if it does not exist. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => {
                let path = config_path();
                ensure_default_file(&path)?;
                (path, false)
            }
        };

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Build the meter registry from `[meters]`.
    pub fn registry(&self) -> MeterRegistry {
        MeterRegistry::from(self.meters.clone())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("meterlog")
        .join("config.toml")
}

fn ensure_default_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    let io_err = |source| Error::ConfigFile {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG.trim_start()).map_err(io_err)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
