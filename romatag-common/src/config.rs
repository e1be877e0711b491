//! Configuration loading and resolution
//!
//! Config file path priority order:
//! 1. Command-line argument (highest priority)
//! 2. `ROMATAG_CONFIG` environment variable
//! 3. Platform config directory (`<config>/romatag/config.toml`)
//! 4. Compiled defaults (fallback, no file)
//!
//! A missing config file is not an error: a warning is logged and the
//! compiled defaults are used. A file that exists but does not parse is
//! an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "ROMATAG_CONFIG";

/// Tag key used for the archived original title
pub const DEFAULT_ARCHIVE_KEY: &str = "ORIG_TITLE";

/// Audio file extensions considered for processing
pub const DEFAULT_EXTENSIONS: [&str; 5] = ["mp3", "flac", "wav", "m4a", "ogg"];

/// Compiled default values used when neither config file nor CLI sets them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDefaults {
    pub archive_key: String,
    pub extensions: Vec<String>,
    pub old_title_width: usize,
    pub new_title_width: usize,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            archive_key: DEFAULT_ARCHIVE_KEY.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            old_title_width: 50,
            new_title_width: 40,
            log_level: "info".to_string(),
        }
    }
}

/// `[report]` section of the config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Display columns reserved for the original title
    pub old_title_width: Option<usize>,
    /// Display columns reserved for the rewritten title
    pub new_title_width: Option<usize>,
}

/// `[logging]` section of the config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,
}

/// On-disk TOML configuration; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub archive_key: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub archive_key: String,
    /// Lower-case extensions without the leading dot
    pub extensions: Vec<String>,
    pub old_title_width: usize,
    pub new_title_width: usize,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = CompiledDefaults::default();
        Self {
            archive_key: defaults.archive_key,
            extensions: defaults.extensions,
            old_title_width: defaults.old_title_width,
            new_title_width: defaults.new_title_width,
            log_level: defaults.log_level,
        }
    }
}

impl Settings {
    /// Merge a parsed config file over the compiled defaults
    pub fn from_toml(config: TomlConfig) -> Result<Self> {
        let defaults = CompiledDefaults::default();

        let archive_key = config.archive_key.unwrap_or(defaults.archive_key);
        validate_archive_key(&archive_key)?;

        let extensions = match config.extensions {
            Some(list) => list
                .iter()
                .map(|e| normalize_extension(e))
                .collect::<Result<Vec<_>>>()?,
            None => defaults.extensions,
        };
        if extensions.is_empty() {
            return Err(Error::Config("extensions list must not be empty".to_string()));
        }

        Ok(Self {
            archive_key,
            extensions,
            old_title_width: config.report.old_title_width.unwrap_or(defaults.old_title_width),
            new_title_width: config.report.new_title_width.unwrap_or(defaults.new_title_width),
            log_level: config.logging.level.unwrap_or(defaults.log_level),
        })
    }

    /// Override the archive key (e.g. from the command line)
    pub fn with_archive_key(mut self, key: &str) -> Result<Self> {
        validate_archive_key(key)?;
        self.archive_key = key.to_string();
        Ok(self)
    }
}

/// Resolve which config file to read, if any
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory, only if present
    default_config_path().filter(|p| p.exists())
}

/// Platform config file location (`~/.config/romatag/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("romatag").join("config.toml"))
}

/// Read and parse a TOML config file
///
/// A missing file yields the empty config with a warning.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Config file not found: {}, using defaults", path.display());
            return Ok(TomlConfig::default());
        }
        Err(e) => return Err(Error::Io(e)),
    };

    toml::from_str(&content).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Resolve the config path and load settings from it
pub fn load_settings(cli_arg: Option<&Path>) -> Result<Settings> {
    match resolve_config_path(cli_arg) {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            Settings::from_toml(load_toml_config(&path)?)
        }
        None => {
            debug!("No config file, using compiled defaults");
            Ok(Settings::default())
        }
    }
}

fn validate_archive_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::Config("archive_key must not be empty".to_string()));
    }
    Ok(())
}

/// Strip a leading dot and lower-case; a bare "." is rejected
fn normalize_extension(ext: &str) -> Result<String> {
    let trimmed = ext.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("invalid extension: {:?}", ext)));
    }
    Ok(trimmed.to_lowercase())
}
