//! Configuration file loading with precedence handling.

use crate::view_state::{ConfigurationError, LayoutParams, LayoutSettings, UiMode};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CHATSTACK_CONFIG";

/// Environment variable overriding the ui mode (`read` or `write`).
pub const UI_MODE_ENV: &str = "CHATSTACK_UI_MODE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/chatstack/config.toml`:
///
/// ```toml
/// item_height = 100.0
/// stack_depth = 3
/// scaling_key_points = [1.0, 0.92, 0.85, 0.8]
/// ui_mode = "write"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Depth distance between consecutive focus positions.
    #[serde(default)]
    pub item_height: Option<f64>,

    /// Number of item heights a receding item stays visible for.
    #[serde(default)]
    pub stack_depth: Option<u32>,

    #[serde(default)]
    pub scaling_key_points: Option<Vec<f64>>,

    /// Vertical spacing in read mode.
    #[serde(default)]
    pub spacing_key_points: Option<Vec<f64>>,

    /// Vertical spacing in write mode.
    #[serde(default)]
    pub write_spacing_key_points: Option<Vec<f64>>,

    #[serde(default)]
    pub alpha_key_points: Option<Vec<f64>>,

    /// Initial ui mode.
    #[serde(default)]
    pub ui_mode: Option<UiMode>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args. The
/// layout settings are still raw; [`ResolvedConfig::layout_params`]
/// validates them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Layout settings for the depth-stack engine.
    pub layout: LayoutSettings,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Validate the layout settings.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found in the settings.
    pub fn layout_params(&self) -> Result<LayoutParams, ConfigurationError> {
        LayoutParams::new(self.layout.clone())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/chatstack/chatstack.log` on Unix-like systems,
/// or the platform state directory elsewhere. Falls back to the current
/// directory when no state directory exists.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("chatstack").join("chatstack.log"),
        None => PathBuf::from("chatstack.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/chatstack/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chatstack").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CHATSTACK_CONFIG` environment variable
/// 3. Default path `~/.config/chatstack/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// Values are not validated here.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let layout = defaults.layout;
    ResolvedConfig {
        layout: LayoutSettings {
            item_height: config.item_height.unwrap_or(layout.item_height),
            stack_depth: config.stack_depth.unwrap_or(layout.stack_depth),
            scaling_key_points: config
                .scaling_key_points
                .unwrap_or(layout.scaling_key_points),
            spacing_key_points: config
                .spacing_key_points
                .unwrap_or(layout.spacing_key_points),
            write_spacing_key_points: config
                .write_spacing_key_points
                .unwrap_or(layout.write_spacing_key_points),
            alpha_key_points: config.alpha_key_points.unwrap_or(layout.alpha_key_points),
            ui_mode: config.ui_mode.unwrap_or(layout.ui_mode),
        },
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CHATSTACK_UI_MODE`: Override the ui mode. Unknown values are ignored
///   with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(UI_MODE_ENV) {
        match raw.parse::<UiMode>() {
            Ok(mode) => config.layout.ui_mode = mode,
            Err(error) => warn!(%error, "ignoring {UI_MODE_ENV}"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    mode_override: Option<UiMode>,
    stack_depth_override: Option<u32>,
) -> ResolvedConfig {
    if let Some(mode) = mode_override {
        config.layout.ui_mode = mode;
    }

    if let Some(stack_depth) = stack_depth_override {
        config.layout.stack_depth = stack_depth;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
