//! Configuration file loading with precedence handling.

use crate::config::presets;
use crate::config::screen::{ScreenConfig, ScreenSection};
use crate::model::ScreenName;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LISTVIEW_CONFIG";
/// Environment variable overriding every screen's page size.
pub const PAGE_SIZE_ENV: &str = "LISTVIEW_PAGE_SIZE";
/// Environment variable overriding every screen's debounce interval (ms).
pub const DEBOUNCE_ENV: &str = "LISTVIEW_DEBOUNCE_MS";

/// Errors that can occur during config loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
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

    /// A screen definition is inconsistent.
    #[error("Invalid screen {screen}: {reason}")]
    InvalidScreen {
        /// Screen being defined.
        screen: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A page size of zero or below was configured.
    #[error("Invalid page size {value} for screen {screen}: must be a positive integer")]
    InvalidPageSize {
        /// Screen being configured ("*" for global settings).
        screen: String,
        /// Rejected value.
        value: i64,
    },

    /// No screen with this name is configured.
    #[error("Unknown screen {name} (known: {known})")]
    UnknownScreen {
        /// Requested screen.
        name: String,
        /// Comma-separated configured screens.
        known: String,
    },

    /// An environment override could not be parsed.
    #[error("Invalid value {value:?} for {var}")]
    InvalidEnv {
        /// Variable name.
        var: String,
        /// Raw value.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, built-in defaults are used.
/// Corresponds to `~/.config/listview/config.toml`.
///
/// ```toml
/// default_screen = "businesses"
/// default_page_size = 20
///
/// [screens.businesses.filters.plan]
/// allowed_values = ["premium", "enterprise"]
/// matcher = "substring"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Debounce interval for every screen that does not set its own.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Page size for every screen that does not set its own.
    #[serde(default)]
    pub default_page_size: Option<i64>,

    /// Screen opened when none is requested.
    #[serde(default)]
    pub default_screen: Option<String>,

    /// Screen definitions and preset overrides.
    #[serde(default)]
    pub screens: Option<BTreeMap<String, ScreenSection>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Screen opened when none is requested.
    pub default_screen: ScreenName,
    /// Every configured screen by name.
    pub screens: BTreeMap<ScreenName, ScreenConfig>,
}

impl ResolvedConfig {
    /// Built-in screens only, default log path.
    ///
    /// # Errors
    ///
    /// Only if a built-in preset is invalid.
    pub fn defaults() -> Result<Self, ConfigError> {
        let screens = presets::presets()?
            .into_iter()
            .map(|screen| (screen.name().clone(), screen))
            .collect::<BTreeMap<_, _>>();
        let default_screen = lookup_name(&screens, presets::PRESET_NAMES[0])?;
        Ok(Self {
            log_file_path: default_log_path(),
            default_screen,
            screens,
        })
    }

    /// Look up a screen by name.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownScreen`] listing the configured screens.
    pub fn screen(&self, name: &str) -> Result<&ScreenConfig, ConfigError> {
        self.screens
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, screen)| screen)
            .ok_or_else(|| unknown_screen(&self.screens, name))
    }

    /// The screen opened when none is requested.
    pub fn default_screen(&self) -> Result<&ScreenConfig, ConfigError> {
        self.screen(self.default_screen.as_str())
    }

    fn map_screens(
        mut self,
        f: impl Fn(&ScreenConfig) -> Result<ScreenConfig, ConfigError>,
    ) -> Result<Self, ConfigError> {
        for screen in self.screens.values_mut() {
            *screen = f(screen)?;
        }
        Ok(self)
    }
}

fn unknown_screen(screens: &BTreeMap<ScreenName, ScreenConfig>, name: &str) -> ConfigError {
    ConfigError::UnknownScreen {
        name: name.to_string(),
        known: screens
            .keys()
            .map(ScreenName::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn lookup_name(
    screens: &BTreeMap<ScreenName, ScreenConfig>,
    name: &str,
) -> Result<ScreenName, ConfigError> {
    screens
        .keys()
        .find(|n| n.as_str() == name)
        .cloned()
        .ok_or_else(|| unknown_screen(screens, name))
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/listview/listview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("listview").join("listview.log")
    } else {
        PathBuf::from("listview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
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

    info!(path = %path.display(), "loaded config file");
    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/listview/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("listview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `LISTVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/listview/config.toml`
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

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// Global `default_page_size`/`debounce_ms` apply to every screen whose own
/// section does not set them. Sections for preset names override the preset;
/// sections for other names define new screens.
///
/// # Errors
///
/// Returns error if any screen definition fails validation or
/// `default_screen` names an unknown screen.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let mut resolved = ResolvedConfig::defaults()?;

    let Some(config) = config_file else {
        return Ok(resolved);
    };

    if let Some(path) = config.log_file_path {
        resolved.log_file_path = path;
    }

    let global = ScreenSection {
        default_page_size: config.default_page_size,
        debounce_ms: config.debounce_ms,
        ..ScreenSection::default()
    };
    let sections = config.screens.unwrap_or_default();

    // Presets without their own section still pick up the global settings.
    resolved = resolved.map_screens(|screen| {
        if sections.contains_key(screen.name().as_str()) {
            Ok(screen.clone())
        } else {
            screen.with_section(&global)
        }
    })?;

    for (name, section) in &sections {
        let mut section = section.clone();
        section.default_page_size = section.default_page_size.or(global.default_page_size);
        section.debounce_ms = section.debounce_ms.or(global.debounce_ms);

        let screen_name = ScreenName::new(name.as_str()).map_err(|e| ConfigError::InvalidScreen {
            screen: name.clone(),
            reason: e.to_string(),
        })?;
        let screen = match resolved.screens.get(&screen_name) {
            Some(existing) => existing.with_section(&section)?,
            None => ScreenConfig::from_section(screen_name.clone(), &section)?,
        };
        resolved.screens.insert(screen_name, screen);
    }

    if let Some(name) = config.default_screen {
        resolved.default_screen = lookup_name(&resolved.screens, &name)?;
    }

    Ok(resolved)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `LISTVIEW_PAGE_SIZE`: page size for every screen
/// - `LISTVIEW_DEBOUNCE_MS`: debounce interval for every screen
///
/// # Errors
///
/// Returns error if a variable is set but not a valid number, or the page
/// size is not positive.
pub fn apply_env_overrides(config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    let page_size = read_env::<i64>(PAGE_SIZE_ENV)?;
    let debounce_ms = read_env::<u64>(DEBOUNCE_ENV)?;

    if page_size.is_none() && debounce_ms.is_none() {
        return Ok(config);
    }

    let overrides = ScreenSection {
        default_page_size: page_size,
        debounce_ms,
        ..ScreenSection::default()
    };
    config.map_screens(|screen| screen.with_section(&overrides))
}

fn read_env<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError> {
    let Ok(raw) = std::env::var(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(ConfigError::InvalidEnv {
            var: var.to_string(),
            value: raw,
        }),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Errors
///
/// Returns error if `screen_override` names an unknown screen.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    screen_override: Option<String>,
    log_file_override: Option<PathBuf>,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(name) = screen_override {
        config.default_screen = lookup_name(&config.screens, &name)?;
    }

    if let Some(path) = log_file_override {
        config.log_file_path = path;
    }

    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
