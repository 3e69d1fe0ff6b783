//! Configuration: screen definitions, built-in presets and the config file.

pub mod loader;
pub mod presets;
pub mod screen;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};
pub use screen::{
    FilterSection, FilterSpec, MatchMode, ScreenConfig, ScreenConfigBuilder, ScreenSection,
    SortOrder, SortSection, SortSpec,
};
