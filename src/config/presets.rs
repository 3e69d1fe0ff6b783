//! Built-in screen definitions for the admin console's list screens.
//!
//! Each preset can be overridden field-by-field from `[screens.<name>]` in the
//! config file.

use crate::config::{ConfigError, FilterSpec, ScreenConfig, SortSpec};
use crate::model::{FieldName, FilterName, ScreenName, SortKey};

/// Names of the built-in screens, in menu order.
pub const PRESET_NAMES: [&str; 4] = ["businesses", "locations", "users", "units"];

const STATUS_VALUES: &[&str] = &["active", "inactive"];

/// All built-in screens.
///
/// # Errors
///
/// Only fails if a preset definition is itself invalid.
pub fn presets() -> Result<Vec<ScreenConfig>, ConfigError> {
    PRESET_NAMES.iter().map(|name| preset(name)).collect()
}

/// Built-in screen by name.
///
/// # Errors
///
/// [`ConfigError::UnknownScreen`] if `name` is not a preset.
pub fn preset(name: &str) -> Result<ScreenConfig, ConfigError> {
    match name {
        "businesses" => businesses(),
        "locations" => locations(),
        "users" => users(),
        "units" => units(),
        other => Err(ConfigError::UnknownScreen {
            name: other.to_string(),
            known: PRESET_NAMES.join(", "),
        }),
    }
}

fn businesses() -> Result<ScreenConfig, ConfigError> {
    ScreenConfig::builder(screen("businesses")?)
        .search_field(field("name")?)
        .search_field(field("email")?)
        .search_field(field("phone")?)
        .search_field(field("plan")?)
        .filter(filter("status")?, FilterSpec::exact(field("status")?, STATUS_VALUES))
        .filter(
            filter("plan")?,
            FilterSpec::substring(field("plan")?, &["premium", "standard", "free"]),
        )
        .sort_option(sort("name")?, SortSpec::ascending(field("name")?))
        .sort_option(sort("recent")?, SortSpec::descending(field("id")?))
        .sort_option(sort("status")?, SortSpec::ascending(field("status")?))
        .default_sort(sort("name")?)
        .build()
}

fn locations() -> Result<ScreenConfig, ConfigError> {
    ScreenConfig::builder(screen("locations")?)
        .search_field(field("name")?)
        .search_field(field("address")?)
        .search_field(field("city")?)
        .search_field(field("business.name")?)
        .filter(filter("status")?, FilterSpec::exact(field("status")?, STATUS_VALUES))
        .filter(
            filter("type")?,
            FilterSpec::exact(field("type")?, &["warehouse", "store", "office"]),
        )
        .sort_option(sort("name")?, SortSpec::ascending(field("name")?))
        .sort_option(sort("recent")?, SortSpec::descending(field("id")?))
        .sort_option(sort("status")?, SortSpec::ascending(field("status")?))
        .default_sort(sort("name")?)
        .build()
}

fn users() -> Result<ScreenConfig, ConfigError> {
    ScreenConfig::builder(screen("users")?)
        .search_field(field("name")?)
        .search_field(field("email")?)
        .search_field(field("role")?)
        .filter(filter("status")?, FilterSpec::exact(field("status")?, STATUS_VALUES))
        .filter(
            filter("role")?,
            FilterSpec::exact(field("role")?, &["admin", "manager", "staff"]),
        )
        .sort_option(sort("name")?, SortSpec::ascending(field("name")?))
        .sort_option(sort("recent")?, SortSpec::descending(field("created_at")?))
        .sort_option(sort("status")?, SortSpec::ascending(field("status")?))
        .default_sort(sort("recent")?)
        .build()
}

fn units() -> Result<ScreenConfig, ConfigError> {
    ScreenConfig::builder(screen("units")?)
        .search_field(field("name")?)
        .search_field(field("abbreviation")?)
        .filter(
            filter("type")?,
            FilterSpec::exact(field("type")?, &["weight", "volume", "length", "count"]),
        )
        .sort_option(sort("name")?, SortSpec::ascending(field("name")?))
        .sort_option(sort("recent")?, SortSpec::descending(field("id")?))
        .default_sort(sort("name")?)
        .build()
}

// Preset names are literals; these only fail if a literal is empty.

fn invalid_preset(reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidScreen {
        screen: "<preset>".to_string(),
        reason: reason.to_string(),
    }
}

fn screen(name: &str) -> Result<ScreenName, ConfigError> {
    ScreenName::new(name).map_err(invalid_preset)
}

fn field(name: &str) -> Result<FieldName, ConfigError> {
    FieldName::new(name).map_err(invalid_preset)
}

fn filter(name: &str) -> Result<FilterName, ConfigError> {
    FilterName::new(name).map_err(invalid_preset)
}

fn sort(key: &str) -> Result<SortKey, ConfigError> {
    SortKey::new(key).map_err(invalid_preset)
}
