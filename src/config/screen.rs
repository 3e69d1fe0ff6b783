//! Per-screen list configuration.
//!
//! A screen declares which fields the search box looks at, which categorical
//! filters it offers, which comparators it registers and its paging and
//! debounce defaults. [`ScreenSection`] is the raw TOML shape (everything
//! optional); [`ScreenConfig`] is the validated form the engine consumes.

use crate::config::ConfigError;
use crate::model::{FieldName, FilterName, ScreenName, SortKey};
use crate::state::PageSize;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// How a categorical filter compares its selected value with the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Field text equals the selected value.
    #[default]
    Exact,
    /// Field text contains the selected value, ignoring case
    /// (e.g. plan "Premium Annual" matches "premium").
    Substring,
}

/// Direction of a registered comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// A before Z, oldest/smallest first.
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    /// Most recent/largest first.
    #[serde(alias = "desc")]
    Descending,
}

/// One categorical filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Record field the filter reads.
    pub field: FieldName,
    /// Values offered besides "all". Empty means any value is accepted.
    pub allowed_values: Vec<String>,
    /// Comparison used for non-"all" selections.
    pub matcher: MatchMode,
}

impl FilterSpec {
    /// Exact-match filter.
    pub fn exact(field: FieldName, allowed_values: &[&str]) -> Self {
        Self {
            field,
            allowed_values: allowed_values.iter().map(|v| v.to_string()).collect(),
            matcher: MatchMode::Exact,
        }
    }

    /// Substring filter.
    pub fn substring(field: FieldName, allowed_values: &[&str]) -> Self {
        Self {
            matcher: MatchMode::Substring,
            ..Self::exact(field, allowed_values)
        }
    }

    /// Whether `value` may be selected.
    pub fn allows(&self, value: &str) -> bool {
        self.allowed_values.is_empty() || self.allowed_values.iter().any(|v| v == value)
    }
}

/// One registered comparator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Record field compared.
    pub field: FieldName,
    /// Direction.
    pub order: SortOrder,
}

impl SortSpec {
    /// Ascending comparator on `field`.
    pub fn ascending(field: FieldName) -> Self {
        Self {
            field,
            order: SortOrder::Ascending,
        }
    }

    /// Descending comparator on `field`.
    pub fn descending(field: FieldName) -> Self {
        Self {
            field,
            order: SortOrder::Descending,
        }
    }
}

/// Validated configuration of one list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    name: ScreenName,
    searchable_fields: Vec<FieldName>,
    search_separator: String,
    filters: BTreeMap<FilterName, FilterSpec>,
    sort_options: BTreeMap<SortKey, SortSpec>,
    default_sort: Option<SortKey>,
    default_page_size: PageSize,
    debounce: Duration,
}

impl ScreenConfig {
    /// Start a screen with defaults: no filters, no comparators, page size 10,
    /// 300 ms debounce, `" "` search separator.
    pub fn builder(name: ScreenName) -> ScreenConfigBuilder {
        ScreenConfigBuilder {
            config: ScreenConfig {
                name,
                searchable_fields: Vec::new(),
                search_separator: " ".to_string(),
                filters: BTreeMap::new(),
                sort_options: BTreeMap::new(),
                default_sort: None,
                default_page_size: PageSize::default(),
                debounce: crate::state::DEFAULT_DEBOUNCE,
            },
        }
    }

    /// Define a screen entirely from a config file section.
    ///
    /// # Errors
    ///
    /// Same as [`ScreenConfig::with_section`], plus the requirement that the
    /// section names at least one searchable field.
    pub fn from_section(name: ScreenName, section: &ScreenSection) -> Result<Self, ConfigError> {
        ScreenConfig::builder(name).config.with_section(section)
    }

    /// Screen name.
    pub fn name(&self) -> &ScreenName {
        &self.name
    }

    /// Fields concatenated for the text search, in order.
    pub fn searchable_fields(&self) -> &[FieldName] {
        &self.searchable_fields
    }

    /// Separator placed between searchable fields.
    pub fn search_separator(&self) -> &str {
        &self.search_separator
    }

    /// Declared filters.
    pub fn filters(&self) -> &BTreeMap<FilterName, FilterSpec> {
        &self.filters
    }

    /// Look up a filter by name.
    pub fn filter(&self, name: &str) -> Option<(&FilterName, &FilterSpec)> {
        self.filters.iter().find(|(n, _)| n.as_str() == name)
    }

    /// Registered comparators.
    pub fn sort_options(&self) -> &BTreeMap<SortKey, SortSpec> {
        &self.sort_options
    }

    /// Look up a comparator by key.
    pub fn sort_option(&self, key: &str) -> Option<(&SortKey, &SortSpec)> {
        self.sort_options.iter().find(|(k, _)| k.as_str() == key)
    }

    /// Comparator selected when the screen opens. Always a registered key.
    pub fn default_sort(&self) -> Option<&SortKey> {
        self.default_sort.as_ref()
    }

    /// Page size selected when the screen opens.
    pub fn default_page_size(&self) -> PageSize {
        self.default_page_size
    }

    /// Search settle interval.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// One-line summary for `--list-screens`.
    pub fn describe(&self) -> String {
        fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
            let parts: Vec<String> = items.map(|i| i.to_string()).collect();
            if parts.is_empty() {
                "-".to_string()
            } else {
                parts.join(", ")
            }
        }

        let sorts = self.sort_options.keys().map(|key| {
            if Some(key) == self.default_sort.as_ref() {
                format!("{}*", key)
            } else {
                key.to_string()
            }
        });
        format!(
            "{}  search: {}  filters: {}  sort: {}  page size: {}",
            self.name,
            join(self.searchable_fields.iter()),
            join(self.filters.keys()),
            join(sorts),
            self.default_page_size,
        )
    }

    /// Apply a TOML section on top of this screen.
    ///
    /// Scalar settings replace, `filters` and `sort_options` entries are added
    /// or replaced by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the section names empty fields, a
    /// non-positive page size, or a default sort key that is not registered.
    pub fn with_section(&self, section: &ScreenSection) -> Result<Self, ConfigError> {
        let screen = self.name.to_string();
        let invalid = |reason: String| ConfigError::InvalidScreen {
            screen: screen.clone(),
            reason,
        };

        let mut builder = ScreenConfigBuilder {
            config: self.clone(),
        };

        if let Some(fields) = &section.searchable_fields {
            let fields = fields
                .iter()
                .map(|f| FieldName::new(f.as_str()))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| invalid(format!("searchable_fields: {}", e)))?;
            builder.config.searchable_fields = fields;
        }
        if let Some(separator) = &section.search_separator {
            builder = builder.search_separator(separator.as_str());
        }
        if let Some(filters) = &section.filters {
            for (name, filter) in filters {
                let filter_name = FilterName::new(name.as_str())
                    .map_err(|e| invalid(format!("filters: {}", e)))?;
                let field = FieldName::new(filter.field.as_deref().unwrap_or(name.as_str()))
                    .map_err(|e| invalid(format!("filters.{}.field: {}", name, e)))?;
                builder = builder.filter(
                    filter_name,
                    FilterSpec {
                        field,
                        allowed_values: filter.allowed_values.clone(),
                        matcher: filter.matcher,
                    },
                );
            }
        }
        if let Some(options) = &section.sort_options {
            for (key, option) in options {
                let sort_key = SortKey::new(key.as_str())
                    .map_err(|e| invalid(format!("sort_options: {}", e)))?;
                let field = FieldName::new(option.field.as_str())
                    .map_err(|e| invalid(format!("sort_options.{}.field: {}", key, e)))?;
                builder = builder.sort_option(
                    sort_key,
                    SortSpec {
                        field,
                        order: option.order,
                    },
                );
            }
        }
        if let Some(key) = &section.default_sort {
            let key = SortKey::new(key.as_str())
                .map_err(|e| invalid(format!("default_sort: {}", e)))?;
            builder.config.default_sort = Some(key);
        }
        if let Some(size) = section.default_page_size {
            builder = builder.page_size(validate_page_size(&screen, size)?);
        }
        if let Some(ms) = section.debounce_ms {
            builder = builder.debounce(Duration::from_millis(ms));
        }

        builder.build()
    }
}

/// Check a page size read from configuration.
///
/// # Errors
///
/// [`ConfigError::InvalidPageSize`] for zero or negative values.
pub fn validate_page_size(screen: &str, size: i64) -> Result<PageSize, ConfigError> {
    usize::try_from(size)
        .ok()
        .and_then(|n| PageSize::new(n).ok())
        .ok_or_else(|| ConfigError::InvalidPageSize {
            screen: screen.to_string(),
            value: size,
        })
}

/// Builder for [`ScreenConfig`]. Validation happens in [`ScreenConfigBuilder::build`].
#[derive(Debug, Clone)]
pub struct ScreenConfigBuilder {
    config: ScreenConfig,
}

impl ScreenConfigBuilder {
    /// Append a searchable field.
    pub fn search_field(mut self, field: FieldName) -> Self {
        self.config.searchable_fields.push(field);
        self
    }

    /// Separator placed between searchable fields.
    pub fn search_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.search_separator = separator.into();
        self
    }

    /// Declare (or replace) a filter.
    pub fn filter(mut self, name: FilterName, spec: FilterSpec) -> Self {
        self.config.filters.insert(name, spec);
        self
    }

    /// Register (or replace) a comparator.
    pub fn sort_option(mut self, key: SortKey, spec: SortSpec) -> Self {
        self.config.sort_options.insert(key, spec);
        self
    }

    /// Comparator selected when the screen opens.
    pub fn default_sort(mut self, key: SortKey) -> Self {
        self.config.default_sort = Some(key);
        self
    }

    /// Page size selected when the screen opens.
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.config.default_page_size = size;
        self
    }

    /// Search settle interval.
    pub fn debounce(mut self, delay: Duration) -> Self {
        self.config.debounce = delay;
        self
    }

    /// Validate and finish.
    ///
    /// # Errors
    ///
    /// - no searchable fields
    /// - `default_sort` not among the registered comparators
    pub fn build(mut self) -> Result<ScreenConfig, ConfigError> {
        let screen = self.config.name.to_string();
        if self.config.searchable_fields.is_empty() {
            return Err(ConfigError::InvalidScreen {
                screen,
                reason: "at least one searchable field is required".to_string(),
            });
        }
        match &self.config.default_sort {
            Some(key) if !self.config.sort_options.contains_key(key) => {
                return Err(ConfigError::InvalidScreen {
                    screen,
                    reason: format!("default_sort {:?} is not a registered sort option", key.as_str()),
                });
            }
            Some(_) => {}
            None => {
                // First registered comparator, if any.
                self.config.default_sort = self.config.sort_options.keys().next().cloned();
            }
        }
        Ok(self.config)
    }
}

// ===== TOML shape =====

/// `[screens.<name>]` section as written in the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScreenSection {
    /// Fields concatenated for the text search.
    #[serde(default)]
    pub searchable_fields: Option<Vec<String>>,

    /// Separator between searchable fields.
    #[serde(default)]
    pub search_separator: Option<String>,

    /// Filters by name.
    #[serde(default)]
    pub filters: Option<BTreeMap<String, FilterSection>>,

    /// Comparators by sort key.
    #[serde(default)]
    pub sort_options: Option<BTreeMap<String, SortSection>>,

    /// Comparator selected when the screen opens.
    #[serde(default)]
    pub default_sort: Option<String>,

    /// Page size selected when the screen opens. Must be positive.
    #[serde(default)]
    pub default_page_size: Option<i64>,

    /// Search settle interval in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,
}

/// `[screens.<name>.filters.<filter>]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Record field; defaults to the filter's own name.
    #[serde(default)]
    pub field: Option<String>,

    /// Values offered besides "all".
    #[serde(default)]
    pub allowed_values: Vec<String>,

    /// `exact` (default) or `substring`.
    #[serde(default)]
    pub matcher: MatchMode,
}

/// `[screens.<name>.sort_options.<key>]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SortSection {
    /// Record field compared.
    pub field: String,

    /// `ascending` (default) or `descending`.
    #[serde(default)]
    pub order: SortOrder,
}
