//! Active filter selections.
//!
//! A filter absent from the map is the same as `"all"`: the identity value
//! that never excludes a record.

use crate::model::FilterName;
use std::collections::BTreeMap;
use std::fmt;

/// The identity filter value.
pub const ALL: &str = "all";

static ALL_SELECTION: FilterSelection = FilterSelection::All;

/// Selected value of one filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FilterSelection {
    /// Matches every record.
    #[default]
    All,
    /// Matches records whose field matches this value.
    Value(String),
}

impl FilterSelection {
    /// Parse a selection as it arrives from a dropdown or the command line.
    ///
    /// `"all"` (any case) and the empty string select [`FilterSelection::All`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            FilterSelection::All
        } else {
            FilterSelection::Value(trimmed.to_string())
        }
    }

    /// True for the identity selection.
    pub fn is_all(&self) -> bool {
        matches!(self, FilterSelection::All)
    }

    /// Selection as text (`"all"` for the identity).
    pub fn as_str(&self) -> &str {
        match self {
            FilterSelection::All => ALL,
            FilterSelection::Value(v) => v,
        }
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter name → selection. Only non-identity selections are stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterState {
    selections: BTreeMap<FilterName, FilterSelection>,
}

impl FilterState {
    /// All filters set to "all".
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selection for `name` ([`FilterSelection::All`] if never set).
    pub fn get(&self, name: &FilterName) -> &FilterSelection {
        self.selections.get(name).unwrap_or(&ALL_SELECTION)
    }

    /// Set a filter. Returns true if the selection changed.
    pub fn set(&mut self, name: FilterName, selection: FilterSelection) -> bool {
        match selection {
            FilterSelection::All => self.selections.remove(&name).is_some(),
            value => {
                if self.selections.get(&name) == Some(&value) {
                    return false;
                }
                self.selections.insert(name, value);
                true
            }
        }
    }

    /// Reset every filter to "all". Returns true if anything changed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.selections.is_empty();
        self.selections.clear();
        changed
    }

    /// Non-identity selections, in name order.
    pub fn active(&self) -> impl Iterator<Item = (&FilterName, &str)> {
        self.selections.iter().map(|(name, sel)| (name, sel.as_str()))
    }

    /// True when every filter is "all".
    pub fn is_identity(&self) -> bool {
        self.selections.is_empty()
    }
}
