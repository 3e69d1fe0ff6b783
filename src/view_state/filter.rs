//! Record predicates: free-text search AND categorical filters.
//!
//! A record is kept when the text predicate holds and every active categorical
//! predicate holds. "all" selections and the empty query are identities and
//! contribute no predicate at all.

use crate::config::{MatchMode, ScreenConfig};
use crate::model::{FieldName, FieldValue, Record};
use crate::state::FilterState;
use tracing::warn;

/// One active categorical predicate, resolved against the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CategoryPredicate {
    field: FieldName,
    matcher: MatchMode,
    /// Selected value; lowercased for [`MatchMode::Substring`].
    value: String,
}

impl CategoryPredicate {
    fn matches_text(&self, text: &str) -> bool {
        match self.matcher {
            MatchMode::Exact => text == self.value,
            MatchMode::Substring => text.to_lowercase().contains(&self.value),
        }
    }

    fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        match record.field(self.field.as_str()) {
            None => false,
            Some(FieldValue::List(items)) => items.iter().any(|item| self.matches_text(item)),
            Some(value) => self.matches_text(&value.to_text()),
        }
    }
}

/// Compiled predicate set for one `(screen, query, filters)` combination.
#[derive(Debug, Clone)]
pub struct PredicateFilterSet<'a> {
    searchable_fields: &'a [FieldName],
    separator: &'a str,
    /// Lowercased settled query; `None` when empty.
    needle: Option<String>,
    categories: Vec<CategoryPredicate>,
}

impl<'a> PredicateFilterSet<'a> {
    /// Compile predicates from the settled query and filter selections.
    ///
    /// Selections for filters the screen does not declare are skipped.
    pub fn new(screen: &'a ScreenConfig, query: &str, filters: &FilterState) -> Self {
        let needle = (!query.is_empty()).then(|| query.to_lowercase());

        let categories = filters
            .active()
            .filter_map(|(name, value)| {
                let Some(spec) = screen.filters().get(name) else {
                    warn!(filter = %name, screen = %screen.name(), "selection for undeclared filter ignored");
                    return None;
                };
                let value = match spec.matcher {
                    MatchMode::Exact => value.to_string(),
                    MatchMode::Substring => value.to_lowercase(),
                };
                Some(CategoryPredicate {
                    field: spec.field.clone(),
                    matcher: spec.matcher,
                    value,
                })
            })
            .collect();

        Self {
            searchable_fields: screen.searchable_fields(),
            separator: screen.search_separator(),
            needle,
            categories,
        }
    }

    /// True when no predicate is active: every record matches.
    pub fn is_identity(&self) -> bool {
        self.needle.is_none() && self.categories.is_empty()
    }

    /// Searchable fields joined by the separator. Absent fields contribute
    /// empty text.
    pub fn search_text<R: Record + ?Sized>(&self, record: &R) -> String {
        let mut text = String::new();
        for (i, field) in self.searchable_fields.iter().enumerate() {
            if i > 0 {
                text.push_str(self.separator);
            }
            if let Some(value) = record.field(field.as_str()) {
                text.push_str(&value.to_text());
            }
        }
        text
    }

    /// Text predicate alone.
    pub fn matches_query<R: Record + ?Sized>(&self, record: &R) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => self.search_text(record).to_lowercase().contains(needle.as_str()),
        }
    }

    /// Text predicate AND every categorical predicate.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.categories.iter().all(|p| p.matches(record)) && self.matches_query(record)
    }

    /// Indices of matching records, in collection order.
    pub fn apply<R: Record>(&self, records: &[R]) -> Vec<usize> {
        if self.is_identity() {
            return (0..records.len()).collect();
        }
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(*record))
            .map(|(i, _)| i)
            .collect()
    }
}
