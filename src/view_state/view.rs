//! The computed list view.

use crate::model::{FieldName, Record};
use crate::view_state::page_window::{render_strip, PageMarker};
use serde::Serialize;

/// One page of a filtered, sorted collection plus the pagination strip.
///
/// Recomputed from `(records, settled query, filters, sort, page)`, never
/// mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View<R> {
    /// Records on the current page, in sort order.
    pub items: Vec<R>,
    /// Records matching every active predicate, across all pages.
    pub total_count: usize,
    /// At least 1.
    pub page_count: usize,
    /// Current 1-based page as held in the page state.
    pub page_number: usize,
    /// Records per page.
    pub page_size: usize,
    /// Page strip around the current page.
    pub page_numbers: Vec<PageMarker>,
    /// Whether "previous"/"first" controls are enabled.
    pub has_previous: bool,
    /// Whether "next"/"last" controls are enabled.
    pub has_next: bool,
}

impl<R> View<R> {
    /// True when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Page strip as text, e.g. `1 … 4 [5] 6 … 10`.
    pub fn page_strip(&self) -> String {
        render_strip(&self.page_numbers, self.page_number)
    }

    /// One-line summary, e.g. `Showing 11-20 of 23`.
    pub fn summary(&self) -> String {
        if self.items.is_empty() {
            return format!("Showing 0 of {}", self.total_count);
        }
        let first = (self.page_number - 1) * self.page_size + 1;
        let last = first + self.items.len() - 1;
        format!("Showing {}-{} of {}", first, last, self.total_count)
    }
}

impl<R: Record> View<R> {
    /// Plain-text rendering: one row per record, then the summary and the
    /// page strip.
    ///
    /// Each row joins `columns` with ` | `; missing fields render as `-`.
    pub fn render_text(&self, columns: &[FieldName]) -> String {
        let mut out = String::new();
        for record in &self.items {
            let cells: Vec<String> = columns
                .iter()
                .map(|column| {
                    record
                        .field(column.as_str())
                        .map(|v| v.to_text().into_owned())
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }
        if self.is_empty() {
            out.push_str("No matching records\n");
        }
        out.push_str(&self.summary());
        out.push('\n');
        out.push_str(&self.page_strip());
        out.push('\n');
        out
    }
}
