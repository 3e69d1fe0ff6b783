//! Registered comparators.

use crate::config::{SortOrder, SortSpec};
use crate::model::{FieldName, FieldValue, Record};
use std::cmp::Ordering;

/// Comparator selected by a sort key.
///
/// Numbers compare numerically, timestamps chronologically, booleans false
/// before true and everything else as case-insensitive text with the exact
/// text as tie-break. Records missing the field sort last in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortComparator {
    field: FieldName,
    order: SortOrder,
}

impl SortComparator {
    /// Comparator on `field` in `order`.
    pub fn new(field: FieldName, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Comparator described by a screen's sort option.
    pub fn from_spec(spec: &SortSpec) -> Self {
        Self::new(spec.field.clone(), spec.order)
    }

    /// Compare two records.
    pub fn compare<R: Record + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        match (a.field(self.field.as_str()), b.field(self.field.as_str())) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = compare_values(&x, &y);
                match self.order {
                    SortOrder::Ascending => ord,
                    SortOrder::Descending => ord.reverse(),
                }
            }
        }
    }

    /// Stable sort of `indices` (positions in `records`).
    pub fn sort_indices<R: Record>(&self, records: &[R], indices: &mut [usize]) {
        indices.sort_by(|&a, &b| self.compare(&records[a], &records[b]));
    }
}

fn compare_values(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Integer(x), FieldValue::Integer(y)) => x.cmp(y),
        (FieldValue::Float(x), FieldValue::Float(y)) => x.total_cmp(y),
        (FieldValue::Integer(x), FieldValue::Float(y)) => compare_int_float(*x, *y),
        (FieldValue::Float(x), FieldValue::Integer(y)) => compare_int_float(*y, *x).reverse(),
        (FieldValue::Timestamp { at: x, .. }, FieldValue::Timestamp { at: y, .. }) => x.cmp(y),
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        _ => compare_text(&a.to_text(), &b.to_text()),
    }
}

/// Exact `i64` vs `f64` ordering; casting the integer would round above 2^53.
fn compare_int_float(int: i64, float: f64) -> Ordering {
    if float.is_nan() {
        // total_cmp puts positive NaN after every number, negative NaN before
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    // 2^63 as f64; every float at or beyond this bound is outside i64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }
    let whole = float.floor();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal if float > whole => Ordering::Less,
        other => other,
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
