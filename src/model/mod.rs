//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod record;

// Re-export for convenience
pub use error::{AppError, InputError, RecordError, StateError};
pub use identifiers::{
    FieldName, FilterName, InvalidFieldName, InvalidFilterName, InvalidScreenName,
    InvalidSortKey, ScreenName, SortKey,
};
pub use record::{DynamicRecord, FieldValue, OwnedValue, Record, RecordSet};
