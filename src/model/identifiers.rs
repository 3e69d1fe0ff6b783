//! Identifier newtypes with smart constructors.
//!
//! All identifiers validate non-empty (after trimming) strings at construction
//! time. Raw constructors are never exported - use smart constructors only.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $err:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Smart constructor: rejects empty or whitespace-only names.
            pub fn new(raw: impl Into<String>) -> Result<Self, $err> {
                let s = raw.into();
                if s.trim().is_empty() {
                    Err($err::Empty)
                } else {
                    Ok(Self(s))
                }
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $err;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        #[doc = concat!("Rejected ", $label, ".")]
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $err {
            #[doc = concat!($label, " was empty.")]
            #[error("{} cannot be empty", $label)]
            Empty,
        }
    };
}

identifier!(
    /// Name of a record field (e.g. "name", "status", "business.name").
    FieldName,
    InvalidFieldName,
    "Field name"
);

identifier!(
    /// Name of a categorical filter declared by a screen (e.g. "status", "plan").
    FilterName,
    InvalidFilterName,
    "Filter name"
);

identifier!(
    /// Key of a registered sort comparator (e.g. "name", "recent").
    SortKey,
    InvalidSortKey,
    "Sort key"
);

identifier!(
    /// Name of a list screen (e.g. "businesses", "units").
    ScreenName,
    InvalidScreenName,
    "Screen name"
);
