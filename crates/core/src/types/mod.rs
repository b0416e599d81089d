//! Core types for Storekeep.
//!
//! This module provides type-safe wrappers for the list-query vocabulary and
//! the records the backend returns.

/// Macro to define an enum whose variants map one-to-one onto wire strings.
///
/// Creates a `Copy` enum with:
/// - `Serialize`/`Deserialize` using the wire strings
/// - `as_str()` returning the wire string
/// - `Display` and `FromStr` implementations that round-trip through it
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident : $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The value sent to the backend.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::ParseValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err($crate::types::ParseValueError::new($kind, s)),
                }
            }
        }
    };
}

pub mod filter;
pub mod item;
pub mod price;
pub mod resource;
pub mod search;
pub mod status;
pub mod summary;

pub use filter::{FilterSet, NO_CATEGORY, SortOrder, SortOrderBy};
pub use item::{ItemId, ResultItem};
pub use price::PriceBound;
pub use resource::Resource;
pub use search::{Page, SearchValue};
pub use status::{ItemStatus, StockStatus};
pub use summary::{OrderSummary, ProductSummary, ReviewSummary};

/// Error returned when a wire string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseValueError {
    kind: &'static str,
    value: String,
}

impl ParseValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
