//! Price bounds entered as free text.
//!
//! Price filters arrive as whatever the user typed. They are kept verbatim and
//! only checked for being numeric when a query is built; non-numeric text is
//! dropped from the query rather than rejected.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A minimum or maximum price bound as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceBound(String);

impl PriceBound {
    /// Wrap raw user input.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The text exactly as entered.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Parsed decimal value, or `None` when the text is not a number.
    #[must_use]
    pub fn value(&self) -> Option<Decimal> {
        Decimal::from_str(self.0.trim()).ok()
    }

    /// The trimmed text when it is numeric. This is what goes on the wire.
    #[must_use]
    pub fn numeric(&self) -> Option<&str> {
        self.value().map(|_| self.0.trim())
    }
}

impl From<&str> for PriceBound {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PriceBound {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<Decimal> for PriceBound {
    fn from(value: Decimal) -> Self {
        Self(value.to_string())
    }
}
