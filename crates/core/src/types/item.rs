//! Opaque result records.
//!
//! The list controller never interprets records beyond their `id`. Every other
//! field is carried through untouched so that views can render whatever the
//! backend sends.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record identifier as sent by the backend (numeric or string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Numeric(u64),
    Text(String),
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// A single record from a list page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    id: ItemId,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl ResultItem {
    /// Build an item from an id and its remaining fields.
    #[must_use]
    pub const fn new(id: ItemId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Decode an item from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object or has no usable `id`.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[must_use]
    pub const fn id(&self) -> &ItemId {
        &self.id
    }

    /// Look up a field other than `id`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields other than `id`.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Re-assemble the record as JSON, `id` included.
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut object = self.fields;
        let id = match self.id {
            ItemId::Numeric(id) => Value::from(id),
            ItemId::Text(id) => Value::from(id),
        };
        object.insert("id".to_string(), id);
        Value::Object(object)
    }
}
