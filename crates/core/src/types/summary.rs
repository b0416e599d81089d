//! Typed, read-only projections of result items for rendering list rows.
//!
//! Projections are lenient: a missing or oddly typed field becomes `None`
//! instead of failing, since the underlying records stay opaque.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::item::{ItemId, ResultItem};
use super::status::{ItemStatus, StockStatus};

/// Timestamp format used by the backend (site-local, no offset).
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub id: ItemId,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Decimal>,
    pub stock_status: Option<StockStatus>,
    pub stock_quantity: Option<i64>,
    pub status: Option<ItemStatus>,
    /// Source URL of the first product image.
    pub image_src: Option<String>,
}

/// Order row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub id: ItemId,
    pub status: Option<String>,
    pub total: Option<Decimal>,
    pub currency: Option<String>,
    pub date_created: Option<NaiveDateTime>,
}

/// Product review row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub id: ItemId,
    pub product_name: Option<String>,
    pub reviewer: Option<String>,
    pub rating: Option<u8>,
    pub date_created: Option<NaiveDateTime>,
}

impl From<&ResultItem> for ProductSummary {
    fn from(item: &ResultItem) -> Self {
        let image_src = item
            .get("images")
            .and_then(Value::as_array)
            .and_then(|images| images.first())
            .and_then(|image| image.get("src"))
            .and_then(Value::as_str)
            .map(String::from);

        Self {
            id: item.id().clone(),
            name: string_field(item, "name"),
            sku: string_field(item, "sku").filter(|sku| !sku.is_empty()),
            price: decimal_field(item, "price"),
            stock_status: string_field(item, "stock_status").and_then(|s| s.parse().ok()),
            stock_quantity: item.get("stock_quantity").and_then(Value::as_i64),
            status: string_field(item, "status").and_then(|s| s.parse().ok()),
            image_src,
        }
    }
}

impl From<&ResultItem> for OrderSummary {
    fn from(item: &ResultItem) -> Self {
        Self {
            id: item.id().clone(),
            status: string_field(item, "status"),
            total: decimal_field(item, "total"),
            currency: string_field(item, "currency"),
            date_created: date_field(item, "date_created"),
        }
    }
}

impl From<&ResultItem> for ReviewSummary {
    fn from(item: &ResultItem) -> Self {
        Self {
            id: item.id().clone(),
            product_name: string_field(item, "product_name"),
            reviewer: string_field(item, "reviewer"),
            rating: item
                .get("rating")
                .and_then(Value::as_u64)
                .and_then(|rating| u8::try_from(rating).ok()),
            date_created: date_field(item, "date_created"),
        }
    }
}

fn string_field(item: &ResultItem, key: &str) -> Option<String> {
    item.get(key).and_then(Value::as_str).map(String::from)
}

/// Prices come back as strings ("19.99") but sometimes as bare numbers.
fn decimal_field(item: &ResultItem, key: &str) -> Option<Decimal> {
    match item.get(key)? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}

fn date_field(item: &ResultItem, key: &str) -> Option<NaiveDateTime> {
    item.get(key)
        .and_then(Value::as_str)
        .and_then(|s| NaiveDateTime::parse_from_str(s, DATE_FORMAT).ok())
}
