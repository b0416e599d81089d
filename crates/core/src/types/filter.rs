//! Structured list filters.
//!
//! A [`FilterSet`] is distinct from free-text search: every field is optional
//! and an unset field means "do not filter on this", which is not the same as
//! filtering on a default value. Query builders must omit unset fields.

use serde::{Deserialize, Serialize};

use super::price::PriceBound;
use super::status::{ItemStatus, StockStatus};

/// Category id meaning "all categories".
pub const NO_CATEGORY: &str = "0";

wire_enum! {
    /// Field the backend sorts results by.
    SortOrderBy: "sort field" {
        Date => "date",
        Id => "id",
        Title => "title",
        Price => "price",
        Popularity => "popularity",
        Rating => "rating",
        Modified => "modified",
        Slug => "slug",
    }
}

wire_enum! {
    /// Sort direction.
    SortOrder: "sort order" {
        Asc => "asc",
        Desc => "desc",
    }
}

/// Named filter criteria applied to a list query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    pub sort_order_by: Option<SortOrderBy>,
    pub sort_order: Option<SortOrder>,
    pub status: Option<ItemStatus>,
    /// Category id; [`NO_CATEGORY`] disables the filter.
    pub category: Option<String>,
    pub stock_status: Option<StockStatus>,
    pub min_price: Option<PriceBound>,
    pub max_price: Option<PriceBound>,
    pub featured: bool,
    pub on_sale: bool,
}

impl FilterSet {
    /// An empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn sorted_by(mut self, field: SortOrderBy, order: SortOrder) -> Self {
        self.sort_order_by = Some(field);
        self.sort_order = Some(order);
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn with_stock_status(mut self, stock_status: StockStatus) -> Self {
        self.stock_status = Some(stock_status);
        self
    }

    #[must_use]
    pub fn with_min_price(mut self, min_price: impl Into<PriceBound>) -> Self {
        self.min_price = Some(min_price.into());
        self
    }

    #[must_use]
    pub fn with_max_price(mut self, max_price: impl Into<PriceBound>) -> Self {
        self.max_price = Some(max_price.into());
        self
    }

    #[must_use]
    pub const fn featured_only(mut self) -> Self {
        self.featured = true;
        self
    }

    #[must_use]
    pub const fn on_sale_only(mut self) -> Self {
        self.on_sale = true;
        self
    }

    /// Category id to filter on, skipping the "all categories" sentinel.
    #[must_use]
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| !category.is_empty() && *category != NO_CATEGORY)
    }

    /// Whether no field narrows or orders the list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sort_order_by.is_none()
            && self.sort_order.is_none()
            && self.status.is_none()
            && self.category_filter().is_none()
            && self.stock_status.is_none()
            && self.min_price.as_ref().and_then(PriceBound::numeric).is_none()
            && self.max_price.as_ref().and_then(PriceBound::numeric).is_none()
            && !self.featured
            && !self.on_sale
    }
}
