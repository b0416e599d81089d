//! List request URL builder.
//!
//! Pure function of the list parameters: no I/O, no state. Clauses are
//! appended in a fixed order and only when their guard holds, so an unset
//! filter never shows up in the query string at all.

use storekeep_core::{FilterSet, Page, PriceBound, Resource, SearchValue};
use thiserror::Error;
use url::Url;

/// Errors building a request URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("base URL {0} cannot carry a path")]
    CannotBeABase(String),
}

/// Build the GET URL for one page of a list.
///
/// Resource path segments are appended to whatever path the base URL already
/// has. Any query or fragment on the base URL is discarded. Values are
/// percent-encoded as query components.
///
/// # Errors
///
/// Returns `QueryError::CannotBeABase` if the base URL cannot carry a path.
pub fn build(
    base_url: &Url,
    resource: Resource,
    page: Page,
    page_size: u32,
    search: &SearchValue,
    filters: &FilterSet,
) -> Result<Url, QueryError> {
    let mut url = base_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| QueryError::CannotBeABase(base_url.to_string()))?
        .pop_if_empty()
        .extend(resource.path_segments());

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("per_page", &page_size.to_string());
        query.append_pair("page", &page.to_string());

        if let Some(search) = search.as_query() {
            query.append_pair("search", search);
        }
        if let Some(order_by) = filters.sort_order_by {
            query.append_pair("orderby", order_by.as_str());
        }
        if let Some(order) = filters.sort_order {
            query.append_pair("order", order.as_str());
        }
        if let Some(status) = filters.status {
            query.append_pair("status", status.as_str());
        }
        if let Some(stock_status) = filters.stock_status {
            query.append_pair("stock_status", stock_status.as_str());
        }
        if let Some(min_price) = filters.min_price.as_ref().and_then(PriceBound::numeric) {
            query.append_pair("min_price", min_price);
        }
        if let Some(max_price) = filters.max_price.as_ref().and_then(PriceBound::numeric) {
            query.append_pair("max_price", max_price);
        }
        if let Some(category) = filters.category_filter() {
            query.append_pair("category", category);
        }
        if filters.featured {
            query.append_pair("featured", "true");
        }
        if filters.on_sale {
            query.append_pair("on_sale", "true");
        }
    }

    Ok(url)
}
