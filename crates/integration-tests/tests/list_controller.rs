//! Integration tests for the list controller over HTTP.
//!
//! These tests use httpmock to simulate the Dokan REST endpoints and drive
//! a controller with the real reqwest transport.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::{Value, json};
use storekeep_client::{ListError, ListOptions, ListStatus, SearchBar, StaticCredentialSource};
use storekeep_core::{
    FilterSet, ItemId, ProductSummary, Resource, SortOrder, SortOrderBy, StockStatus,
};
use storekeep_integration_tests::{TEST_AUTHORIZATION, credentials_for, http_controller};

const PRODUCTS_PATH: &str = "/wp-json/dokan/v1/products";

fn products(ids: std::ops::RangeInclusive<u64>) -> Value {
    Value::Array(
        ids.map(|id| {
            json!({
                "id": id,
                "name": format!("Product {id}"),
                "price": "12.50",
                "stock_status": "instock",
                "images": [{"src": format!("https://cdn.test/{id}.jpg")}]
            })
        })
        .collect(),
    )
}

fn ids(data: &[storekeep_core::ResultItem]) -> Vec<u64> {
    data.iter()
        .map(|item| match item.id() {
            ItemId::Numeric(id) => *id,
            ItemId::Text(id) => id.parse().unwrap(),
        })
        .collect()
}

// =============================================================================
// Request Shape Tests
// =============================================================================

#[tokio::test]
async fn test_mount_sends_authenticated_first_page_request() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(PRODUCTS_PATH)
            .query_param("per_page", "20")
            .query_param("page", "1")
            .header("authorization", TEST_AUTHORIZATION)
            .header("accept", "application/json");
        then.status(200).json_body(products(1..=3));
    });

    let controller = http_controller(Resource::Products, ListOptions::default()).unwrap();
    controller.mount(&credentials_for(&server.base_url()).unwrap()).await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.status, ListStatus::Idle);
    assert_eq!(ids(&snapshot.data), vec![1, 2, 3]);
    assert!(snapshot.has_more_to_load());

    let summary = ProductSummary::from(&snapshot.data[0]);
    assert_eq!(summary.name.as_deref(), Some("Product 1"));
    assert_eq!(summary.stock_status, Some(StockStatus::InStock));
    assert_eq!(summary.image_src.as_deref(), Some("https://cdn.test/1.jpg"));

    mock.assert();
}

#[tokio::test]
async fn test_search_and_filters_reach_the_backend() {
    let server = MockServer::start();

    let first = server.mock(|when, then| {
        when.method(GET).path(PRODUCTS_PATH).query_param_missing("search");
        then.status(200).json_body(products(1..=2));
    });
    let filtered = server.mock(|when, then| {
        when.method(GET)
            .path(PRODUCTS_PATH)
            .query_param("page", "1")
            .query_param("search", "blue mug")
            .query_param("orderby", "price")
            .query_param("order", "asc")
            .query_param("min_price", "5")
            .query_param("category", "12")
            .query_param("featured", "true")
            .query_param_missing("max_price")
            .query_param_missing("on_sale");
        then.status(200).json_body(products(40..=41));
    });

    let controller = http_controller(Resource::Products, ListOptions::default())
        .unwrap()
        .with_filters(
            FilterSet::new()
                .sorted_by(SortOrderBy::Price, SortOrder::Asc)
                .with_min_price("5")
                .with_max_price("abc")
                .with_category("12")
                .featured_only(),
        );
    controller.mount(&credentials_for(&server.base_url()).unwrap()).await;
    first.assert();
    assert_eq!(filtered.hits(), 0);

    controller.search("blue mug").await;
    assert_eq!(ids(&controller.snapshot().data), vec![40, 41]);
    filtered.assert();
}

#[tokio::test]
async fn test_scanned_barcode_searches() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(PRODUCTS_PATH).query_param_missing("search");
        then.status(200).json_body(products(1..=5));
    });
    let scanned = server.mock(|when, then| {
        when.method(GET)
            .path(PRODUCTS_PATH)
            .query_param("search", "4006381333931")
            .query_param("page", "1");
        then.status(200).json_body(products(77..=77));
    });

    let controller = http_controller(Resource::Products, ListOptions::default()).unwrap();
    controller.mount(&credentials_for(&server.base_url()).unwrap()).await;

    let mut bar = SearchBar::new();
    bar.open_scanner().decoded("4006381333931", &controller).await;

    assert_eq!(bar.text(), "4006381333931");
    assert!(!bar.is_scanning());
    assert_eq!(ids(&controller.snapshot().data), vec![77]);
    scanned.assert();
}

// =============================================================================
// Pagination Tests
// =============================================================================

#[tokio::test]
async fn test_paginates_until_empty_page() {
    let server = MockServer::start();

    let pages = [(1, products(1..=2)), (2, products(3..=4)), (3, json!([]))];
    let mocks: Vec<_> = pages
        .iter()
        .map(|(page, body)| {
            server.mock(|when, then| {
                when.method(GET)
                    .path(PRODUCTS_PATH)
                    .query_param("page", page.to_string());
                then.status(200).json_body(body.clone());
            })
        })
        .collect();

    let options = ListOptions {
        page_size: 2,
        ..ListOptions::default()
    };
    let controller = http_controller(Resource::Products, options).unwrap();
    controller.mount(&credentials_for(&server.base_url()).unwrap()).await;

    controller.load_more().await;
    controller.load_more().await;
    let exhausted = controller.snapshot();
    assert_eq!(exhausted.status, ListStatus::Exhausted);
    assert_eq!(exhausted.page.get(), 3);
    assert_eq!(ids(&exhausted.data), vec![1, 2, 3, 4]);
    assert!(!exhausted.has_more_to_load());

    // Exhausted lists stay put.
    controller.load_more().await;
    assert_eq!(controller.snapshot(), exhausted);

    for mock in &mocks {
        mock.assert_hits(1);
    }
}

#[tokio::test]
async fn test_overlapping_pages_append_in_completion_order() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(PRODUCTS_PATH).query_param("page", "1");
        then.status(200).json_body(products(1..=2));
    });
    server.mock(|when, then| {
        when.method(GET).path(PRODUCTS_PATH).query_param("page", "2");
        then.status(200)
            .delay(Duration::from_millis(500))
            .json_body(products(3..=4));
    });
    server.mock(|when, then| {
        when.method(GET).path(PRODUCTS_PATH).query_param("page", "3");
        then.status(200).json_body(products(5..=6));
    });

    let options = ListOptions {
        overlapping_pages: true,
        ..ListOptions::default()
    };
    let controller = http_controller(Resource::Products, options).unwrap();
    controller.mount(&credentials_for(&server.base_url()).unwrap()).await;

    tokio::join!(controller.load_more(), controller.load_more());

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.page.get(), 3);
    assert_eq!(ids(&snapshot.data), vec![1, 2, 5, 6, 3, 4]);
}

#[tokio::test]
async fn test_serial_load_more_ignores_calls_while_in_flight() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(PRODUCTS_PATH).query_param("page", "1");
        then.status(200).json_body(products(1..=2));
    });
    let second = server.mock(|when, then| {
        when.method(GET).path(PRODUCTS_PATH).query_param("page", "2");
        then.status(200)
            .delay(Duration::from_millis(200))
            .json_body(products(3..=4));
    });
    let third = server.mock(|when, then| {
        when.method(GET).path(PRODUCTS_PATH).query_param("page", "3");
        then.status(200).json_body(products(5..=6));
    });

    let controller = http_controller(Resource::Products, ListOptions::default()).unwrap();
    controller.mount(&credentials_for(&server.base_url()).unwrap()).await;

    tokio::join!(controller.load_more(), controller.load_more());

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.page.get(), 2);
    assert_eq!(ids(&snapshot.data), vec![1, 2, 3, 4]);
    second.assert();
    assert_eq!(third.hits(), 0);
}

// =============================================================================
// Error Tests
// =============================================================================

#[tokio::test]
async fn test_backend_error_payload_keeps_loaded_data() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(PRODUCTS_PATH).query_param("page", "1");
        then.status(200).json_body(products(1..=2));
    });
    server.mock(|when, then| {
        when.method(GET).path(PRODUCTS_PATH).query_param("page", "2");
        then.status(401).json_body(json!({
            "code": "rest_forbidden",
            "message": "Sorry, you are not allowed to do that.",
            "data": {"status": 401}
        }));
    });

    let controller = http_controller(Resource::Products, ListOptions::default()).unwrap();
    controller.mount(&credentials_for(&server.base_url()).unwrap()).await;
    controller.load_more().await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.status, ListStatus::Error);
    assert_eq!(ids(&snapshot.data), vec![1, 2]);
    assert_eq!(
        snapshot.error,
        Some(ListError::Backend {
            code: "rest_forbidden".to_string(),
            message: Some("Sorry, you are not allowed to do that.".to_string()),
            status: Some(401),
        })
    );
}

#[tokio::test]
async fn test_backend_error_without_data_uses_http_status() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/wp-json/dokan/v1/orders");
        then.status(404).json_body(json!({"code": "rest_no_route"}));
    });

    let controller = http_controller(Resource::Orders, ListOptions::default()).unwrap();
    controller.mount(&credentials_for(&server.base_url()).unwrap()).await;

    let error = controller.snapshot().error.unwrap();
    assert_eq!(error.code(), Some("rest_no_route"));
    assert!(matches!(error, ListError::Backend { status: Some(404), .. }));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/wp-json/dokan/v1/reviews");
        then.status(502).body("<html>Bad Gateway</html>");
    });

    let controller = http_controller(Resource::Reviews, ListOptions::default()).unwrap();
    controller.mount(&credentials_for(&server.base_url()).unwrap()).await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.status, ListStatus::Error);
    assert!(matches!(snapshot.error, Some(ListError::Decode(_))));
}

#[tokio::test]
async fn test_unrecognized_object_ends_the_list() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(PRODUCTS_PATH);
        then.status(200).json_body(json!({"products": []}));
    });

    let controller = http_controller(Resource::Products, ListOptions::default()).unwrap();
    controller.mount(&credentials_for(&server.base_url()).unwrap()).await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.status, ListStatus::Exhausted);
    assert_eq!(snapshot.error, None);
    assert!(snapshot.data.is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Nothing listens on the discard port.
    let controller = http_controller(Resource::Products, ListOptions::default()).unwrap();
    controller
        .mount(&credentials_for("http://127.0.0.1:9").unwrap())
        .await;

    assert!(matches!(
        controller.snapshot().error,
        Some(ListError::Transport(_))
    ));
}

#[tokio::test]
async fn test_missing_credentials_never_hit_the_backend() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(products(1..=1));
    });

    let controller = http_controller(Resource::Products, ListOptions::default()).unwrap();
    controller.mount(&StaticCredentialSource::empty()).await;
    controller.refresh().await;

    assert!(matches!(
        controller.snapshot().error,
        Some(ListError::CredentialsUnavailable(_))
    ));
    assert_eq!(mock.hits(), 0);
}
