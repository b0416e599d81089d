//! `sk list` - Fetch and print a paginated catalog list.
//!
//! Mounts a [`ListController`] for the requested resource with the given
//! search and filters, loads up to `--pages` pages (stopping early once the
//! backend runs out) and prints one row per record.

use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use storekeep_client::{
    CatalogTransport, ClientConfig, ConfigError, EnvCredentialSource, HttpTransport,
    JsonFileCredentialSource, ListController, ListError, ListOptions, ListSnapshot, SearchBar,
};
use storekeep_core::{
    FilterSet, ItemStatus, OrderSummary, PriceBound, ProductSummary, Resource, ResultItem,
    ReviewSummary, SortOrder, SortOrderBy, StockStatus,
};
use thiserror::Error;

/// Errors that can occur while listing.
#[derive(Debug, Error)]
pub enum ListCommandError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The list ended in an error state.
    #[error("{0}")]
    List(#[from] ListError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Resource to list (`products`, `orders`, `reviews`)
    pub resource: Resource,

    /// Free-text search
    #[arg(short, long, conflicts_with = "scan")]
    pub search: Option<String>,

    /// Search by a scanned barcode
    #[arg(long)]
    pub scan: Option<String>,

    /// Sort field (`date`, `id`, `title`, `price`, `popularity`, `rating`, `modified`, `slug`)
    #[arg(long)]
    pub orderby: Option<SortOrderBy>,

    /// Sort direction (`asc`, `desc`)
    #[arg(long)]
    pub order: Option<SortOrder>,

    /// Record status, e.g. `publish` or `wc-processing`
    #[arg(long)]
    pub status: Option<ItemStatus>,

    /// Stock status (`instock`, `outofstock`, `onbackorder`)
    #[arg(long)]
    pub stock_status: Option<StockStatus>,

    /// Minimum price
    #[arg(long)]
    pub min_price: Option<String>,

    /// Maximum price
    #[arg(long)]
    pub max_price: Option<String>,

    /// Category id (`0` means any)
    #[arg(long)]
    pub category: Option<String>,

    /// Only featured products
    #[arg(long)]
    pub featured: bool,

    /// Only products on sale
    #[arg(long)]
    pub on_sale: bool,

    /// Number of pages to load
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Stored credentials JSON file (defaults to `STOREKEEP_CREDENTIALS_FILE`,
    /// then the `STOREKEEP_BASE_URL`/`USERNAME`/`PASSWORD` variables)
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Print raw records as a JSON array
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    fn filters(&self) -> FilterSet {
        FilterSet {
            sort_order_by: self.orderby,
            sort_order: self.order,
            status: self.status,
            category: self.category.clone(),
            stock_status: self.stock_status,
            min_price: self.min_price.as_deref().map(PriceBound::from),
            max_price: self.max_price.as_deref().map(PriceBound::from),
            featured: self.featured,
            on_sale: self.on_sale,
        }
    }
}

/// Run `sk list`.
pub async fn run(args: ListArgs) -> Result<(), ListCommandError> {
    let config = ClientConfig::from_env()?;
    let transport = HttpTransport::new(&config)?;

    let mut controller =
        ListController::new(transport, args.resource, ListOptions::from(&config))
            .with_filters(args.filters());
    if let Some(search) = &args.search {
        controller = controller.with_search(search.as_str());
    }

    match args.credentials.clone().or(config.credentials_file) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Using stored credentials file");
            controller.mount(&JsonFileCredentialSource::new(path)).await;
        }
        None => controller.mount(&EnvCredentialSource).await,
    }

    if let Some(code) = &args.scan {
        let mut bar = SearchBar::new();
        bar.open_scanner().decoded(code.as_str(), &controller).await;
    }

    let snapshot = load_pages(&controller, args.pages).await;
    tracing::info!(
        resource = %args.resource,
        page = %snapshot.page,
        records = snapshot.data.len(),
        status = ?snapshot.status,
        "List loaded"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let records: Vec<_> = snapshot.data.iter().cloned().map(ResultItem::into_value).collect();
        serde_json::to_writer_pretty(&mut out, &records)?;
        writeln!(out)?;
    } else {
        for item in &snapshot.data {
            writeln!(out, "{}", render_row(args.resource, item))?;
        }
    }
    out.flush()?;

    match snapshot.error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// Load more until `pages` pages are in or the list stops having more.
async fn load_pages<T: CatalogTransport>(controller: &ListController<T>, pages: u32) -> ListSnapshot {
    let mut snapshot = controller.snapshot();
    while snapshot.page.get() < pages && snapshot.has_more_to_load() {
        controller.load_more().await;
        snapshot = controller.snapshot();
    }
    snapshot
}

fn render_row(resource: Resource, item: &ResultItem) -> String {
    match resource {
        Resource::Products => {
            let p = ProductSummary::from(item);
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                p.id,
                or_dash(p.name.as_ref()),
                or_dash(p.sku.as_ref()),
                or_dash(p.price.as_ref()),
                or_dash(p.stock_status.as_ref()),
                or_dash(p.status.as_ref()),
            )
        }
        Resource::Orders => {
            let o = OrderSummary::from(item);
            format!(
                "{}\t{}\t{} {}\t{}",
                o.id,
                or_dash(o.status.as_ref()),
                or_dash(o.total.as_ref()),
                o.currency.as_deref().unwrap_or_default(),
                or_dash(o.date_created.as_ref()),
            )
        }
        Resource::Reviews => {
            let r = ReviewSummary::from(item);
            format!(
                "{}\t{}\t{}\t{}\t{}",
                r.id,
                or_dash(r.product_name.as_ref()),
                or_dash(r.reviewer.as_ref()),
                or_dash(r.rating.as_ref()),
                or_dash(r.date_created.as_ref()),
            )
        }
    }
}

fn or_dash<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_string(), ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use serde_json::json;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ListArgs,
    }

    fn parse(argv: &[&str]) -> ListArgs {
        TestCli::try_parse_from(std::iter::once("sk").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn test_parse_filters() {
        let args = parse(&[
            "products",
            "--orderby",
            "price",
            "--order",
            "asc",
            "--stock-status",
            "instock",
            "--min-price",
            "5",
            "--category",
            "12",
            "--on-sale",
            "--pages",
            "3",
        ]);

        assert_eq!(args.resource, Resource::Products);
        assert_eq!(args.pages, 3);
        assert_eq!(
            args.filters(),
            FilterSet::new()
                .sorted_by(SortOrderBy::Price, SortOrder::Asc)
                .with_stock_status(StockStatus::InStock)
                .with_min_price("5")
                .with_category("12")
                .on_sale_only()
        );
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        let argv = ["sk", "products", "--orderby", "colour"];
        assert!(TestCli::try_parse_from(argv).is_err());
        assert!(TestCli::try_parse_from(["sk", "customers"]).is_err());
        assert!(TestCli::try_parse_from(["sk", "products", "--pages", "0"]).is_err());
    }

    #[test]
    fn test_search_and_scan_conflict() {
        let argv = ["sk", "products", "--search", "mug", "--scan", "123"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_render_product_row() {
        let item = ResultItem::from_value(json!({
            "id": 7,
            "name": "Mug",
            "sku": "",
            "price": "9.50",
            "stock_status": "instock",
            "status": "publish"
        }))
        .unwrap();

        assert_eq!(
            render_row(Resource::Products, &item),
            "7\tMug\t-\t9.50\tinstock\tpublish"
        );
    }

    #[test]
    fn test_render_order_row() {
        let item = ResultItem::from_value(json!({
            "id": 42,
            "status": "processing",
            "total": "19.99",
            "currency": "EUR",
            "date_created": "2024-03-01T10:15:00"
        }))
        .unwrap();

        assert_eq!(
            render_row(Resource::Orders, &item),
            "42\tprocessing\t19.99 EUR\t2024-03-01 10:15:00"
        );
    }

    #[test]
    fn test_render_review_row_with_missing_fields() {
        let item = ResultItem::from_value(json!({"id": 3, "rating": 4})).unwrap();
        assert_eq!(render_row(Resource::Reviews, &item), "3\t-\t-\t4\t-");
    }
}
