//! Storekeep CLI - Browse remote catalog lists from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # First page of products
//! sk list products
//!
//! # Three pages of in-stock products matching "mug", cheapest first
//! sk list products --search mug --stock-status instock --orderby price --order asc --pages 3
//!
//! # Look up a product by scanned barcode
//! sk list products --scan 4006381333931
//!
//! # Processing orders as JSON
//! sk list orders --status wc-processing --json
//! ```
//!
//! # Environment Variables
//!
//! - `STOREKEEP_CREDENTIALS_FILE` - Stored credentials JSON (or pass `--credentials`)
//! - `STOREKEEP_BASE_URL`, `STOREKEEP_USERNAME`, `STOREKEEP_PASSWORD` - Used when no file is given
//! - `STOREKEEP_LOG_FORMAT` - Set to `json` for structured log output
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT` - Optional error tracking

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "sk")]
#[command(author, version, about = "Storekeep catalog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, orders or reviews
    List(commands::list::ListArgs),
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok().filter(|dsn| !dsn.is_empty())?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: std::env::var("SENTRY_ENVIRONMENT")
                .ok()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storekeep_client=info,storekeep_cli=info".into());

    // Logs go to stderr so list output on stdout stays pipeable
    let is_json = std::env::var("STOREKEEP_LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry();
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::List(args) => commands::list::run(args).await?,
    }
    Ok(())
}
