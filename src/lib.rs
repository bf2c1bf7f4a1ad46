/// Campaign Studio - a single-operator marketing assistant for a Shopify storefront.
///
/// Given a product page URL, the service scrapes the product title and
/// description, asks Gemini for a set of persona-voiced caption variants,
/// lets the operator edit them through a small JSON API, and persists
/// approved variants to a Notion database.
///
/// # Architecture
///
/// The system uses:
/// - axum for the operator-facing HTTP surface
/// - reqwest for all outbound calls (storefront, Gemini, Notion)
/// - scraper + html2text for product text extraction
/// - Tokio for async runtime
///
/// The workflow is linear: scrape -> generate -> edit -> save. All state
/// lives in one in-memory session that is discarded on reset.
// Module declarations
pub mod ai;
pub mod config;
pub mod errors;
pub mod models;
pub mod notion;
pub mod scrape;
pub mod server;
pub mod session;

/// Configure structured logging for the service.
///
/// Sets up tracing-subscriber with an env-filter (override via `RUST_LOG`)
/// and a plain fmt layer. Call once at process start.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campaign_studio=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
