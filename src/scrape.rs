//! Storefront product extraction.
//!
//! Two strategies, tried in order: the Shopify product JSON endpoint
//! (`{url}.json`), then the rendered product page with theme-specific
//! description selectors. Both feed the same line-level cleanup before the
//! text goes anywhere near a prompt.

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::errors::StudioError;
use crate::models::Product;

/// Title used when neither strategy finds one.
pub const FALLBACK_TITLE: &str = "Banke Kuku Piece";

/// Description placeholder when no usable text survives extraction.
pub const NO_TEXT_PLACEHOLDER: &str = "[NO TEXT FOUND]";

/// Description lines containing any of these (case-insensitive) are
/// storefront boilerplate, not product copy.
const BOILERPLATE_MARKERS: &[&str] = &["SHIPPING", "RETURNS", "SIZE", "WHATSAPP", "ADD TO CART"];

/// Maximum number of description lines kept after cleanup.
const MAX_DESCRIPTION_LINES: usize = 25;

/// Minimum line length (in characters) for a line to count as product copy.
const MIN_LINE_CHARS: usize = 6;

/// Shopify theme selectors for the product description block, in priority
/// order.
const DESCRIPTION_SELECTORS: &[&str] = &[
    "div.product-description",
    "div.rte",
    "div.product__description",
];

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .user_agent("Mozilla/5.0")
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Check that `target_url` parses and its host is one of the allow-listed
/// storefront domains (exact match or subdomain).
#[must_use]
pub fn check_domain(target_url: &str, allowlist: &[String]) -> bool {
    let Ok(parsed) = Url::parse(target_url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();

    allowlist.iter().any(|domain| {
        let domain = domain.to_ascii_lowercase();
        host == domain || host.ends_with(&format!(".{domain}"))
    })
}

/// Drop boilerplate and trivially short lines, cap the result.
#[must_use]
pub fn clean_description(raw: &str) -> String {
    raw.lines()
        .filter(|line| {
            let upper = line.to_uppercase();
            !BOILERPLATE_MARKERS.iter().any(|m| upper.contains(m))
        })
        .filter(|line| line.chars().count() >= MIN_LINE_CHARS)
        .take(MAX_DESCRIPTION_LINES)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip the query string from a product URL. Shopify variant selectors ride
/// in the query and would break the `.json` endpoint.
#[must_use]
pub fn strip_query(target_url: &str) -> &str {
    target_url.split('?').next().unwrap_or(target_url)
}

/// Scrape product title and description text from a storefront product page.
///
/// # Errors
///
/// Returns `DomainNotAllowed` for off-storefront URLs and `ScrapeError` when
/// the page itself cannot be fetched. A fetchable page with no recognizable
/// description yields `Ok` with the `[NO TEXT FOUND]` placeholder.
pub async fn scrape_product(target_url: &str, allowlist: &[String]) -> Result<Product, StudioError> {
    if !check_domain(target_url, allowlist) {
        return Err(StudioError::DomainNotAllowed(target_url.to_string()));
    }

    let clean_url = strip_query(target_url);
    let mut title = FALLBACK_TITLE.to_string();
    let mut desc_text = String::new();

    // Strategy 1: Shopify product JSON
    match fetch_product_json(clean_url).await {
        Ok(Some((json_title, body_text))) => {
            if let Some(t) = json_title {
                title = t;
            }
            desc_text = body_text;
        }
        Ok(None) => {}
        Err(e) => {
            // Best-effort: fall through to the HTML strategy.
            info!("Product JSON strategy failed: {e}");
        }
    }

    // Strategy 2: rendered HTML
    if desc_text.trim().is_empty() {
        let response = HTTP_CLIENT
            .get(target_url)
            .send()
            .await
            .map_err(|e| StudioError::ScrapeError(e.to_string()))?;
        let html = response
            .text()
            .await
            .map_err(|e| StudioError::ScrapeError(e.to_string()))?;

        let (html_title, html_desc) = extract_from_html(&html);
        if let Some(t) = html_title {
            title = t;
        }
        if let Some(d) = html_desc {
            desc_text = d;
        }
    }

    if desc_text.trim().is_empty() {
        warn!(%title, "No description text found on product page");
        return Ok(Product {
            title,
            description: NO_TEXT_PLACEHOLDER.to_string(),
        });
    }

    Ok(Product {
        title,
        description: clean_description(&desc_text),
    })
}

/// Fetch `{url}.json` and pull `product.title` / `product.body_html`.
/// Returns `Ok(None)` when the endpoint is missing or not product JSON.
async fn fetch_product_json(
    clean_url: &str,
) -> Result<Option<(Option<String>, String)>, StudioError> {
    let json_url = format!("{clean_url}.json");
    let response = HTTP_CLIENT.get(&json_url).send().await?;

    if !response.status().is_success() {
        return Ok(None);
    }

    let data: Value = response
        .json()
        .await
        .map_err(|e| StudioError::ScrapeError(format!("Invalid product JSON: {e}")))?;

    let Some(product) = data.get("product") else {
        return Ok(None);
    };

    let title = product
        .get("title")
        .and_then(|t| t.as_str())
        .map(std::string::ToString::to_string);

    let body_text = product
        .get("body_html")
        .and_then(|b| b.as_str())
        .map(html_to_text)
        .unwrap_or_default();

    Ok(Some((title, body_text)))
}

/// Title from the first `h1`, description from the first matching
/// theme selector.
fn extract_from_html(html: &str) -> (Option<String>, Option<String>) {
    let document = Html::parse_document(html);

    let title = Selector::parse("h1").ok().and_then(|sel| {
        document
            .select(&sel)
            .next()
            .map(|h1| h1.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    });

    let description = DESCRIPTION_SELECTORS.iter().find_map(|raw_sel| {
        let sel = Selector::parse(raw_sel).ok()?;
        let block = document.select(&sel).next()?;
        let text = block
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if text.is_empty() { None } else { Some(text) }
    });

    (title, description)
}

/// Render an HTML fragment (Shopify `body_html`) to plain text lines.
fn html_to_text(html: &str) -> String {
    html2text::from_read(html.as_bytes(), 200)
        .map(|text| {
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}
