//! Notion API client.
//!
//! One operation: create a page in the campaign database with a fixed
//! property schema. Payload construction is split out so the schema is
//! testable without network access.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::errors::StudioError;

const NOTION_API_URL: &str = "https://api.notion.com/v1/pages";
const NOTION_VERSION: &str = "2022-06-28";

/// Notion rich_text content is capped per block; posts are truncated to fit.
pub const MAX_POST_CHARS: usize = 2000;

const REQUEST_TIMEOUT_SECS: u64 = 5;

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Notion page-creation client for the campaign database.
pub struct NotionClient {
    token: Option<String>,
    db_id: Option<String>,
}

impl NotionClient {
    #[must_use]
    pub fn new(token: Option<String>, db_id: Option<String>) -> Self {
        Self { token, db_id }
    }

    /// Create one "Draft" row for an approved caption.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the token or database id is not
    /// configured, and `NotionError` when the API rejects the write.
    pub async fn create_page(
        &self,
        product_name: &str,
        persona: &str,
        post: &str,
    ) -> Result<(), StudioError> {
        let (Some(token), Some(db_id)) = (self.token.as_deref(), self.db_id.as_deref()) else {
            return Err(StudioError::ConfigError(
                "Notion token or database id missing".to_string(),
            ));
        };

        let payload = build_page_payload(db_id, product_name, persona, post);

        let response = HTTP_CLIENT
            .post(NOTION_API_URL)
            .bearer_auth(token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&payload)
            .send()
            .await
            .map_err(|e| StudioError::NotionError(format!("Notion request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            warn!(%status, "Notion page creation failed");
            return Err(StudioError::NotionError(format!(
                "Notion error {status}: {error_text}"
            )));
        }

        info!(%persona, "Saved caption to Notion");
        Ok(())
    }
}

/// Build the page-creation payload with the fixed campaign schema.
#[must_use]
pub fn build_page_payload(db_id: &str, product_name: &str, persona: &str, post: &str) -> Value {
    json!({
        "parent": { "database_id": db_id },
        "properties": {
            "Product Name": {
                "title": [{ "text": { "content": product_name } }]
            },
            "Persona": {
                "rich_text": [{ "text": { "content": persona } }]
            },
            "Generated Post": {
                "rich_text": [{ "text": { "content": truncate_post(post) } }]
            },
            "Status": {
                "status": { "name": "Draft" }
            }
        }
    })
}

/// Truncate a post to the Notion content cap, on a char boundary.
#[must_use]
pub fn truncate_post(post: &str) -> String {
    post.chars().take(MAX_POST_CHARS).collect()
}
