//! Gemini API client.
//!
//! Talks to the `generateContent` REST endpoint directly with reqwest and
//! parses the model's JSON-in-text reply into caption variants.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use crate::errors::StudioError;
use crate::models::CaptionVariant;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model used when no override is configured.
pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Gemini API client for generating caption campaigns.
pub struct GeminiClient {
    api_key: String,
    model_name: String,
}

impl GeminiClient {
    #[must_use]
    pub fn new(api_key: String, model_override: Option<String>) -> Self {
        Self {
            api_key,
            model_name: model_override.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    /// Generate caption variants for one product.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the API replies with a
    /// non-success status, or the reply cannot be parsed into caption
    /// variants.
    pub async fn generate_campaign(
        &self,
        product_name: &str,
        description: &str,
    ) -> Result<Vec<CaptionVariant>, StudioError> {
        let prompt = super::prompt::build_campaign_prompt(product_name, description);

        info!(model = %self.model_name, %product_name, "Generating caption campaign");

        let request_body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StudioError::HttpError(format!("Failed to build Gemini HTTP client: {e}")))?;

        let response = client
            .post(format!(
                "{GEMINI_API_BASE}/{}:generateContent",
                self.model_name
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| StudioError::HttpError(format!("Gemini API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(StudioError::GeminiError(format!(
                "Gemini API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| StudioError::GeminiError(format!("Failed to parse Gemini response: {e}")))?;

        let text = extract_response_text(&response_json)
            .ok_or_else(|| StudioError::GeminiError("No text in response".to_string()))?;

        parse_campaign_json(&text)
    }
}

/// Pull the generated text out of a `generateContent` reply:
/// `candidates[0].content.parts[].text`, joined.
#[must_use]
pub fn extract_response_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let collected: Vec<&str> = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if collected.is_empty() {
        None
    } else {
        Some(collected.join(""))
    }
}

/// Parse the model's caption JSON, tolerating a markdown code fence around
/// the array.
///
/// # Errors
///
/// Returns `GeminiError` when the text holds no parsable JSON array.
pub fn parse_campaign_json(text: &str) -> Result<Vec<CaptionVariant>, StudioError> {
    let body = strip_code_fence(text);

    serde_json::from_str::<Vec<CaptionVariant>>(body.trim())
        .map_err(|e| StudioError::GeminiError(format!("Failed to parse campaign JSON: {e}")))
}

/// Strip a ```json ... ``` fence if the model wrapped its output in one.
#[must_use]
fn strip_code_fence(text: &str) -> &str {
    if let Some(after_open) = text.split("```json").nth(1) {
        return after_open.split("```").next().unwrap_or(after_open);
    }
    if let Some(after_open) = text.split("```").nth(1) {
        return after_open.split("```").next().unwrap_or(after_open);
    }
    text
}

/// The degraded single-variant campaign shown when generation fails, matching
/// the error-in-the-list behavior the operator workflow expects.
#[must_use]
pub fn error_campaign(error: &StudioError) -> Vec<CaptionVariant> {
    vec![CaptionVariant {
        persona: "Error".to_string(),
        post: format!("AI ERROR: {error}"),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_campaign_plain_json() {
        let text = r#"[{"persona": "The Lagos Socialite", "post": "Owambe, but soft."}]"#;
        let variants = parse_campaign_json(text).unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].persona, "The Lagos Socialite");
        assert_eq!(variants[0].post, "Owambe, but soft.");
    }

    #[test]
    fn test_parse_campaign_fenced_json() {
        let text = "```json\n[{\"persona\": \"A\", \"post\": \"B\"}]\n```";
        let variants = parse_campaign_json(text).unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].persona, "A");
    }

    #[test]
    fn test_parse_campaign_fenced_with_prose() {
        let text = "Here you go:\n```json\n[{\"persona\": \"A\", \"post\": \"B\"}]\n```\nEnjoy!";
        let variants = parse_campaign_json(text).unwrap();
        assert_eq!(variants.len(), 1);
    }

    #[test]
    fn test_parse_campaign_bare_fence() {
        let text = "```\n[{\"persona\": \"A\", \"post\": \"B\"}]\n```";
        let variants = parse_campaign_json(text).unwrap();
        assert_eq!(variants.len(), 1);
    }

    #[test]
    fn test_parse_campaign_tolerates_missing_fields() {
        let text = r#"[{"persona": "A"}, {"post": "B"}]"#;
        let variants = parse_campaign_json(text).unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].post, "");
        assert_eq!(variants[1].persona, "");
    }

    #[test]
    fn test_parse_campaign_rejects_garbage() {
        assert!(parse_campaign_json("the model rambled instead").is_err());
        assert!(parse_campaign_json("").is_err());
        assert!(parse_campaign_json("{\"persona\": \"not an array\"}").is_err());
    }

    #[test]
    fn test_extract_response_text() {
        let response = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Hello " },
                        { "text": "world" }
                    ]
                }
            }]
        });
        assert_eq!(
            extract_response_text(&response).as_deref(),
            Some("Hello world")
        );
    }

    #[test]
    fn test_extract_response_text_empty_candidates() {
        let response = serde_json::json!({ "candidates": [] });
        assert!(extract_response_text(&response).is_none());

        let response = serde_json::json!({ "error": { "message": "quota" } });
        assert!(extract_response_text(&response).is_none());
    }

    #[test]
    fn test_error_campaign_shape() {
        let err = StudioError::GeminiError("quota exceeded".to_string());
        let variants = error_campaign(&err);
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].persona, "Error");
        assert!(variants[0].post.starts_with("AI ERROR:"));
        assert!(variants[0].post.contains("quota exceeded"));
    }
}
