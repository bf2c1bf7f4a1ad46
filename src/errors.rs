use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("URL is not on the storefront allowlist: {0}")]
    DomainNotAllowed(String),

    #[error("Failed to scrape product page: {0}")]
    ScrapeError(String),

    #[error("Failed to access Gemini API: {0}")]
    GeminiError(String),

    #[error("Failed to access Notion API: {0}")]
    NotionError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for StudioError {
    fn from(error: reqwest::Error) -> Self {
        StudioError::HttpError(error.to_string())
    }
}

impl From<url::ParseError> for StudioError {
    fn from(error: url::ParseError) -> Self {
        StudioError::ScrapeError(format!("Invalid URL: {error}"))
    }
}
