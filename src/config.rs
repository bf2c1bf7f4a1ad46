use std::env;

/// Default hosts the scraper will accept product URLs from. The primary
/// storefront plus its Shopify-hosted alias.
pub const DEFAULT_STOREFRONT_DOMAINS: &[&str] = &["bankekuku.com", "banke-kuku.myshopify.com"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_model: Option<String>,
    pub notion_token: Option<String>,
    pub notion_db_id: Option<String>,
    pub operator_password: String,
    pub storefront_domains: Vec<String>,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map_err(|e| format!("GEMINI_API_KEY: {}", e))?,
            gemini_model: env::var("GEMINI_MODEL").ok(),
            notion_token: env::var("NOTION_TOKEN").ok(),
            notion_db_id: env::var("NOTION_DB_ID").ok(),
            operator_password: env::var("OPERATOR_PASSWORD")
                .map_err(|e| format!("OPERATOR_PASSWORD: {}", e))?,
            storefront_domains: env::var("STOREFRONT_DOMAINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|d| d.trim().to_string())
                        .filter(|d| !d.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| {
                    DEFAULT_STOREFRONT_DOMAINS
                        .iter()
                        .map(|d| (*d).to_string())
                        .collect()
                }),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .map(|p| p.parse::<u16>().map_err(|e| format!("PORT: {}", e)))
                .transpose()?
                .unwrap_or(8080),
        })
    }
}
