use std::sync::Arc;

use tokio::sync::Mutex;

use crate::ai::GeminiClient;
use crate::config::AppConfig;
use crate::notion::NotionClient;
use crate::session::Session;

/// Shared state for all handlers: the config, the two outbound API clients,
/// and the single operator session.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gemini: Arc<GeminiClient>,
    pub notion: Arc<NotionClient>,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let gemini = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());
        let notion = NotionClient::new(config.notion_token.clone(), config.notion_db_id.clone());

        Self {
            config: Arc::new(config),
            gemini: Arc::new(gemini),
            notion: Arc::new(notion),
            session: Arc::new(Mutex::new(Session::new())),
        }
    }
}
