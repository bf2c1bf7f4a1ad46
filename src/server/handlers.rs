//! Handlers for the operator workflow: login, scrape+generate, edit, save,
//! export, reset, and the operational manual.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::ai::client::error_campaign;
use crate::models::CaptionVariant;
use crate::scrape;
use crate::session::EditOutcome;

use super::error::{ApiError, ApiResult};
use super::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Request body for `POST /campaign`.
#[derive(Debug, Deserialize)]
pub struct CampaignRequest {
    pub url: String,
}

/// The current campaign as seen by the operator.
#[derive(Debug, Serialize)]
pub struct CampaignResponse {
    pub product_name: String,
    pub generation: u64,
    pub variants: Vec<CaptionVariant>,
}

/// Request body for `PUT /campaign/variants/{index}`.
#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub post: String,
    /// When present, the edit only applies if the campaign has not been
    /// regenerated since the operator loaded it.
    pub generation: Option<u64>,
}

/// Response for single-variant saves.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub persona: String,
    pub saved: bool,
}

/// Response for `POST /campaign/export`.
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub saved: usize,
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn require_auth(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let token = bearer_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let session = state.session.lock().await;
    if session.is_authorized(token) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("Invalid or expired token".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// POST /auth/login
///
/// The password gate. A correct password mints the session bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if input.password != state.config.operator_password {
        warn!("Rejected login attempt");
        return Err(ApiError::Unauthorized("Access denied".to_string()));
    }

    let token = state.session.lock().await.login();
    info!("Operator logged in");
    Ok(Json(LoginResponse { token }))
}

/// POST /session/reset
///
/// Clear the session entirely, authentication included.
pub async fn reset(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<Value>> {
    require_auth(&state, &headers).await?;
    state.session.lock().await.reset();
    info!("Session reset");
    Ok(Json(json!({ "reset": true })))
}

/// POST /campaign
///
/// Scrape the product page, generate caption variants, and install them as
/// the current campaign. Generation failures degrade to a single
/// error-variant so the operator sees the message in the variant list.
pub async fn create_campaign(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CampaignRequest>,
) -> ApiResult<Json<CampaignResponse>> {
    require_auth(&state, &headers).await?;

    if input.url.trim().is_empty() {
        return Err(ApiError::BadRequest("Paste a product URL first".to_string()));
    }

    let product = scrape::scrape_product(&input.url, &state.config.storefront_domains).await?;
    info!(title = %product.title, "Scraped product page");

    let variants = match state
        .gemini
        .generate_campaign(&product.title, &product.description)
        .await
    {
        Ok(variants) => variants,
        Err(e) => {
            warn!(error = %e, "Caption generation failed");
            error_campaign(&e)
        }
    };

    let mut session = state.session.lock().await;
    let generation = session.set_campaign(product.title.clone(), variants.clone());

    Ok(Json(CampaignResponse {
        product_name: product.title,
        generation,
        variants,
    }))
}

/// GET /campaign
pub async fn get_campaign(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<CampaignResponse>> {
    require_auth(&state, &headers).await?;

    let session = state.session.lock().await;
    let campaign = session
        .campaign()
        .ok_or_else(|| ApiError::NotFound("No campaign generated yet".to_string()))?;

    Ok(Json(CampaignResponse {
        product_name: campaign.product_name.clone(),
        generation: session.generation(),
        variants: campaign.variants.clone(),
    }))
}

/// PUT /campaign/variants/{index}
///
/// Apply an operator edit to one variant's post text.
pub async fn edit_variant(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    headers: HeaderMap,
    Json(input): Json<EditRequest>,
) -> ApiResult<Json<CaptionVariant>> {
    require_auth(&state, &headers).await?;

    let mut session = state.session.lock().await;
    match session.edit_variant(index, input.post, input.generation) {
        EditOutcome::Applied => {
            let variant = session
                .variant(index)
                .cloned()
                .ok_or_else(|| ApiError::NotFound("Variant not found".to_string()))?;
            Ok(Json(variant))
        }
        EditOutcome::NoCampaign => {
            Err(ApiError::NotFound("No campaign generated yet".to_string()))
        }
        EditOutcome::VariantOutOfRange => {
            Err(ApiError::NotFound(format!("No variant at index {index}")))
        }
        EditOutcome::StaleGeneration => Err(ApiError::Conflict(
            "Campaign was regenerated; reload before editing".to_string(),
        )),
    }
}

/// POST /campaign/variants/{index}/save
///
/// Persist one variant (with any edits applied) to Notion.
pub async fn save_variant(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    headers: HeaderMap,
) -> ApiResult<Json<SaveResponse>> {
    require_auth(&state, &headers).await?;

    // Clone out of the session so the lock is not held across the API call.
    let (product_name, variant) = {
        let session = state.session.lock().await;
        let campaign = session
            .campaign()
            .ok_or_else(|| ApiError::NotFound("No campaign generated yet".to_string()))?;
        let variant = campaign
            .variants
            .get(index)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("No variant at index {index}")))?;
        (campaign.product_name.clone(), variant)
    };

    state
        .notion
        .create_page(&product_name, &variant.persona, &variant.post)
        .await?;

    Ok(Json(SaveResponse {
        persona: variant.persona,
        saved: true,
    }))
}

/// POST /campaign/export
///
/// Persist every variant to Notion sequentially, best-effort: failures are
/// counted, not fatal. Variants missing a persona or post are skipped.
pub async fn export_campaign(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<ExportResponse>> {
    require_auth(&state, &headers).await?;

    let (product_name, variants) = {
        let session = state.session.lock().await;
        let campaign = session
            .campaign()
            .ok_or_else(|| ApiError::NotFound("No campaign generated yet".to_string()))?;
        (campaign.product_name.clone(), campaign.variants.clone())
    };

    let mut saved = 0;
    let mut failed = 0;
    for variant in &variants {
        if variant.persona.is_empty() || variant.post.is_empty() {
            continue;
        }
        match state
            .notion
            .create_page(&product_name, &variant.persona, &variant.post)
            .await
        {
            Ok(()) => saved += 1,
            Err(e) => {
                warn!(persona = %variant.persona, error = %e, "Export of variant failed");
                failed += 1;
            }
        }
    }

    info!(saved, failed, "Campaign export finished");
    Ok(Json(ExportResponse { saved, failed }))
}

/// GET /manual
///
/// The operational guide shown to the operator.
pub async fn manual() -> Json<Value> {
    Json(json!({
        "title": "Operational Guide",
        "steps": [
            {
                "name": "SOURCE",
                "instruction": "Go to the storefront. Open a single product page."
            },
            {
                "name": "ACQUIRE",
                "instruction": "Copy the URL from the browser bar."
            },
            {
                "name": "EXECUTE",
                "instruction": "POST the URL to /campaign to generate caption assets."
            }
        ]
    }))
}
