//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::content_type::{ContentType, Language};
use crate::generation::progress::GenerationProgress;
use crate::generation::runner::{BatchOutcome, BatchRequest};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body of POST /api/v1/generate. Language and custom prompt fall back to settings.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    pub language: Option<Language>,
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContentTypeInfo {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub label: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/content-types
pub async fn handle_content_types() -> Json<Vec<ContentTypeInfo>> {
    Json(
        ContentType::ALL
            .into_iter()
            .map(|content_type| ContentTypeInfo {
                content_type,
                label: content_type.label(),
            })
            .collect(),
    )
}

/// POST /api/v1/generate
///
/// Runs one batch to completion (or first failure) and returns the new artifacts.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<BatchOutcome>, AppError> {
    let settings = state.settings.current().await;

    let batch = BatchRequest {
        api_key: settings.api_key,
        keywords: request.keywords,
        content_types: request.content_types,
        language: request.language.unwrap_or(settings.language),
        custom_prompt: request.custom_prompt.or(settings.custom_prompt),
    };

    let outcome = state.runner.run(batch).await?;
    Ok(Json(outcome))
}

/// GET /api/v1/progress
pub async fn handle_progress(State(state): State<AppState>) -> Json<GenerationProgress> {
    Json(state.runner.progress().snapshot().await)
}
