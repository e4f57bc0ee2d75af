use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::grouping::KeywordGroup;
use crate::models::content::GeneratedContent;
use crate::state::AppState;

/// GET /api/v1/history
pub async fn handle_list_history(State(state): State<AppState>) -> Json<Vec<GeneratedContent>> {
    Json(state.history.all().await)
}

/// GET /api/v1/history/grouped
pub async fn handle_grouped_history(State(state): State<AppState>) -> Json<Vec<KeywordGroup>> {
    Json(state.history.grouped().await)
}

/// GET /api/v1/history/:id/text
///
/// Raw artifact body as plain text, ready to paste.
pub async fn handle_artifact_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let content = state
        .history
        .find(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Artifact {id} not found")))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        content.text,
    ))
}

/// DELETE /api/v1/history
pub async fn handle_clear_history(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.history.clear().await?;
    tracing::info!("History cleared");
    Ok(StatusCode::NO_CONTENT)
}
