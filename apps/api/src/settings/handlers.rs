use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::settings::{SettingsUpdate, SettingsView};
use crate::state::AppState;

/// GET /api/v1/settings
pub async fn handle_get_settings(State(state): State<AppState>) -> Json<SettingsView> {
    Json(state.settings.view().await)
}

/// PUT /api/v1/settings
///
/// The API key is written to its slot immediately; language and custom prompt
/// live for the lifetime of the process.
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<SettingsView>, AppError> {
    let view = state.settings.update(update).await?;
    Ok(Json(view))
}
