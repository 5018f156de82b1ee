//! Permission read handlers.

use axum::{extract::State, response::IntoResponse, Json};
use panel_core::error::AppError;

use crate::AppState;

/// List all permissions sorted by (resource, action).
pub async fn list_permissions(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let permissions = state.permissions.list_all().await?;
    Ok(Json(permissions))
}

/// List all permissions grouped by resource.
pub async fn list_permissions_grouped(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let grouped = state.permissions.list_grouped().await?;
    Ok(Json(grouped))
}
