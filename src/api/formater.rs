//! Content formatter endpoint.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::types::{ErrorResponse, Format, FormatRequest};
use super::AppState;

/// Generate formatted text with summary and references from provided content.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FormatRequest>,
) -> Result<Json<Format>, (StatusCode, Json<ErrorResponse>)> {
    let service = state.service().await;

    match service.format_content(&request.prompt).await {
        Ok(format) => Ok(Json(format)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                detail: format!("Error generating formatted content: {}", e),
            }),
        )),
    }
}
