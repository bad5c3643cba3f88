//! Research run endpoint.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::agent::ResearchResult;

use super::types::{ErrorResponse, ResearchRequest};
use super::AppState;

/// Run the research agent to investigate the provided query.
///
/// Degenerate queries and agent errors come back as structured results with
/// status 200. The run executes on its own task; if that task dies, the
/// failure surfaces as a 500 with a detail message instead of a dropped
/// connection.
pub async fn run(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResearchRequest>,
) -> Result<Json<ResearchResult>, (StatusCode, Json<ErrorResponse>)> {
    let service = state.service().await;

    let run = tokio::spawn(async move { service.run_research(&request.query).await });

    match run.await {
        Ok(result) => Ok(Json(result)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                detail: format!("Error running research agent: {}", e),
            }),
        )),
    }
}
