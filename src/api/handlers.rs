//! HTTP request handlers

use super::types::{ActionInfo, ErrorResponse, HealthResponse, WebhookRequest};
use super::AppState;
use crate::actions::ActionOutcome;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Action calls from the dialogue engine
        .route("/webhook", post(webhook))
        .route("/actions", get(list_actions))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn webhook(
    State(state): State<AppState>,
    body: Result<Json<WebhookRequest>, JsonRejection>,
) -> Result<Json<ActionOutcome>, AppError> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let mut tracker = request.tracker;
    if tracker.sender_id.is_none() {
        tracker.sender_id = request.sender_id;
    }

    tracing::debug!(
        action = %request.next_action,
        version = request.version.as_deref().unwrap_or(""),
        "Action call received"
    );

    state
        .registry
        .execute(&request.next_action, &tracker)
        .await
        .map(Json)
        .ok_or(AppError::UnknownAction(request.next_action))
}

async fn list_actions(State(state): State<AppState>) -> Json<Vec<ActionInfo>> {
    Json(
        state
            .registry
            .names()
            .into_iter()
            .map(|name| ActionInfo {
                name: name.to_string(),
            })
            .collect(),
    )
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    UnknownAction(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::UnknownAction(name) => {
                tracing::warn!(action = %name, "Unknown action requested");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: format!("No registered action found for name '{name}'."),
                        action_name: Some(name),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
