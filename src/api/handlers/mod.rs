//! HTTP request handlers for the scheme engine API.
//!
//! This module contains the handler functions for all API endpoints,
//! grouped by resource.

mod applicants;
mod applications;
mod schemes;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use tracing::warn;
use uuid::Uuid;

use super::response::ApiError;
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/applicants",
            get(applicants::list).post(applicants::create),
        )
        .route(
            "/api/applicants/:id",
            put(applicants::update).delete(applicants::remove),
        )
        .route("/api/schemes", get(schemes::list).post(schemes::create))
        .route("/api/schemes/eligible", get(schemes::eligible))
        .route(
            "/api/schemes/:id",
            put(schemes::update).delete(schemes::remove),
        )
        .route(
            "/api/applications",
            get(applications::list).post(applications::create),
        )
        .route(
            "/api/applications/:id",
            put(applications::update).delete(applications::remove),
        )
        .with_state(state)
}

/// Maps a JSON extraction rejection to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (StatusCode::BAD_REQUEST, Json(error)).into_response()
}
