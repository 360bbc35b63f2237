//! Handlers for the applicant endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::request::{ApplicantPayload, CreateApplicantsRequest, PageQuery};
use crate::api::response::{ApiErrorResponse, ApplicantListResponse, MessageResponse};
use crate::api::state::AppState;
use crate::models::Applicant;

use super::rejection_response;

/// Handler for GET /api/applicants.
pub(super) async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Response {
    let (applicants, total) = state
        .store()
        .list_applicants(page.offset(), page.limit())
        .await;
    Json(ApplicantListResponse { applicants, total }).into_response()
}

/// Handler for POST /api/applicants.
///
/// Accepts a batch of applicant definitions and creates them all.
pub(super) async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateApplicantsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let applicants: Vec<Applicant> = request
        .applicants
        .into_iter()
        .map(ApplicantPayload::into_applicant)
        .collect();
    info!(
        correlation_id = %correlation_id,
        count = applicants.len(),
        "Creating applicants"
    );
    state.store().insert_applicants(applicants.clone()).await;

    (StatusCode::CREATED, Json(applicants)).into_response()
}

/// Handler for PUT /api/applicants/{id}.
pub(super) async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ApplicantPayload>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let existing = match state.store().get_applicant(&id).await {
        Ok(applicant) => applicant,
        Err(err) => {
            warn!(correlation_id = %correlation_id, applicant_id = %id, error = %err, "Applicant update failed");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    match state.store().replace_applicant(request.apply_to(&existing)).await {
        Ok(applicant) => {
            info!(correlation_id = %correlation_id, applicant_id = %applicant.id, "Updated applicant");
            Json(applicant).into_response()
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for DELETE /api/applicants/{id}.
///
/// Removes the applicant and flags their applications for review.
pub(super) async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store().delete_applicant(&id).await {
        Ok(()) => {
            info!(applicant_id = %id, "Deleted applicant");
            Json(MessageResponse::ok()).into_response()
        }
        Err(err) => {
            warn!(applicant_id = %id, error = %err, "Applicant deletion failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}
