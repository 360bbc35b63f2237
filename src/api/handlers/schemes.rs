//! Handlers for the scheme endpoints, including the eligibility listing.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::request::{CreateSchemesRequest, EligibleSchemesQuery, PageQuery, SchemePayload};
use crate::api::response::{ApiErrorResponse, MessageResponse, SchemeListResponse};
use crate::api::state::AppState;
use crate::eligibility::decide;
use crate::models::Scheme;

use super::rejection_response;

/// Handler for GET /api/schemes.
pub(super) async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Response {
    let (schemes, total) = state
        .store()
        .list_schemes(page.offset(), page.limit())
        .await;
    Json(SchemeListResponse { schemes, total }).into_response()
}

/// Handler for GET /api/schemes/eligible?applicant={id}.
///
/// Runs every scheme through the eligibility engine for the given applicant
/// and returns one page of the eligible ones. The page window is clamped to
/// the filtered list, and the total counts eligible schemes only.
pub(super) async fn eligible(
    State(state): State<AppState>,
    Query(query): Query<EligibleSchemesQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let applicant = match state.store().get_applicant(&query.applicant).await {
        Ok(applicant) => applicant,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                applicant_id = %query.applicant,
                error = %err,
                "Eligibility listing failed"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let today = Utc::now().date_naive();
    let eligible: Vec<Scheme> = state
        .store()
        .all_schemes()
        .await
        .into_iter()
        .filter(|scheme| decide(&applicant, scheme, today))
        .collect();
    let total = eligible.len();

    let page = query.page_query();
    let start = page.offset().min(total);
    let end = (start + page.limit()).min(total);

    info!(
        correlation_id = %correlation_id,
        applicant_id = %applicant.id,
        eligible = total,
        "Evaluated schemes for applicant"
    );
    Json(SchemeListResponse {
        schemes: eligible[start..end].to_vec(),
        total,
    })
    .into_response()
}

/// Handler for POST /api/schemes.
///
/// Accepts a batch of scheme definitions; each must pass the authoring
/// rules and carry a name not already in use. The batch is all-or-nothing.
pub(super) async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateSchemesRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let schemes: Vec<Scheme> = request
        .schemes
        .into_iter()
        .map(SchemePayload::into_scheme)
        .collect();
    for scheme in &schemes {
        if let Err(err) = scheme.validate() {
            warn!(
                correlation_id = %correlation_id,
                scheme_name = %scheme.name,
                error = %err,
                "Scheme rejected by authoring rules"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    }

    match state.store().insert_schemes(schemes.clone()).await {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                count = schemes.len(),
                "Created schemes"
            );
            (StatusCode::CREATED, Json(schemes)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Scheme creation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for PUT /api/schemes/{id}.
pub(super) async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SchemePayload>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let existing = match state.store().get_scheme(&id).await {
        Ok(scheme) => scheme,
        Err(err) => {
            warn!(correlation_id = %correlation_id, scheme_id = %id, error = %err, "Scheme update failed");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let updated = request.apply_to(&existing);
    if let Err(err) = updated.validate() {
        warn!(
            correlation_id = %correlation_id,
            scheme_id = %id,
            error = %err,
            "Scheme update rejected by authoring rules"
        );
        return ApiErrorResponse::from(err).into_response();
    }

    match state.store().replace_scheme(updated).await {
        Ok(scheme) => {
            info!(correlation_id = %correlation_id, scheme_id = %scheme.id, "Updated scheme");
            Json(scheme).into_response()
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for DELETE /api/schemes/{id}.
///
/// Removes the scheme and flags its applications for review.
pub(super) async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store().delete_scheme(&id).await {
        Ok(()) => {
            info!(scheme_id = %id, "Deleted scheme");
            Json(MessageResponse::ok()).into_response()
        }
        Err(err) => {
            warn!(scheme_id = %id, error = %err, "Scheme deletion failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}
