//! Handlers for the application endpoints.
//!
//! Application creation is where the eligibility engine gates the workflow:
//! an application is only recorded after the engine admits the applicant for
//! the scheme.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::request::{CreateApplicationRequest, PageQuery, UpdateApplicationRequest};
use crate::api::response::{
    ApiError, ApiErrorResponse, ApplicationListResponse, ApplicationView, MessageResponse,
};
use crate::api::state::AppState;
use crate::eligibility::decide;
use crate::error::EngineError;
use crate::models::Application;

use super::rejection_response;

async fn joined_view(state: &AppState, application: &Application) -> ApplicationView {
    let applicant = state
        .store()
        .get_applicant(&application.applicant_id)
        .await
        .ok();
    let scheme = state.store().get_scheme(&application.scheme_id).await.ok();
    ApplicationView::new(application, applicant, scheme)
}

/// Handler for GET /api/applications.
///
/// Returns one page of applications joined with their applicant and scheme
/// records.
pub(super) async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Response {
    let (records, total) = state
        .store()
        .list_applications(page.offset(), page.limit())
        .await;

    let mut applications = Vec::with_capacity(records.len());
    for record in &records {
        applications.push(joined_view(&state, record).await);
    }

    Json(ApplicationListResponse {
        applications,
        total,
    })
    .into_response()
}

/// Handler for POST /api/applications.
///
/// Rejects a repeat application with 409, a missing applicant or scheme with
/// 404, and an ineligible applicant with 403; otherwise records the
/// application as submitted.
pub(super) async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateApplicationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if state
        .store()
        .application_exists(&request.applicant_id, &request.scheme_id)
        .await
    {
        warn!(
            correlation_id = %correlation_id,
            applicant_id = %request.applicant_id,
            scheme_id = %request.scheme_id,
            "Duplicate application"
        );
        return ApiErrorResponse::from(EngineError::DuplicateApplication {
            applicant_id: request.applicant_id,
            scheme_id: request.scheme_id,
        })
        .into_response();
    }

    let applicant = match state.store().get_applicant(&request.applicant_id).await {
        Ok(applicant) => applicant,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Application creation failed");
            return ApiErrorResponse::from(err).into_response();
        }
    };
    let scheme = match state.store().get_scheme(&request.scheme_id).await {
        Ok(scheme) => scheme,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Application creation failed");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    if !decide(&applicant, &scheme, Utc::now().date_naive()) {
        info!(
            correlation_id = %correlation_id,
            applicant_id = %applicant.id,
            scheme_id = %scheme.id,
            "Applicant not eligible"
        );
        return (
            StatusCode::FORBIDDEN,
            Json(ApiError::not_eligible(&applicant.id, &scheme.id)),
        )
            .into_response();
    }

    let application = request.into_application();
    if let Err(err) = state.store().insert_application(application.clone()).await {
        return ApiErrorResponse::from(err).into_response();
    }

    info!(
        correlation_id = %correlation_id,
        application_id = %application.id,
        applicant_id = %applicant.id,
        scheme_id = %scheme.id,
        "Created application"
    );
    (
        StatusCode::CREATED,
        Json(ApplicationView::new(&application, Some(applicant), Some(scheme))),
    )
        .into_response()
}

/// Handler for PUT /api/applications/{id}.
pub(super) async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateApplicationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state
        .store()
        .update_application_status(&id, request.status)
        .await
    {
        Ok(application) => {
            info!(
                correlation_id = %correlation_id,
                application_id = %id,
                status = ?application.status,
                "Updated application"
            );
            Json(joined_view(&state, &application).await).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, application_id = %id, error = %err, "Application update failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for DELETE /api/applications/{id}.
pub(super) async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store().delete_application(&id).await {
        Ok(()) => {
            info!(application_id = %id, "Deleted application");
            Json(MessageResponse::ok()).into_response()
        }
        Err(err) => {
            warn!(application_id = %id, error = %err, "Application deletion failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}
