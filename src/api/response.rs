//! Response types for the scheme engine API.
//!
//! This module defines the list/detail response structures and the error
//! response handling for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Applicant, Application, ApplicationStatus, Scheme};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates the rejection returned when the engine denies eligibility.
    pub fn not_eligible(applicant_id: &str, scheme_id: &str) -> Self {
        Self::with_details(
            "NOT_ELIGIBLE",
            "Applicant is not eligible for the selected scheme",
            format!(
                "Applicant '{}' does not satisfy the criteria of scheme '{}'",
                applicant_id, scheme_id
            ),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ApplicantNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("APPLICANT_NOT_FOUND", format!("Applicant not found: {}", id)),
            },
            EngineError::SchemeNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("SCHEME_NOT_FOUND", format!("Scheme not found: {}", id)),
            },
            EngineError::ApplicationNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "APPLICATION_NOT_FOUND",
                    format!("Application not found: {}", id),
                ),
            },
            EngineError::DuplicateSchemeName { name } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(
                    "DUPLICATE_SCHEME_NAME",
                    format!("Scheme with the same name already exists: {}", name),
                ),
            },
            EngineError::DuplicateApplication {
                applicant_id,
                scheme_id,
            } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "DUPLICATE_APPLICATION",
                    "Applicant has already applied for this scheme",
                    format!("applicant '{}', scheme '{}'", applicant_id, scheme_id),
                ),
            },
            EngineError::InvalidScheme { message } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new("INVALID_SCHEME", format!("Invalid scheme: {}", message)),
            },
        }
    }
}

/// One page of applicants plus the total applicant count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantListResponse {
    /// The applicants on this page.
    pub applicants: Vec<Applicant>,
    /// Total number of applicants across all pages.
    pub total: usize,
}

/// One page of schemes plus the total count.
///
/// For the eligible-schemes listing the total counts eligible schemes only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeListResponse {
    /// The schemes on this page.
    pub schemes: Vec<Scheme>,
    /// Total number of schemes across all pages.
    pub total: usize,
}

/// An application joined with its applicant and scheme records.
///
/// The joined records are `None` when the referenced applicant or scheme has
/// since been deleted; the application itself survives with a
/// `needs_review` status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationView {
    /// The application's identifier.
    pub id: String,
    /// The application's lifecycle status.
    pub status: ApplicationStatus,
    /// The applying applicant, if still on record.
    pub applicant: Option<Applicant>,
    /// The applied-for scheme, if still on record.
    pub scheme: Option<Scheme>,
}

impl ApplicationView {
    /// Builds the joined view of an application.
    pub fn new(application: &Application, applicant: Option<Applicant>, scheme: Option<Scheme>) -> Self {
        Self {
            id: application.id.clone(),
            status: application.status,
            applicant,
            scheme,
        }
    }
}

/// One page of joined applications plus the total count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListResponse {
    /// The applications on this page.
    pub applications: Vec<ApplicationView>,
    /// Total number of applications across all pages.
    pub total: usize,
}

/// Plain acknowledgement body for deletions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable acknowledgement.
    pub message: String,
}

impl MessageResponse {
    /// The standard "OK" acknowledgement.
    pub fn ok() -> Self {
        Self {
            message: "OK".to_string(),
        }
    }
}
