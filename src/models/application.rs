//! Application model and status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted and awaiting a decision.
    Submitted,
    /// Approved.
    Approved,
    /// Rejected.
    Rejected,
    /// Needs review because the applicant or scheme changed after submission.
    NeedsReview,
}

/// An applicant's application for a scheme.
///
/// Created only after the eligibility engine admits the applicant. The
/// (applicant, scheme) pair is unique across applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Unique identifier for the application.
    pub id: String,
    /// The applying applicant's identifier.
    pub applicant_id: String,
    /// The applied-for scheme's identifier.
    pub scheme_id: String,
    /// The application's lifecycle status.
    pub status: ApplicationStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}
