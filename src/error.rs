//! Error types for the scheme engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The eligibility decision itself never fails, since it reduces every input
//! to a boolean, so these errors cover the surrounding service surface:
//! record lookup, scheme authoring rules, and uniqueness conflicts.

use thiserror::Error;

/// The main error type for the scheme engine.
///
/// # Example
///
/// ```
/// use scheme_engine::error::EngineError;
///
/// let error = EngineError::ApplicantNotFound {
///     id: "missing".to_string(),
/// };
/// assert_eq!(error.to_string(), "Applicant not found: missing");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No applicant exists with the given identifier.
    #[error("Applicant not found: {id}")]
    ApplicantNotFound {
        /// The applicant identifier that was not found.
        id: String,
    },

    /// No scheme exists with the given identifier.
    #[error("Scheme not found: {id}")]
    SchemeNotFound {
        /// The scheme identifier that was not found.
        id: String,
    },

    /// No application exists with the given identifier.
    #[error("Application not found: {id}")]
    ApplicationNotFound {
        /// The application identifier that was not found.
        id: String,
    },

    /// A scheme with the same name already exists.
    #[error("Scheme with the same name already exists: {name}")]
    DuplicateSchemeName {
        /// The conflicting scheme name.
        name: String,
    },

    /// The applicant has already applied for the scheme.
    #[error("Applicant '{applicant_id}' has already applied for scheme '{scheme_id}'")]
    DuplicateApplication {
        /// The applicant identifier.
        applicant_id: String,
        /// The scheme identifier.
        scheme_id: String,
    },

    /// A scheme definition violated an authoring rule.
    #[error("Invalid scheme: {message}")]
    InvalidScheme {
        /// A description of the violated rule.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
