//! HTTP API module for the scheme engine.
//!
//! This module provides the REST endpoints for managing applicants, schemes,
//! and applications, and for listing the schemes an applicant is eligible
//! for. Records live in an in-memory store shared through [`AppState`].

mod handlers;
mod request;
mod response;
mod state;
mod store;

pub use handlers::create_router;
pub use request::{
    ApplicantPayload, BenefitPayload, CreateApplicantsRequest, CreateApplicationRequest,
    CreateSchemesRequest, CriteriaGroupPayload, CriterionPayload, EligibleSchemesQuery,
    HouseholdPayload, PageQuery, SchemePayload, UpdateApplicationRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, ApplicantListResponse, ApplicationListResponse, ApplicationView,
    MessageResponse, SchemeListResponse,
};
pub use state::AppState;
pub use store::Store;
