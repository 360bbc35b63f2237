//! Core data models for the scheme engine.
//!
//! This module contains all the domain models used throughout the engine.

mod applicant;
mod application;
mod scheme;

pub use applicant::{Applicant, EmploymentStatus, HouseholdMember, MaritalStatus, Relation, Sex};
pub use application::{Application, ApplicationStatus};
pub use scheme::{
    Benefit, CriteriaGroup, Criterion, EmploymentRule, MaritalRule, RelationRule, Scheme, SexRule,
    UNBOUNDED_AGE,
};
