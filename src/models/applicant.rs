//! Applicant and household member models.
//!
//! This module defines the people the engine evaluates: the applicant who
//! applies for a scheme and the members of their household. Categorical
//! attributes are closed enumerations so that a person can never carry the
//! wildcard value reserved for criteria.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Employment status of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Not currently employed.
    Unemployed,
    /// Currently employed.
    Employed,
    /// Enrolled in an educational institution.
    InSchool,
}

/// Sex of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
}

/// Marital status of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    /// Never married.
    Single,
    /// Currently married.
    Married,
    /// Widowed.
    Widowed,
    /// Divorced.
    Divorced,
}

/// Relation of a household member to the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// A child of the applicant.
    Child,
    /// The applicant's spouse.
    Spouse,
    /// A parent of the applicant.
    Parent,
}

/// A member of an applicant's household.
///
/// Carries the same personal attributes as the applicant plus a relation to
/// the applicant. The id is unique within the household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdMember {
    /// Unique identifier for the household member.
    pub id: String,
    /// The member's name.
    pub name: String,
    /// The member's employment status.
    pub employment_status: EmploymentStatus,
    /// The member's sex.
    pub sex: Sex,
    /// The member's marital status.
    pub marital_status: MaritalStatus,
    /// The member's date of birth. Age is derived at evaluation time.
    pub date_of_birth: NaiveDate,
    /// The member's relation to the applicant.
    pub relation: Relation,
}

/// A person applying for benefit schemes, together with their household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    /// Unique identifier for the applicant.
    pub id: String,
    /// The applicant's name.
    pub name: String,
    /// The applicant's employment status.
    pub employment_status: EmploymentStatus,
    /// The applicant's sex.
    pub sex: Sex,
    /// The applicant's marital status.
    pub marital_status: MaritalStatus,
    /// The applicant's date of birth. Age is derived at evaluation time.
    pub date_of_birth: NaiveDate,
    /// The members of the applicant's household.
    #[serde(default)]
    pub households: Vec<HouseholdMember>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}
