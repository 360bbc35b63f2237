//! Request types for the scheme engine API.
//!
//! This module defines the JSON payload and query structures for the CRUD
//! endpoints, along with their conversions into domain models. Identifier
//! generation lives here: creation always mints fresh UUIDs, while update
//! payloads may carry ids for nested records so existing rows keep their
//! identity across a replace.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    Applicant, Application, ApplicationStatus, Benefit, CriteriaGroup, Criterion, EmploymentRule,
    EmploymentStatus, HouseholdMember, MaritalRule, MaritalStatus, Relation, RelationRule, Scheme,
    Sex, SexRule, UNBOUNDED_AGE,
};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_age_upper_limit() -> u32 {
    UNBOUNDED_AGE
}

/// Pagination query parameters shared by the list endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageQuery {
    /// Zero-based page index.
    #[serde(default)]
    pub page: usize,
    /// Number of records per page; zero falls back to the default of 10.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: default_page_size(),
        }
    }
}

impl PageQuery {
    /// Records per page with the zero fallback applied.
    pub fn limit(&self) -> usize {
        if self.page_size == 0 {
            default_page_size()
        } else {
            self.page_size
        }
    }

    /// Number of records to skip before this page.
    ///
    /// Saturates instead of overflowing, so an absurdly large page index
    /// yields an empty page rather than a panic.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.limit())
    }
}

/// Query parameters of the eligible-schemes endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibleSchemesQuery {
    /// The applicant to evaluate all schemes against.
    pub applicant: String,
    /// Zero-based page index.
    #[serde(default)]
    pub page: usize,
    /// Number of records per page; zero falls back to the default of 10.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl EligibleSchemesQuery {
    /// The pagination portion of the query.
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// A household member in an applicant payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdPayload {
    /// Existing member id; omitted for new members.
    #[serde(default)]
    pub id: Option<String>,
    /// The member's name.
    pub name: String,
    /// The member's employment status.
    pub employment_status: EmploymentStatus,
    /// The member's sex.
    pub sex: Sex,
    /// The member's marital status.
    pub marital_status: MaritalStatus,
    /// The member's date of birth.
    pub date_of_birth: NaiveDate,
    /// The member's relation to the applicant.
    pub relation: Relation,
}

impl HouseholdPayload {
    fn into_member(self) -> HouseholdMember {
        HouseholdMember {
            id: self.id.unwrap_or_else(new_id),
            name: self.name,
            employment_status: self.employment_status,
            sex: self.sex,
            marital_status: self.marital_status,
            date_of_birth: self.date_of_birth,
            relation: self.relation,
        }
    }
}

/// An applicant definition used by both create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantPayload {
    /// The applicant's name.
    pub name: String,
    /// The applicant's employment status.
    pub employment_status: EmploymentStatus,
    /// The applicant's sex.
    pub sex: Sex,
    /// The applicant's marital status.
    pub marital_status: MaritalStatus,
    /// The applicant's date of birth.
    pub date_of_birth: NaiveDate,
    /// The members of the applicant's household.
    #[serde(default)]
    pub households: Vec<HouseholdPayload>,
}

impl ApplicantPayload {
    /// Builds a new applicant with freshly generated identifiers.
    pub fn into_applicant(self) -> Applicant {
        let now = Utc::now();
        Applicant {
            id: new_id(),
            name: self.name,
            employment_status: self.employment_status,
            sex: self.sex,
            marital_status: self.marital_status,
            date_of_birth: self.date_of_birth,
            households: self
                .households
                .into_iter()
                .map(HouseholdPayload::into_member)
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds the replacement for an existing applicant.
    ///
    /// The applicant keeps its identity and creation time. Household members
    /// carrying an id keep it; members without one are minted a fresh id;
    /// existing members absent from the payload are dropped.
    pub fn apply_to(self, existing: &Applicant) -> Applicant {
        Applicant {
            id: existing.id.clone(),
            name: self.name,
            employment_status: self.employment_status,
            sex: self.sex,
            marital_status: self.marital_status,
            date_of_birth: self.date_of_birth,
            households: self
                .households
                .into_iter()
                .map(HouseholdPayload::into_member)
                .collect(),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        }
    }
}

/// Request body for bulk applicant creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApplicantsRequest {
    /// The applicants to create.
    pub applicants: Vec<ApplicantPayload>,
}

/// A criterion in a scheme payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionPayload {
    /// Existing criterion id; omitted for new criteria.
    #[serde(default)]
    pub id: Option<String>,
    /// Employment status constraint.
    pub employment_status: EmploymentRule,
    /// Sex constraint.
    pub sex: SexRule,
    /// Marital status constraint.
    pub marital_status: MaritalRule,
    /// Inclusive lower bound of the age range.
    #[serde(default)]
    pub age_lower_limit: u32,
    /// Inclusive upper bound of the age range.
    #[serde(default = "default_age_upper_limit")]
    pub age_upper_limit: u32,
    /// Relation constraint, consulted for household members only.
    pub relation: RelationRule,
    /// True when the criterion targets a household member.
    pub is_household: bool,
}

impl CriterionPayload {
    fn into_criterion(self) -> Criterion {
        Criterion {
            id: self.id.unwrap_or_else(new_id),
            employment_status: self.employment_status,
            sex: self.sex,
            marital_status: self.marital_status,
            age_lower_limit: self.age_lower_limit,
            age_upper_limit: self.age_upper_limit,
            relation: self.relation,
            is_household: self.is_household,
        }
    }
}

/// A criteria group in a scheme payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaGroupPayload {
    /// Existing group id; omitted for new groups.
    #[serde(default)]
    pub id: Option<String>,
    /// The criteria in this group.
    pub criteria: Vec<CriterionPayload>,
}

impl CriteriaGroupPayload {
    fn into_group(self) -> CriteriaGroup {
        CriteriaGroup {
            id: self.id.unwrap_or_else(new_id),
            criteria: self
                .criteria
                .into_iter()
                .map(CriterionPayload::into_criterion)
                .collect(),
        }
    }
}

/// A benefit in a scheme payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitPayload {
    /// Existing benefit id; omitted for new benefits.
    #[serde(default)]
    pub id: Option<String>,
    /// The benefit's name.
    pub name: String,
    /// The payable amount.
    pub amount: Decimal,
}

impl BenefitPayload {
    fn into_benefit(self) -> Benefit {
        Benefit {
            id: self.id.unwrap_or_else(new_id),
            name: self.name,
            amount: self.amount,
        }
    }
}

/// A scheme definition used by both create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemePayload {
    /// The scheme's name.
    pub name: String,
    /// The criteria groups combined with AND semantics.
    pub criteria_groups: Vec<CriteriaGroupPayload>,
    /// The benefits payable under this scheme.
    pub benefits: Vec<BenefitPayload>,
}

impl SchemePayload {
    /// Builds a new scheme with freshly generated identifiers.
    pub fn into_scheme(self) -> Scheme {
        let now = Utc::now();
        Scheme {
            id: new_id(),
            name: self.name,
            criteria_groups: self
                .criteria_groups
                .into_iter()
                .map(CriteriaGroupPayload::into_group)
                .collect(),
            benefits: self
                .benefits
                .into_iter()
                .map(BenefitPayload::into_benefit)
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds the replacement for an existing scheme.
    ///
    /// The scheme keeps its identity and creation time; nested records keep
    /// ids they carry and are minted fresh ones otherwise. Existing nested
    /// records absent from the payload are dropped.
    pub fn apply_to(self, existing: &Scheme) -> Scheme {
        let replacement = self.into_scheme();
        Scheme {
            id: existing.id.clone(),
            created_at: existing.created_at,
            updated_at: Utc::now(),
            ..replacement
        }
    }
}

/// Request body for bulk scheme creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSchemesRequest {
    /// The schemes to create.
    pub schemes: Vec<SchemePayload>,
}

/// Request body for creating an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApplicationRequest {
    /// The applying applicant's identifier.
    pub applicant_id: String,
    /// The applied-for scheme's identifier.
    pub scheme_id: String,
}

impl CreateApplicationRequest {
    /// Builds the submitted application for this request.
    pub fn into_application(self) -> Application {
        let now = Utc::now();
        Application {
            id: new_id(),
            applicant_id: self.applicant_id,
            scheme_id: self.scheme_id,
            status: ApplicationStatus::Submitted,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for updating an application's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationRequest {
    /// The new lifecycle status.
    pub status: ApplicationStatus,
}
