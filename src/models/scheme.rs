//! Scheme, criteria group, and criterion models.
//!
//! A scheme is eligible for an applicant when all of its criteria groups are
//! satisfied; within a group, satisfying any single criterion is enough. Each
//! criterion dimension is a closed rule enumeration with an explicit `Any`
//! wildcard, so the unconstrained value can never collide with a legitimate
//! category carried by a person.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::applicant::{EmploymentStatus, MaritalStatus, Relation, Sex};

/// Upper bound used when a criterion leaves its age range unconstrained.
pub const UNBOUNDED_AGE: u32 = 999;

/// Employment status constraint of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentRule {
    /// No constraint on employment status.
    Any,
    /// The person must be unemployed.
    Unemployed,
    /// The person must be employed.
    Employed,
    /// The person must be in school.
    InSchool,
}

impl EmploymentRule {
    /// Returns true if the given employment status satisfies this rule.
    pub fn allows(self, status: EmploymentStatus) -> bool {
        match self {
            EmploymentRule::Any => true,
            EmploymentRule::Unemployed => status == EmploymentStatus::Unemployed,
            EmploymentRule::Employed => status == EmploymentStatus::Employed,
            EmploymentRule::InSchool => status == EmploymentStatus::InSchool,
        }
    }
}

/// Sex constraint of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SexRule {
    /// No constraint on sex.
    Any,
    /// The person must be male.
    Male,
    /// The person must be female.
    Female,
}

impl SexRule {
    /// Returns true if the given sex satisfies this rule.
    pub fn allows(self, sex: Sex) -> bool {
        match self {
            SexRule::Any => true,
            SexRule::Male => sex == Sex::Male,
            SexRule::Female => sex == Sex::Female,
        }
    }
}

/// Marital status constraint of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalRule {
    /// No constraint on marital status.
    Any,
    /// The person must be single.
    Single,
    /// The person must be married.
    Married,
    /// The person must be widowed.
    Widowed,
    /// The person must be divorced.
    Divorced,
}

impl MaritalRule {
    /// Returns true if the given marital status satisfies this rule.
    pub fn allows(self, status: MaritalStatus) -> bool {
        match self {
            MaritalRule::Any => true,
            MaritalRule::Single => status == MaritalStatus::Single,
            MaritalRule::Married => status == MaritalStatus::Married,
            MaritalRule::Widowed => status == MaritalStatus::Widowed,
            MaritalRule::Divorced => status == MaritalStatus::Divorced,
        }
    }
}

/// Relation constraint of a criterion.
///
/// Only consulted when the criterion is matched against a household member;
/// applicants carry no relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationRule {
    /// No constraint on relation.
    Any,
    /// The member must be a child of the applicant.
    Child,
    /// The member must be the applicant's spouse.
    Spouse,
    /// The member must be a parent of the applicant.
    Parent,
}

impl RelationRule {
    /// Returns true if the given relation satisfies this rule.
    pub fn allows(self, relation: Relation) -> bool {
        match self {
            RelationRule::Any => true,
            RelationRule::Child => relation == Relation::Child,
            RelationRule::Spouse => relation == Relation::Spouse,
            RelationRule::Parent => relation == Relation::Parent,
        }
    }
}

fn default_age_upper_limit() -> u32 {
    UNBOUNDED_AGE
}

/// An atomic eligibility predicate over one person's attributes.
///
/// A criterion constrains five independent dimensions: an inclusive age
/// range, employment status, sex, marital status, and (for household
/// members) relation to the applicant. The `is_household` flag marks whether
/// the criterion targets the applicant or a household member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// Unique identifier for the criterion.
    pub id: String,
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
    /// True when the criterion targets a household member rather than the
    /// applicant.
    pub is_household: bool,
}

/// A set of criteria combined with OR semantics.
///
/// A group is satisfied when any one of its criteria matches an eligible
/// candidate: the applicant for the applicant-scoped group, one unused
/// household member for a household-scoped group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaGroup {
    /// Unique identifier for the group.
    pub id: String,
    /// The criteria in this group.
    pub criteria: Vec<Criterion>,
}

/// A benefit payable under a scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    /// Unique identifier for the benefit.
    pub id: String,
    /// The benefit's name.
    pub name: String,
    /// The payable amount.
    pub amount: Decimal,
}

/// A named benefit program with eligibility rules and payable benefits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    /// Unique identifier for the scheme.
    pub id: String,
    /// The scheme's name, unique across schemes.
    pub name: String,
    /// The criteria groups combined with AND semantics.
    pub criteria_groups: Vec<CriteriaGroup>,
    /// The benefits payable under this scheme.
    pub benefits: Vec<Benefit>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Scheme {
    /// Checks the scheme against the authoring rules.
    ///
    /// A well-formed scheme has at least one criteria group, at least one
    /// benefit, and no empty criteria group. At most one group may contain
    /// applicant criteria, and that group must not mix in household criteria.
    /// The eligibility engine assumes these rules hold but never re-checks
    /// them.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidScheme`] naming the first violated rule.
    pub fn validate(&self) -> EngineResult<()> {
        if self.criteria_groups.is_empty() {
            return Err(EngineError::InvalidScheme {
                message: "a scheme must have at least one criteria group".to_string(),
            });
        }
        if self.benefits.is_empty() {
            return Err(EngineError::InvalidScheme {
                message: "a scheme must have at least one benefit".to_string(),
            });
        }
        for group in &self.criteria_groups {
            if group.criteria.is_empty() {
                return Err(EngineError::InvalidScheme {
                    message: "a scheme's criteria group must have at least one criterion"
                        .to_string(),
                });
            }
        }

        let applicant_groups: Vec<&CriteriaGroup> = self
            .criteria_groups
            .iter()
            .filter(|group| group.criteria.iter().any(|c| !c.is_household))
            .collect();

        if applicant_groups.len() > 1 {
            return Err(EngineError::InvalidScheme {
                message: "a scheme can only have one criteria group with applicant criteria"
                    .to_string(),
            });
        }
        if let Some(group) = applicant_groups.first() {
            if group.criteria.iter().any(|c| c.is_household) {
                return Err(EngineError::InvalidScheme {
                    message: "the applicant criteria group cannot contain household criteria"
                        .to_string(),
                });
            }
        }
        Ok(())
    }
}
