//! Criterion matching against a person's derived attributes.

use chrono::NaiveDate;

use crate::eligibility::age::derive_age;
use crate::models::{
    Applicant, Criterion, EmploymentStatus, HouseholdMember, MaritalStatus, Relation, Sex,
};

/// A person's attributes as seen by the matcher, with age already derived.
///
/// Built fresh at evaluation time from an [`Applicant`] or a
/// [`HouseholdMember`]; the relation is present only for household members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonProfile {
    /// Age in whole years at the evaluation date.
    pub age: u32,
    /// Employment status.
    pub employment_status: EmploymentStatus,
    /// Sex.
    pub sex: Sex,
    /// Marital status.
    pub marital_status: MaritalStatus,
    /// Relation to the applicant, for household members only.
    pub relation: Option<Relation>,
}

impl PersonProfile {
    /// Derives the profile of an applicant at the given date.
    pub fn of_applicant(applicant: &Applicant, today: NaiveDate) -> Self {
        Self {
            age: derive_age(applicant.date_of_birth, today),
            employment_status: applicant.employment_status,
            sex: applicant.sex,
            marital_status: applicant.marital_status,
            relation: None,
        }
    }

    /// Derives the profile of a household member at the given date.
    pub fn of_member(member: &HouseholdMember, today: NaiveDate) -> Self {
        Self {
            age: derive_age(member.date_of_birth, today),
            employment_status: member.employment_status,
            sex: member.sex,
            marital_status: member.marital_status,
            relation: Some(member.relation),
        }
    }
}

/// Evaluates one criterion against one person.
///
/// Returns true iff the person's age falls within the criterion's inclusive
/// range and every categorical dimension is either unconstrained or equal to
/// the person's value. The relation dimension is consulted only when the
/// profile carries a relation, i.e. for household members. Pure function with
/// no failure path: a person that does not fit simply does not match.
pub fn criterion_matches(criterion: &Criterion, person: &PersonProfile) -> bool {
    person.age >= criterion.age_lower_limit
        && person.age <= criterion.age_upper_limit
        && criterion.employment_status.allows(person.employment_status)
        && criterion.sex.allows(person.sex)
        && criterion.marital_status.allows(person.marital_status)
        && person
            .relation
            .is_none_or(|relation| criterion.relation.allows(relation))
}
