//! Top-level eligibility decision.

use chrono::NaiveDate;

use crate::eligibility::assignment::assign_members;
use crate::eligibility::classifier::classify_groups;
use crate::eligibility::matcher::{PersonProfile, criterion_matches};
use crate::models::{Applicant, Scheme};

/// Decides whether an applicant is eligible for a scheme at the given date.
///
/// A scheme with no criteria groups admits everyone. Otherwise the groups are
/// classified by scope; the applicant must match at least one criterion of
/// the applicant-scoped group (trivially satisfied when no such group
/// exists), and the household-scoped groups must each be bound to a distinct
/// household member via [`assign_members`]. Both parts must hold.
///
/// Pure function: no side effects, no mutation of the inputs, and no failure
/// path. Missing or unmatched data simply yields false.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use scheme_engine::eligibility::decide;
/// # use chrono::NaiveDate;
/// # use scheme_engine::models::*;
/// # let applicant = Applicant {
/// #     id: "app_001".into(), name: "Jon".into(),
/// #     employment_status: EmploymentStatus::Unemployed, sex: Sex::Male,
/// #     marital_status: MaritalStatus::Single,
/// #     date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
/// #     households: vec![], created_at: Utc::now(), updated_at: Utc::now(),
/// # };
/// # let scheme = Scheme {
/// #     id: "sch_001".into(), name: "Open scheme".into(),
/// #     criteria_groups: vec![], benefits: vec![],
/// #     created_at: Utc::now(), updated_at: Utc::now(),
/// # };
///
/// // A scheme without criteria groups admits every applicant.
/// assert!(decide(&applicant, &scheme, Utc::now().date_naive()));
/// ```
pub fn decide(applicant: &Applicant, scheme: &Scheme, today: NaiveDate) -> bool {
    if scheme.criteria_groups.is_empty() {
        return true;
    }

    let classified = classify_groups(&scheme.criteria_groups);

    let applicant_ok = match classified.applicant_group {
        None => true,
        Some(group) => {
            let profile = PersonProfile::of_applicant(applicant, today);
            group
                .criteria
                .iter()
                .any(|criterion| criterion_matches(criterion, &profile))
        }
    };

    let household_ok = assign_members(&classified.household_groups, &applicant.households, today);

    applicant_ok && household_ok
}
