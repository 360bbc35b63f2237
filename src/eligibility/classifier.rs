//! Classification of criteria groups by scope.

use tracing::warn;

use crate::models::CriteriaGroup;

/// The outcome of classifying a scheme's criteria groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedGroups<'a> {
    /// The applicant-scoped group, if one exists.
    pub applicant_group: Option<&'a CriteriaGroup>,
    /// The household-scoped groups, in scheme order.
    pub household_groups: Vec<&'a CriteriaGroup>,
}

/// Partitions criteria groups into applicant-scoped and household-scoped.
///
/// A group is household-scoped iff every criterion in it targets a household
/// member (vacuously true for an empty group); any other group is
/// applicant-scoped. Scheme authoring guarantees at most one applicant-scoped
/// group; should several slip through anyway, only the last one encountered is
/// kept and the earlier candidates are dropped from consideration entirely.
// TODO: dropping earlier applicant-scoped candidates mirrors the historical
// behavior; revisit whether multiple candidates should be rejected outright
// once authoring-time validation is the only write path.
pub fn classify_groups(groups: &[CriteriaGroup]) -> ClassifiedGroups<'_> {
    let mut household_groups = Vec::new();
    let mut applicant_candidates = Vec::new();

    for group in groups {
        if group.criteria.iter().all(|criterion| criterion.is_household) {
            household_groups.push(group);
        } else {
            applicant_candidates.push(group);
        }
    }

    if applicant_candidates.len() > 1 {
        warn!(
            candidates = applicant_candidates.len(),
            "multiple applicant-scoped criteria groups; keeping only the last"
        );
    }

    ClassifiedGroups {
        applicant_group: applicant_candidates.pop(),
        household_groups,
    }
}
