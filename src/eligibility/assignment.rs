//! Backtracking assignment of household members to criteria groups.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::eligibility::matcher::{PersonProfile, criterion_matches};
use crate::models::{CriteriaGroup, HouseholdMember};

/// Searches for an injective assignment of household members to groups.
///
/// Returns true iff there is a way to bind one distinct member to each group
/// such that every bound member satisfies at least one criterion of its
/// group. The search is depth-first over group index, trying members and
/// their criteria in the given order and undoing a tentative binding as soon
/// as it cannot be extended. The first complete assignment found wins, so the
/// result is deterministic for deterministic input ordering.
///
/// With zero groups the assignment is vacuously complete and the result is
/// true. The used-member set is local to this call; the inputs are never
/// mutated.
///
/// The worst case explores member permutations per group, which is acceptable
/// for the single-digit household and group counts of this domain.
pub fn assign_members(
    groups: &[&CriteriaGroup],
    members: &[HouseholdMember],
    today: NaiveDate,
) -> bool {
    let mut used: HashSet<&str> = HashSet::with_capacity(members.len());
    assign_from(groups, members, today, &mut used, 0)
}

fn assign_from<'a>(
    groups: &[&CriteriaGroup],
    members: &'a [HouseholdMember],
    today: NaiveDate,
    used: &mut HashSet<&'a str>,
    index: usize,
) -> bool {
    if index >= groups.len() {
        return true;
    }

    for member in members {
        if used.contains(member.id.as_str()) {
            continue;
        }
        let profile = PersonProfile::of_member(member, today);
        for criterion in &groups[index].criteria {
            if criterion_matches(criterion, &profile) {
                used.insert(member.id.as_str());
                if assign_from(groups, members, today, used, index + 1) {
                    return true;
                }
                // Backtrack and keep trying this member's other criteria,
                // then the remaining members.
                used.remove(member.id.as_str());
            }
        }
    }

    false
}
