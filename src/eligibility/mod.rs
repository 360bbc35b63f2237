//! Eligibility determination core.
//!
//! This module decides whether an applicant qualifies for a scheme. It is a
//! pure, synchronous computation over already-loaded records: criteria groups
//! are classified by scope, the applicant-scoped group is evaluated with OR
//! semantics, household-scoped groups are bound to distinct household members
//! by a backtracking search, and the results are combined with AND. The
//! engine holds no state, performs no I/O, and reduces every input to a
//! boolean.

mod age;
mod assignment;
mod classifier;
mod decision;
mod matcher;

pub use age::derive_age;
pub use assignment::assign_members;
pub use classifier::{ClassifiedGroups, classify_groups};
pub use decision::decide;
pub use matcher::{PersonProfile, criterion_matches};
