//! Minimum-age eligibility rule.

use chrono::NaiveDate;

/// Minimum age, in whole years, a user's birth date must satisfy.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use user_directory::domain::AgePolicy;
///
/// let policy = AgePolicy::new(18);
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
/// let born = NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date");
/// assert!(policy.is_eligible(born, today));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgePolicy {
    min_age: u32,
}

impl AgePolicy {
    /// Build a policy requiring at least `min_age` whole years.
    #[must_use]
    pub const fn new(min_age: u32) -> Self {
        Self { min_age }
    }

    /// Configured minimum age.
    #[must_use]
    pub const fn min_age(self) -> u32 {
        self.min_age
    }

    /// Whether someone born on `birth_date` is old enough on `today`.
    ///
    /// A birth date after `today` has no elapsed years and is never eligible.
    #[must_use]
    pub fn is_eligible(self, birth_date: NaiveDate, today: NaiveDate) -> bool {
        whole_years_between(birth_date, today).is_some_and(|years| years >= self.min_age)
    }
}

/// Completed calendar years from `from` to `to`, or `None` when `from` is later.
#[must_use]
pub fn whole_years_between(from: NaiveDate, to: NaiveDate) -> Option<u32> {
    to.years_since(from)
}
