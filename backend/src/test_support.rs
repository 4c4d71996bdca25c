//! Shared fixtures for unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests and behind the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{AgePolicy, InMemoryUserStore, User, UserDraft};

/// Calendar date every fixture treats as "today".
#[must_use]
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_else(|| panic!("valid fixture date"))
}

/// Clock pinned to noon UTC of a settable day.
///
/// Noon keeps the local calendar date equal to the UTC one for every
/// timezone within twelve hours of UTC.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Clock reading noon on `today`.
    #[must_use]
    pub fn on(today: NaiveDate) -> Self {
        Self(Mutex::new(noon_utc(today)))
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

fn noon_utc(date: NaiveDate) -> DateTime<Utc> {
    let naive = date
        .and_hms_opt(12, 0, 0)
        .unwrap_or_else(|| panic!("noon exists on {date}"));
    Utc.from_utc_datetime(&naive)
}

/// Wire form of the canonical fixture user.
#[must_use]
pub fn jim_smith_draft() -> UserDraft {
    UserDraft {
        email: "test@test.com".to_owned(),
        first_name: "Jim".to_owned(),
        last_name: "Smith".to_owned(),
        birth_date: "2000-01-01".to_owned(),
        address: "Street".to_owned(),
        phone: "123456789".to_owned(),
    }
}

/// Canonical fixture user, born 2000-01-01.
#[must_use]
pub fn jim_smith() -> User {
    jim_smith_draft()
        .validate(fixed_today())
        .unwrap_or_else(|err| panic!("fixture user must be valid: {err}"))
}

/// Fixture user with a different email.
#[must_use]
pub fn user_with_email(email: &str) -> User {
    UserDraft {
        email: email.to_owned(),
        ..jim_smith_draft()
    }
    .validate(fixed_today())
    .unwrap_or_else(|err| panic!("fixture user must be valid: {err}"))
}

/// Empty store enforcing `min_age`, reading time from `clock`.
#[must_use]
pub fn store_with_clock(min_age: u32, clock: Arc<MutableClock>) -> InMemoryUserStore {
    InMemoryUserStore::new(AgePolicy::new(min_age), clock)
}

/// Empty store enforcing `min_age` on [`fixed_today`].
#[must_use]
pub fn store(min_age: u32) -> InMemoryUserStore {
    store_with_clock(min_age, Arc::new(MutableClock::on(fixed_today())))
}
