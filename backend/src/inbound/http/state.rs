//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;

use crate::domain::ports::UserRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Construct state from the user store and the clock used for date rules.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use user_directory::domain::{AgePolicy, InMemoryUserStore};
    /// use user_directory::inbound::http::state::HttpState;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let store = Arc::new(InMemoryUserStore::new(AgePolicy::new(18), clock.clone()));
    /// let _state = HttpState::new(store, clock);
    /// ```
    pub fn new(users: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }

    /// Calendar date requests are validated against.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }
}
