//! In-memory user store.
//!
//! One mutex guards the whole collection. Operation bodies are short and
//! never await while holding the lock.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::ports::{UserRepository, UserRepositoryError};
use super::user_patch::{PatchContext, apply_patch, under_age_error};
use super::{AgePolicy, Email, User};

/// Process-lifetime user store keeping insertion order.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use user_directory::domain::{AgePolicy, InMemoryUserStore};
///
/// let store = InMemoryUserStore::new(AgePolicy::new(18), Arc::new(DefaultClock));
/// assert_eq!(store.policy().min_age(), 18);
/// ```
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    policy: AgePolicy,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserStore {
    /// Build an empty store.
    pub fn new(policy: AgePolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            policy,
            clock,
        }
    }

    /// Age rule enforced on writes.
    #[must_use]
    pub const fn policy(&self) -> AgePolicy {
        self.policy
    }

    fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, UserRepositoryError> {
        self.users
            .lock()
            .map_err(|_| UserRepositoryError::unavailable("user store lock poisoned"))
    }

    fn ensure_eligible(&self, user: &User) -> Result<(), UserRepositoryError> {
        if self.policy.is_eligible(user.birth_date().date(), self.today()) {
            Ok(())
        } else {
            Err(under_age_error(self.policy))
        }
    }
}

fn position_of(users: &[User], email: &Email) -> Option<usize> {
    users.iter().position(|user| user.email() == email)
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.lock()?.clone())
    }

    async fn create(&self, user: User) -> Result<User, UserRepositoryError> {
        self.ensure_eligible(&user)?;
        let mut users = self.lock()?;
        if position_of(&users, user.email()).is_some() {
            return Err(UserRepositoryError::conflict(user.email().as_ref()));
        }
        users.push(user.clone());
        info!(email = %user.email(), total = users.len(), "user created");
        Ok(user)
    }

    async fn replace(&self, user: User) -> Result<User, UserRepositoryError> {
        let mut users = self.lock()?;
        let slot = users
            .iter_mut()
            .find(|existing| existing.email() == user.email())
            .ok_or_else(|| UserRepositoryError::not_found(user.email().as_ref()))?;
        self.ensure_eligible(&user)?;
        *slot = user.clone();
        info!(email = %user.email(), "user replaced");
        Ok(user)
    }

    async fn partial_update(
        &self,
        email: &Email,
        fields: &Map<String, Value>,
    ) -> Result<User, UserRepositoryError> {
        let ctx = PatchContext {
            today: self.today(),
            policy: self.policy,
        };
        let mut users = self.lock()?;
        let index = position_of(&users, email)
            .ok_or_else(|| UserRepositoryError::not_found(email.as_ref()))?;
        let current = users
            .get(index)
            .ok_or_else(|| UserRepositoryError::not_found(email.as_ref()))?;
        let patched = apply_patch(current, fields, ctx)?;

        if patched.email() != email && position_of(&users, patched.email()).is_some() {
            return Err(UserRepositoryError::conflict(patched.email().as_ref()));
        }
        if let Some(slot) = users.get_mut(index) {
            *slot = patched.clone();
        }
        debug!(
            email = %email,
            fields = ?fields.keys().collect::<Vec<_>>(),
            "user patched"
        );
        Ok(patched)
    }

    async fn delete_by_email(&self, email: &Email) -> Result<(), UserRepositoryError> {
        let mut users = self.lock()?;
        let index = position_of(&users, email)
            .ok_or_else(|| UserRepositoryError::not_found(email.as_ref()))?;
        users.remove(index);
        info!(email = %email, remaining = users.len(), "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
