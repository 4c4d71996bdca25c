//! Port abstraction for the user store and its errors.

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::domain::{Email, Error, User};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user store operations.
    pub enum UserRepositoryError {
        /// A field value is malformed, out of range or not patchable.
        Validation { field: String, code: String, message: String } => "{message}",
        /// Another record already holds this email.
        Conflict { email: String } => "user with email {email} already exists",
        /// No record holds this email.
        NotFound { email: String } => "user with email {email} not found",
        /// The store could not serve the request.
        Unavailable { message: String } => "user store unavailable: {message}",
    }
}

impl From<UserRepositoryError> for Error {
    fn from(value: UserRepositoryError) -> Self {
        let message = value.to_string();
        match value {
            UserRepositoryError::Validation { field, code, .. } => Self::invalid_request(message)
                .with_details(json!({ "field": field, "code": code })),
            UserRepositoryError::Conflict { email } => {
                Self::conflict(message).with_details(json!({ "email": email }))
            }
            UserRepositoryError::NotFound { email } => {
                Self::not_found(message).with_details(json!({ "email": email }))
            }
            UserRepositoryError::Unavailable { .. } => Self::internal(message),
        }
    }
}

/// Ordered, email-keyed collection of users.
///
/// Implementations keep insertion order and email uniqueness.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in insertion order.
    async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Append a new user.
    ///
    /// Fails with `Validation` when the birth date breaks the age rule and
    /// with `Conflict` when the email is already taken.
    async fn create(&self, user: User) -> Result<User, UserRepositoryError>;

    /// Replace the user holding `user.email()` in place.
    async fn replace(&self, user: User) -> Result<User, UserRepositoryError>;

    /// Merge `fields` into the user holding `email`.
    ///
    /// Keys are matched case-insensitively against the patchable fields.
    /// Either every entry applies or the stored record is left unchanged.
    async fn partial_update(
        &self,
        email: &Email,
        fields: &Map<String, Value>,
    ) -> Result<User, UserRepositoryError>;

    /// Remove the user holding `email`.
    async fn delete_by_email(&self, email: &Email) -> Result<(), UserRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn validation_maps_to_invalid_request_with_field_details() {
        let err = Error::from(UserRepositoryError::validation(
            "birthDate",
            "under_age",
            "User must be at least 18 years old",
        ));
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "User must be at least 18 years old");
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "birthDate", "code": "under_age" }))
        );
    }

    #[rstest]
    #[case(UserRepositoryError::conflict("a@b.io"), ErrorCode::Conflict)]
    #[case(UserRepositoryError::not_found("a@b.io"), ErrorCode::NotFound)]
    fn key_failures_keep_their_discriminant(
        #[case] source: UserRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let err = Error::from(source);
        assert_eq!(err.code(), expected);
        assert_eq!(err.details(), Some(&json!({ "email": "a@b.io" })));
    }

    #[rstest]
    fn unavailable_maps_to_internal_error() {
        let err = Error::from(UserRepositoryError::unavailable("lock poisoned"));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.details().is_none());
    }
}
