//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and live in the inbound adapter
//! where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The email is already held by another user.
    #[schema(rename = "conflict")]
    Conflict,
    /// No user holds the requested email.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "user with email test@test.com not found")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending `field` and a detail `code`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Unique key.
    #[schema(example = "test@test.com")]
    email: String,
    /// Given name, at most 50 characters.
    #[schema(example = "Jim", max_length = 50)]
    first_name: String,
    /// Family name, at most 50 characters.
    #[schema(example = "Smith", max_length = 50)]
    last_name: String,
    /// ISO date strictly in the past.
    #[schema(value_type = String, format = Date, example = "2000-01-01")]
    birth_date: String,
    /// Postal address.
    #[schema(example = "Street")]
    address: String,
    /// Digits with an optional leading `+`.
    #[schema(example = "123456789", pattern = r"^\+?[0-9]+$")]
    phone: String,
}

/// OpenAPI schema for the partial update body of `PUT /api/user/{email}`.
///
/// Every property is optional; names match case-insensitively.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserPatch)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserPatchSchema {
    /// New email; must not be held by another user.
    email: Option<String>,
    /// New given name.
    first_name: Option<String>,
    /// New family name.
    last_name: Option<String>,
    /// New birth date; must satisfy the minimum age.
    #[schema(value_type = Option<String>, format = Date)]
    birth_date: Option<String>,
    /// New postal address.
    address: Option<String>,
    /// New phone number, as a string or a non-negative integer.
    phone: Option<String>,
}
