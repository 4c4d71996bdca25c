//! Shared validation helpers for inbound HTTP adapters.

use chrono::NaiveDate;
use serde_json::{Map, Value, json};

use crate::domain::{Email, Error, UserValidationError, parse_iso_date};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidEmail,
    InvalidDate,
    NotPast,
    InvalidRange,
    BlankValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::NotPast => "not_past",
            ErrorCode::InvalidRange => "invalid_range",
            ErrorCode::BlankValue => "blank",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Map a record validation failure onto the HTTP error payload.
pub(crate) fn user_validation_error(err: &UserValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

/// Parse the `{email}` path segment.
pub(crate) fn parse_path_email(value: String, field: FieldName) -> Result<Email, Error> {
    Email::new(value.as_str()).map_err(|err| {
        ValidationError::new(field.as_str(), err.to_string())
            .with_value(ErrorCode::InvalidEmail, value)
    })
}

/// Parse a required ISO date lying strictly before `today`.
pub(crate) fn parse_past_date(
    value: Option<String>,
    field: FieldName,
    today: NaiveDate,
) -> Result<NaiveDate, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    let name = field.as_str();
    let date = parse_iso_date(&raw).ok_or_else(|| {
        ValidationError::new(name, format!("{name} must be an ISO date (YYYY-MM-DD)"))
            .with_value(ErrorCode::InvalidDate, raw.as_str())
    })?;
    if date >= today {
        return Err(ValidationError::new(name, format!("{name} must be in the past"))
            .with_value(ErrorCode::NotPast, raw));
    }
    Ok(date)
}

/// Reject an inverted date range.
pub(crate) fn ensure_ordered_range(
    from: NaiveDate,
    to: NaiveDate,
    field: FieldName,
) -> Result<(), Error> {
    if from > to {
        return Err(ValidationError::new(field.as_str(), "Invalid date range")
            .with_code(ErrorCode::InvalidRange));
    }
    Ok(())
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

/// Require every patch value to be non-null and non-blank.
pub(crate) fn ensure_patch_values_present(fields: &Map<String, Value>) -> Result<(), Error> {
    match fields.iter().find(|(_, value)| is_blank(value)) {
        Some((key, _)) => Err(ValidationError::new(
            key.as_str(),
            format!("Invalid field {key} value. Value can't be null or blank"),
        )
        .with_code(ErrorCode::BlankValue)),
        None => Ok(()),
    }
}
