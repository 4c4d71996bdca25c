//! Merge-patch over the fixed user schema.
//!
//! Patchable fields are listed in `FIELD_TABLE`: each entry pairs a wire
//! name with the coercion it accepts and a setter that revalidates the value
//! before storing it. Keys are matched case-insensitively; anything not in
//! the table is rejected.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::ports::UserRepositoryError;
use super::user::{
    ADDRESS_FIELD, BIRTH_DATE_FIELD, EMAIL_FIELD, FIRST_NAME_FIELD, LAST_NAME_FIELD, PHONE_FIELD,
};
use super::{Address, AgePolicy, BirthDate, Email, PersonName, Phone, User, UserValidationError};

/// Inputs the setters need besides the value itself.
#[derive(Debug, Clone, Copy)]
pub struct PatchContext {
    /// Date the patch is evaluated on.
    pub today: NaiveDate,
    /// Age rule applied to birth dates.
    pub policy: AgePolicy,
}

/// JSON types a field accepts before its own validation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coercion {
    /// JSON strings only.
    Text,
    /// JSON strings, or non-negative integers rendered as digits.
    Digits,
}

type Setter = fn(&mut User, String, PatchContext) -> Result<(), UserRepositoryError>;

/// One row of the field table.
struct FieldEntry {
    name: &'static str,
    coercion: Coercion,
    set: Setter,
}

/// Patchable user fields.
static FIELD_TABLE: [FieldEntry; 6] = [
    FieldEntry {
        name: EMAIL_FIELD,
        coercion: Coercion::Text,
        set: set_email,
    },
    FieldEntry {
        name: FIRST_NAME_FIELD,
        coercion: Coercion::Text,
        set: set_first_name,
    },
    FieldEntry {
        name: LAST_NAME_FIELD,
        coercion: Coercion::Text,
        set: set_last_name,
    },
    FieldEntry {
        name: BIRTH_DATE_FIELD,
        coercion: Coercion::Text,
        set: set_birth_date,
    },
    FieldEntry {
        name: ADDRESS_FIELD,
        coercion: Coercion::Text,
        set: set_address,
    },
    FieldEntry {
        name: PHONE_FIELD,
        coercion: Coercion::Digits,
        set: set_phone,
    },
];

/// Wire names of every patchable field.
///
/// # Examples
/// ```
/// use user_directory::domain::patchable_fields;
///
/// assert!(patchable_fields().any(|name| name == "birthDate"));
/// ```
pub fn patchable_fields() -> impl Iterator<Item = &'static str> {
    FIELD_TABLE.iter().map(|entry| entry.name)
}

fn lookup(key: &str) -> Option<&'static FieldEntry> {
    FIELD_TABLE
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(key))
}

fn invalid(err: &UserValidationError) -> UserRepositoryError {
    UserRepositoryError::validation(err.field(), err.code(), err.to_string())
}

fn coerce(entry: &FieldEntry, value: &Value) -> Result<String, UserRepositoryError> {
    match (entry.coercion, value) {
        (_, Value::String(text)) => Ok(text.clone()),
        (Coercion::Digits, Value::Number(number)) if number.is_u64() => Ok(number.to_string()),
        _ => Err(UserRepositoryError::validation(
            entry.name,
            "invalid_type",
            format!("Invalid value for field {}", entry.name),
        )),
    }
}

fn set_email(user: &mut User, raw: String, _: PatchContext) -> Result<(), UserRepositoryError> {
    user.set_email(Email::new(raw).map_err(|err| invalid(&err))?);
    Ok(())
}

fn set_first_name(
    user: &mut User,
    raw: String,
    _: PatchContext,
) -> Result<(), UserRepositoryError> {
    user.set_first_name(PersonName::new(FIRST_NAME_FIELD, raw).map_err(|err| invalid(&err))?);
    Ok(())
}

fn set_last_name(user: &mut User, raw: String, _: PatchContext) -> Result<(), UserRepositoryError> {
    user.set_last_name(PersonName::new(LAST_NAME_FIELD, raw).map_err(|err| invalid(&err))?);
    Ok(())
}

fn set_birth_date(
    user: &mut User,
    raw: String,
    ctx: PatchContext,
) -> Result<(), UserRepositoryError> {
    let birth_date = BirthDate::parse(&raw, ctx.today).map_err(|err| invalid(&err))?;
    if !ctx.policy.is_eligible(birth_date.date(), ctx.today) {
        return Err(under_age_error(ctx.policy));
    }
    user.set_birth_date(birth_date);
    Ok(())
}

fn set_address(user: &mut User, raw: String, _: PatchContext) -> Result<(), UserRepositoryError> {
    user.set_address(Address::new(raw).map_err(|err| invalid(&err))?);
    Ok(())
}

fn set_phone(user: &mut User, raw: String, _: PatchContext) -> Result<(), UserRepositoryError> {
    user.set_phone(Phone::new(raw).map_err(|err| invalid(&err))?);
    Ok(())
}

/// Error raised when a birth date fails the age rule.
pub fn under_age_error(policy: AgePolicy) -> UserRepositoryError {
    UserRepositoryError::validation(
        BIRTH_DATE_FIELD,
        "under_age",
        format!("User must be at least {} years old", policy.min_age()),
    )
}

/// Apply `fields` to a copy of `user`.
///
/// The original is untouched; the caller commits the returned copy only when
/// every entry succeeded.
///
/// # Errors
/// Returns [`UserRepositoryError::Validation`] for unknown field names,
/// values of the wrong JSON type, and values failing the field rules or the
/// age rule.
pub fn apply_patch(
    user: &User,
    fields: &Map<String, Value>,
    ctx: PatchContext,
) -> Result<User, UserRepositoryError> {
    let mut patched = user.clone();
    for (key, value) in fields {
        let entry = lookup(key).ok_or_else(|| {
            UserRepositoryError::validation(
                key.as_str(),
                "unknown_field",
                format!("Invalid field {key}"),
            )
        })?;
        let raw = coerce(entry, value)?;
        (entry.set)(&mut patched, raw, ctx)?;
    }
    Ok(patched)
}
