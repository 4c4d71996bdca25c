//! User record and its field constraints.
//!
//! Every field is a validated newtype, so a [`User`] value always satisfies
//! the record-level rules. The age rule is not part of the record: it depends
//! on configuration and is enforced by the store through
//! [`crate::domain::AgePolicy`].

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of first and last names.
pub const NAME_MAX: usize = 50;

/// Wire name of the email field.
pub const EMAIL_FIELD: &str = "email";
/// Wire name of the first name field.
pub const FIRST_NAME_FIELD: &str = "firstName";
/// Wire name of the last name field.
pub const LAST_NAME_FIELD: &str = "lastName";
/// Wire name of the birth date field.
pub const BIRTH_DATE_FIELD: &str = "birthDate";
/// Wire name of the address field.
pub const ADDRESS_FIELD: &str = "address";
/// Wire name of the phone field.
pub const PHONE_FIELD: &str = "phone";

/// Validation errors raised while building user fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidEmail,
    Blank { field: &'static str },
    TooLong { field: &'static str, max: usize },
    InvalidPhone,
    InvalidDate,
    BirthDateNotPast,
}

impl UserValidationError {
    /// Wire name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidEmail => EMAIL_FIELD,
            Self::Blank { field } | Self::TooLong { field, .. } => field,
            Self::InvalidPhone => PHONE_FIELD,
            Self::InvalidDate | Self::BirthDateNotPast => BIRTH_DATE_FIELD,
        }
    }

    /// Stable machine-readable code for error details.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::Blank { .. } => "blank",
            Self::TooLong { .. } => "too_long",
            Self::InvalidPhone => "invalid_phone",
            Self::InvalidDate => "invalid_date",
            Self::BirthDateNotPast => "not_past",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "Please provide a valid email address"),
            Self::Blank { field } => write!(f, "{field} is required"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::InvalidPhone => write!(f, "Please provide a valid phone number"),
            Self::InvalidDate => write!(f, "birthDate must be an ISO date (YYYY-MM-DD)"),
            Self::BirthDateNotPast => write!(f, "Birth date must be in the past"),
        }
    }
}

impl std::error::Error for UserValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^\+?[0-9]+$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Unique key of a user record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::Email;
    ///
    /// assert!(Email::new("test@test.com").is_ok());
    /// assert!(Email::new("no_email").is_err());
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First or last name: non-blank, at most [`NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Validate a name destined for `field`.
    pub fn new(field: &'static str, name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::Blank { field });
        }
        if name.chars().count() > NAME_MAX {
            return Err(UserValidationError::TooLong {
                field,
                max: NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Postal address; only required to be non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Validate and construct an [`Address`].
    pub fn new(address: impl Into<String>) -> Result<Self, UserValidationError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(UserValidationError::Blank {
                field: ADDRESS_FIELD,
            });
        }
        Ok(Self(address))
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Phone number made of digits with an optional leading `+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Validate and construct a [`Phone`].
    pub fn new(phone: impl Into<String>) -> Result<Self, UserValidationError> {
        let phone = phone.into();
        if !phone_regex().is_match(&phone) {
            return Err(UserValidationError::InvalidPhone);
        }
        Ok(Self(phone))
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Birth date strictly before the day it was validated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Validate that `date` lies strictly before `today`.
    pub fn new(date: NaiveDate, today: NaiveDate) -> Result<Self, UserValidationError> {
        if date >= today {
            return Err(UserValidationError::BirthDateNotPast);
        }
        Ok(Self(date))
    }

    /// Parse an ISO `YYYY-MM-DD` string and validate it against `today`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use user_directory::domain::BirthDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
    /// assert!(BirthDate::parse("2000-01-01", today).is_ok());
    /// assert!(BirthDate::parse("2024-06-01", today).is_err());
    /// assert!(BirthDate::parse("01/01/2000", today).is_err());
    /// ```
    pub fn parse(raw: &str, today: NaiveDate) -> Result<Self, UserValidationError> {
        let date = parse_iso_date(raw).ok_or(UserValidationError::InvalidDate)?;
        Self::new(date, today)
    }

    /// The underlying calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
#[must_use]
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// A user record.
///
/// Equality and hashing cover every field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    email: Email,
    first_name: PersonName,
    last_name: PersonName,
    birth_date: BirthDate,
    address: Address,
    phone: Phone,
}

impl User {
    /// Unique key.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Given name.
    #[must_use]
    pub const fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Family name.
    #[must_use]
    pub const fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Date of birth.
    #[must_use]
    pub const fn birth_date(&self) -> BirthDate {
        self.birth_date
    }

    /// Postal address.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Contact phone number.
    #[must_use]
    pub const fn phone(&self) -> &Phone {
        &self.phone
    }

    pub(crate) fn set_email(&mut self, email: Email) {
        self.email = email;
    }

    pub(crate) fn set_first_name(&mut self, name: PersonName) {
        self.first_name = name;
    }

    pub(crate) fn set_last_name(&mut self, name: PersonName) {
        self.last_name = name;
    }

    pub(crate) fn set_birth_date(&mut self, birth_date: BirthDate) {
        self.birth_date = birth_date;
    }

    pub(crate) fn set_address(&mut self, address: Address) {
        self.address = address;
    }

    pub(crate) fn set_phone(&mut self, phone: Phone) {
        self.phone = phone;
    }
}

/// Unvalidated user as received on the wire.
///
/// `birthDate` is kept as text so that format errors surface as field
/// validation failures rather than opaque body parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub address: String,
    pub phone: String,
}

impl UserDraft {
    /// Validate every field, reporting the first failure.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use user_directory::domain::UserDraft;
    ///
    /// let draft = UserDraft {
    ///     email: "test@test.com".into(),
    ///     first_name: "Jim".into(),
    ///     last_name: "Smith".into(),
    ///     birth_date: "2000-01-01".into(),
    ///     address: "Street".into(),
    ///     phone: "123456789".into(),
    /// };
    /// let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
    /// let user = draft.validate(today).expect("valid user");
    /// assert_eq!(user.email().as_ref(), "test@test.com");
    /// ```
    pub fn validate(self, today: NaiveDate) -> Result<User, UserValidationError> {
        Ok(User {
            email: Email::new(self.email)?,
            first_name: PersonName::new(FIRST_NAME_FIELD, self.first_name)?,
            last_name: PersonName::new(LAST_NAME_FIELD, self.last_name)?,
            birth_date: BirthDate::parse(&self.birth_date, today)?,
            address: Address::new(self.address)?,
            phone: Phone::new(self.phone)?,
        })
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.to_string(),
            first_name: user.first_name.as_ref().to_owned(),
            last_name: user.last_name.as_ref().to_owned(),
            birth_date: user.birth_date.date().format("%Y-%m-%d").to_string(),
            address: user.address.as_ref().to_owned(),
            phone: user.phone.as_ref().to_owned(),
        }
    }
}
