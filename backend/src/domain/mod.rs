//! Domain primitives, the user store and its ports.
//!
//! Types here are transport agnostic. The HTTP adapter in
//! [`crate::inbound::http`] translates requests into store calls and maps
//! [`Error`] onto responses.
//!
//! Public surface:
//! - [`User`], [`UserDraft`] and the field newtypes: the record and its rules.
//! - [`AgePolicy`]: minimum-age eligibility.
//! - [`apply_patch`]: merge-patch driven by the static field table.
//! - [`InMemoryUserStore`]: the [`ports::UserRepository`] implementation.
//! - [`Error`], [`ErrorCode`]: client-facing error payload.

pub mod age;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_patch;
pub mod user_store;

pub use self::age::{AgePolicy, whole_years_between};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Address, BirthDate, Email, NAME_MAX, PersonName, Phone, User, UserDraft, UserValidationError,
    parse_iso_date,
};
pub use self::user_patch::{PatchContext, apply_patch, patchable_fields};
pub use self::user_store::InMemoryUserStore;
