//! User directory handlers.
//!
//! ```text
//! GET    /api/user?from=2000-01-01&to=2010-01-01
//! POST   /api/user          {"email":"test@test.com", ...}
//! PUT    /api/user          {"email":"test@test.com", ...}
//! PUT    /api/user/{email}  {"firstName":"Jane"}
//! DELETE /api/user/{email}
//! ```
//!
//! Handlers validate the request shape, then delegate to the
//! [`UserRepository`](crate::domain::ports::UserRepository) port. Store
//! failures convert into [`Error`] and leave as `400` responses.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;
use utoipa::IntoParams;

use crate::domain::{Error, User, UserDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserPatchSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, ensure_ordered_range, ensure_patch_values_present, parse_past_date,
    parse_path_email, user_validation_error,
};

const FROM: FieldName = FieldName::new("from");
const TO: FieldName = FieldName::new("to");
const EMAIL: FieldName = FieldName::new("email");

/// Birth date window for `GET /api/user`.
///
/// Both bounds are exclusive.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BirthDateRange {
    /// Lower bound, ISO date in the past.
    #[param(example = "1990-01-01")]
    pub from: Option<String>,
    /// Upper bound, ISO date in the past.
    #[param(example = "2005-01-01")]
    pub to: Option<String>,
}

/// List users born strictly between `from` and `to`.
#[utoipa::path(
    get,
    path = "/api/user",
    params(BirthDateRange),
    responses(
        (status = 200, description = "Users in store order", body = [UserSchema]),
        (status = 400, description = "Invalid dates or range", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "findUsersByBirthDate"
)]
#[get("")]
pub async fn find_users(
    state: web::Data<HttpState>,
    range: web::Query<BirthDateRange>,
) -> ApiResult<web::Json<Vec<User>>> {
    let today = state.today();
    let BirthDateRange { from, to } = range.into_inner();
    let from = parse_past_date(from, FROM, today)?;
    let to = parse_past_date(to, TO, today)?;
    ensure_ordered_range(from, to, FROM)?;

    let users = state.users.find_all().await?;
    let matching: Vec<User> = users
        .into_iter()
        .filter(|user| {
            let born = user.birth_date().date();
            from < born && born < to
        })
        .collect();
    debug!(%from, %to, found = matching.len(), "users filtered by birth date");
    Ok(web::Json(matching))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/user",
    request_body = UserSchema,
    responses(
        (status = 200, description = "Created user", body = UserSchema),
        (status = 400, description = "Validation failure or duplicate email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserDraft>,
) -> ApiResult<web::Json<User>> {
    let user = validate_draft(&state, payload.into_inner())?;
    let created = state.users.create(user).await?;
    Ok(web::Json(created))
}

/// Replace the user holding the body's email.
#[utoipa::path(
    put,
    path = "/api/user",
    request_body = UserSchema,
    responses(
        (status = 200, description = "Replaced user", body = UserSchema),
        (status = 400, description = "Validation failure or unknown email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "replaceUser"
)]
#[put("")]
pub async fn replace_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserDraft>,
) -> ApiResult<web::Json<User>> {
    let user = validate_draft(&state, payload.into_inner())?;
    let replaced = state.users.replace(user).await?;
    Ok(web::Json(replaced))
}

/// Update the named fields of one user.
///
/// Field names match case-insensitively. The update is all or nothing.
#[utoipa::path(
    put,
    path = "/api/user/{email}",
    params(("email" = String, Path, description = "Email of the user to update")),
    request_body = UserPatchSchema,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (
            status = 400,
            description = "Invalid email, unknown field, invalid value or unknown user",
            body = ErrorSchema
        ),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/{email}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<web::Json<User>> {
    let email = parse_path_email(path.into_inner(), EMAIL)?;
    let fields = payload.into_inner();
    ensure_patch_values_present(&fields)?;
    let updated = state.users.partial_update(&email, &fields).await?;
    Ok(web::Json(updated))
}

/// Delete one user.
#[utoipa::path(
    delete,
    path = "/api/user/{email}",
    params(("email" = String, Path, description = "Email of the user to delete")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Invalid email or unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/{email}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let email = parse_path_email(path.into_inner(), EMAIL)?;
    state.users.delete_by_email(&email).await?;
    Ok(HttpResponse::Ok().finish())
}

fn validate_draft(state: &HttpState, draft: UserDraft) -> Result<User, Error> {
    draft
        .validate(state.today())
        .map_err(|err| user_validation_error(&err))
}

/// Register every user route under `/api/user`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use user_directory::inbound::http::users::configure;
///
/// let _app = App::new().service(web::scope("/api/user").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(find_users)
        .service(create_user)
        .service(replace_user)
        .service(update_user)
        .service(delete_user);
}
