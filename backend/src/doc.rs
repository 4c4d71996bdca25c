//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every user endpoint and the health probes, plus the
//! schema wrappers from [`crate::inbound::http::schemas`] that describe
//! domain types without coupling them to utoipa.
//!
//! The document is served by Swagger UI in debug builds and printed by the
//! `openapi-dump` binary.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserPatchSchema, UserSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "CRUD access to user records with minimum-age enforcement."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::find_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::replace_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserSchema, UserPatchSchema, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "User record management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
