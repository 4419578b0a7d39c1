#![allow(clippy::needless_for_each)]

use super::handlers::{admin, health};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        admin::console::console,
        admin::login::login,
        admin::login::logout,
        admin::guard::session_status,
    ),
    components(schemas(
        health::Health,
        admin::types::AdminLogin,
        admin::types::AdminView,
        admin::types::AuthReason,
        admin::types::ErrorBody,
        admin::types::SessionStatus,
    )),
    tags(
        (name = "admin", description = "Editorial console session gate"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
