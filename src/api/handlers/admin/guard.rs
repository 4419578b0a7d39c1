//! Session guard for admin actions.

use axum::{
    async_trait,
    extract::{Extension, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, warn};

use super::{
    gate::ADMIN_PATH,
    login::see_other,
    session::AdminAuthenticator,
    types::{AuthReason, SessionStatus},
};

/// Proof that the request carries a valid admin session.
///
/// Rejected requests have their cookie cleared and are sent to
/// `/admin?auth=expired`.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(authenticator) = parts.extensions.get::<Arc<AdminAuthenticator>>().cloned()
        else {
            error!("AdminAuthenticator extension missing from request");
            return Err(StatusCode::INTERNAL_SERVER_ERROR.into_response());
        };

        if authenticator.is_authenticated(&parts.headers) {
            return Ok(Self);
        }

        warn!("Admin action rejected: session invalid");
        Err(expired_redirect(&authenticator))
    }
}

fn expired_redirect(authenticator: &AdminAuthenticator) -> Response {
    let cookie = authenticator
        .clear_session()
        .map_err(|err| error!("Failed to build session clearing cookie: {err}"))
        .ok();
    let location = format!("{ADMIN_PATH}?auth={}", AuthReason::Expired.as_str());
    see_other(&location, cookie)
}

#[utoipa::path(
    get,
    path = "/admin/session",
    responses(
        (status = 200, description = "Session is active", body = SessionStatus),
        (status = 303, description = "Session missing or stale, redirect to login")
    ),
    tag = "admin"
)]
pub async fn session_status(
    _session: AdminSession,
    authenticator: Extension<Arc<AdminAuthenticator>>,
) -> impl IntoResponse {
    Json(SessionStatus {
        authenticated: true,
        max_age_seconds: authenticator.config().session_ttl_seconds(),
    })
}
