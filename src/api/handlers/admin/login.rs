//! Password login and logout for the editorial console.

use axum::{
    extract::Extension,
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Form, Json,
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use url::Url;

use super::{
    gate::ADMIN_PATH,
    session::AdminAuthenticator,
    types::{AdminLogin, ErrorBody},
};

// Only used to resolve relative paths; the host is discarded.
const RESOLVE_BASE: &str = "https://example.com";

#[utoipa::path(
    post,
    path = "/admin/login",
    request_body(content = AdminLogin, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Session established, redirect to the requested admin page"),
        (status = 400, description = "Password missing", body = ErrorBody),
        (status = 401, description = "Password mismatch", body = ErrorBody),
        (status = 503, description = "ADMIN_PASSWORD is not configured", body = ErrorBody)
    ),
    tag = "admin"
)]
#[instrument(skip(authenticator, payload))]
pub async fn login(
    authenticator: Extension<Arc<AdminAuthenticator>>,
    payload: Option<Form<AdminLogin>>,
) -> Response {
    if !authenticator.is_configured() {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "ADMIN_PASSWORD is not configured. Set it in your environment and redeploy.",
        );
    }

    let Some(Form(payload)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "Enter the admin password.");
    };

    if payload.password.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Enter the admin password.");
    }

    if !authenticator.verify_password(&payload.password) {
        warn!("Admin login rejected: password mismatch");
        return error_response(StatusCode::UNAUTHORIZED, "That password did not match.");
    }

    let next_path = resolve_next_path(payload.next.as_deref());

    let cookie = match authenticator.establish_session() {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to establish admin session: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    info!(next = %next_path, "Admin session established");

    see_other(&next_path, Some(cookie))
}

#[utoipa::path(
    post,
    path = "/admin/logout",
    responses(
        (status = 303, description = "Session cleared, redirect to the login view")
    ),
    tag = "admin"
)]
pub async fn logout(authenticator: Extension<Arc<AdminAuthenticator>>) -> Response {
    // Always clear the cookie, even if no session was presented.
    let cookie = authenticator
        .clear_session()
        .map_err(|err| error!("Failed to build session clearing cookie: {err}"))
        .ok();

    see_other(&format!("{ADMIN_PATH}?auth=required"), cookie)
}

/// Sanitize the post-login destination.
///
/// Only same-site absolute paths are honored. The value is resolved against a
/// throwaway origin so `//host/path` style input loses its host.
#[must_use]
pub fn resolve_next_path(raw: Option<&str>) -> String {
    let Some(next) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return ADMIN_PATH.to_string();
    };

    if !next.starts_with('/') {
        return ADMIN_PATH.to_string();
    }

    let Ok(url) = Url::parse(RESOLVE_BASE).and_then(|base| base.join(next)) else {
        return ADMIN_PATH.to_string();
    };

    let mut path = url.path().to_string();
    if let Some(query) = url.query().filter(|query| !query.is_empty()) {
        path.push('?');
        path.push_str(query);
    }
    if let Some(fragment) = url.fragment().filter(|fragment| !fragment.is_empty()) {
        path.push('#');
        path.push_str(fragment);
    }
    path
}

pub(super) fn see_other(location: &str, cookie: Option<HeaderValue>) -> Response {
    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(location) {
        Ok(value) => {
            headers.insert(LOCATION, value);
        }
        Err(err) => {
            error!("Invalid redirect location: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }
    if let Some(cookie) = cookie {
        headers.insert(SET_COOKIE, cookie);
    }
    (StatusCode::SEE_OTHER, headers).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}
