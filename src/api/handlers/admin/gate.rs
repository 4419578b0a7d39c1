//! Edge gate for the `/admin` area.
//!
//! Every request under `/admin` is checked before routing. Failures redirect
//! to the login view with an `auth` reason code; the code only selects the
//! banner text and is never trusted for access decisions.

use axum::{
    extract::{Request, State},
    http::{header::SET_COOKIE, HeaderMap, Method, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, error, warn};
use url::form_urlencoded;

use super::{
    session::{session_cookie, AdminAuthenticator},
    types::AuthReason,
};

pub const ADMIN_PATH: &str = "/admin";
pub const LOGIN_PATH: &str = "/admin/login";
pub const LOGOUT_PATH: &str = "/admin/logout";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum GateDecision {
    Allow,
    Redirect {
        reason: AuthReason,
        clear_cookie: bool,
    },
}

/// Middleware enforcing an admin session on `/admin` and `/admin/*`.
pub async fn admin_gate(
    State(authenticator): State<Arc<AdminAuthenticator>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if !is_admin_path(path) || is_action(request.method(), path) {
        return next.run(request).await;
    }

    match evaluate(&authenticator, request.uri(), request.headers()) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::Redirect {
            reason,
            clear_cookie,
        } => {
            debug!(reason = reason.as_str(), "redirecting to admin login");
            login_redirect(&authenticator, request.uri(), reason, clear_cookie)
        }
    }
}

fn is_admin_path(path: &str) -> bool {
    path == ADMIN_PATH || path.starts_with("/admin/")
}

// Login and logout check the password themselves.
fn is_action(method: &Method, path: &str) -> bool {
    *method == Method::POST && (path == LOGIN_PATH || path == LOGOUT_PATH)
}

pub(crate) fn evaluate(
    authenticator: &AdminAuthenticator,
    uri: &Uri,
    headers: &HeaderMap,
) -> GateDecision {
    let auth_param = query_param(uri, "auth").and_then(|value| AuthReason::parse(&value));
    let is_login_view = uri.path() == ADMIN_PATH && auth_param.is_some();
    let cookie = session_cookie(headers);

    if !authenticator.is_configured() {
        // Without this guard the login view would redirect to itself forever.
        if is_login_view && auth_param == Some(AuthReason::Missing) {
            return GateDecision::Allow;
        }
        warn!("ADMIN_PASSWORD is not configured, admin access is disabled");
        return GateDecision::Redirect {
            reason: AuthReason::Missing,
            clear_cookie: cookie.is_some(),
        };
    }

    let Some(token) = cookie.filter(|value| !value.is_empty()) else {
        return if is_login_view {
            GateDecision::Allow
        } else {
            GateDecision::Redirect {
                reason: AuthReason::Required,
                clear_cookie: false,
            }
        };
    };

    if authenticator.is_valid_token(&token) {
        GateDecision::Allow
    } else {
        GateDecision::Redirect {
            reason: AuthReason::Expired,
            clear_cookie: true,
        }
    }
}

fn login_redirect(
    authenticator: &AdminAuthenticator,
    uri: &Uri,
    reason: AuthReason,
    clear_cookie: bool,
) -> Response {
    let mut response = Redirect::temporary(&login_location(uri, reason)).into_response();
    if clear_cookie {
        match authenticator.clear_session() {
            Ok(cookie) => {
                response.headers_mut().append(SET_COOKIE, cookie);
            }
            Err(err) => error!("Failed to build session clearing cookie: {err}"),
        }
    }
    response
}

/// Build the login URL for a rejected request.
///
/// The current query string is kept, `auth` is set to the reason, and the
/// original location is remembered in `next`.
pub(crate) fn login_location(uri: &Uri, reason: AuthReason) -> String {
    let current_path = uri.path();
    let query = uri.query().unwrap_or_default();
    let mut params: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    set_param(&mut params, "auth", reason.as_str());

    if current_path != ADMIN_PATH {
        let next_value = if query.is_empty() {
            current_path.to_string()
        } else {
            format!("{current_path}?{query}")
        };
        set_param(&mut params, "next", &next_value);
    } else if let Some(next_value) = first_param(&params, "next") {
        set_param(&mut params, "next", &next_value);
    }

    let serialized = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{ADMIN_PATH}?{serialized}")
}

fn query_param(uri: &Uri, key: &str) -> Option<String> {
    let query = uri.query()?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

fn first_param(params: &[(String, String)], key: &str) -> Option<String> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

// Replace the first occurrence and drop the rest, or append.
fn set_param(params: &mut Vec<(String, String)>, key: &str, value: &str) {
    let Some(index) = params.iter().position(|(name, _)| name == key) else {
        params.push((key.to_string(), value.to_string()));
        return;
    };
    params[index].1 = value.to_string();

    let mut first = true;
    params.retain(|(name, _)| {
        if name == key {
            std::mem::replace(&mut first, false)
        } else {
            true
        }
    });
}
