//! Console entry view for `GET /admin`.

use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    response::Json,
};
use std::sync::Arc;

use super::{
    session::AdminAuthenticator,
    types::{AdminQuery, AdminView, AuthReason},
};

const UNAVAILABLE_MESSAGE: &str = "ADMIN_PASSWORD is not configured. Add it to your environment and redeploy to unlock the editorial console.";

const CONSOLE_SECTIONS: [&str; 6] = [
    "overview",
    "submit",
    "stats",
    "analytics",
    "queue",
    "recent",
];

#[utoipa::path(
    get,
    path = "/admin",
    params(AdminQuery),
    responses(
        (status = 200, description = "Login view or console entry", body = AdminView),
        (status = 307, description = "Redirected to the login view by the admin gate")
    ),
    tag = "admin"
)]
// axum handler for the console entry point
pub async fn console(
    headers: HeaderMap,
    authenticator: Extension<Arc<AdminAuthenticator>>,
    query: Option<Query<AdminQuery>>,
) -> Json<AdminView> {
    let Query(query) = query.unwrap_or_default();
    Json(render(&authenticator, &headers, query))
}

fn render(authenticator: &AdminAuthenticator, headers: &HeaderMap, query: AdminQuery) -> AdminView {
    if authenticator.is_authenticated(headers) {
        return AdminView::Console {
            sections: CONSOLE_SECTIONS.iter().map(ToString::to_string).collect(),
        };
    }

    if !authenticator.is_configured() {
        return AdminView::Unavailable {
            message: UNAVAILABLE_MESSAGE.to_string(),
        };
    }

    let reason = query.auth.as_deref().and_then(AuthReason::parse);
    AdminView::Login {
        reason,
        message: reason
            .and_then(AuthReason::status_message)
            .map(ToString::to_string),
        next: query.next,
    }
}
