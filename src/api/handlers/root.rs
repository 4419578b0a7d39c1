use axum::{http::StatusCode, response::IntoResponse};

// axum handler for the service root
pub async fn root() -> impl IntoResponse {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}

pub async fn not_found() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}
