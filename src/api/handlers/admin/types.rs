//! Request/response types for admin endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Why a request was sent back to the login view. Display only.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthReason {
    Required,
    Expired,
    Missing,
}

impl AuthReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Expired => "expired",
            Self::Missing => "missing",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "required" => Some(Self::Required),
            "expired" => Some(Self::Expired),
            "missing" => Some(Self::Missing),
            _ => None,
        }
    }

    /// Banner shown above the login form.
    #[must_use]
    pub const fn status_message(self) -> Option<&'static str> {
        match self {
            Self::Expired => Some("Your session expired. Re-enter the password to continue."),
            Self::Required => Some("Enter the admin password to continue."),
            Self::Missing => None,
        }
    }
}

#[derive(ToSchema, Deserialize)]
pub struct AdminLogin {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct AdminQuery {
    /// Reason code attached by the admin gate.
    pub auth: Option<String>,
    /// Path to return to after signing in.
    pub next: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub max_age_seconds: u64,
}

/// What `GET /admin` renders.
#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum AdminView {
    /// `ADMIN_PASSWORD` is not configured.
    Unavailable { message: String },
    Login {
        reason: Option<AuthReason>,
        message: Option<String>,
        next: Option<String>,
    },
    Console { sections: Vec<String> },
}
