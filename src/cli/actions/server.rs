use crate::api::{self, handlers::admin};
use anyhow::Result;
use secrecy::SecretString;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub admin_password: Option<SecretString>,
    pub admin_session_ttl_seconds: u64,
    pub admin_cookie_secure: bool,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let config = admin::AdminConfig::new()
        .with_session_ttl_seconds(args.admin_session_ttl_seconds)
        .with_cookie_secure(args.admin_cookie_secure);

    let authenticator = Arc::new(admin::AdminAuthenticator::new(args.admin_password, config));

    api::new(args.port, authenticator).await
}
