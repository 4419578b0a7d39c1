//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary executes.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::admin;
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let admin_opts = admin::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        admin_password: admin_opts.password,
        admin_session_ttl_seconds: admin_opts.session_ttl_seconds,
        admin_cookie_secure: admin_opts.cookie_secure,
    }))
}
