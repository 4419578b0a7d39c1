//! # InsightSetter admin gate
//!
//! `insightsetter` guards the editorial console of the InsightSetter publishing
//! site. Moderators share a single password configured through `ADMIN_PASSWORD`;
//! there are no per-user accounts.
//!
//! ## Stateless sessions
//!
//! The session token is the SHA-256 digest of the shared password, rendered as
//! lowercase hex. It is recomputed on every request, so no session table exists
//! and any number of processes configured with the same password accept the
//! same cookie.
//!
//! - **Revocation:** rotating the password invalidates every issued cookie.
//! - **Comparison:** presented tokens are compared in constant time.
//! - **Disabled mode:** without a configured password no session can be
//!   established and every `/admin` request lands on the login view with
//!   `auth=missing`.
//!
//! ## Admin gate
//!
//! Requests under `/admin` pass through a middleware that redirects to the
//! login view with a reason code (`required`, `expired`, `missing`). Reason
//! codes only drive UI messaging; they never influence access decisions.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
