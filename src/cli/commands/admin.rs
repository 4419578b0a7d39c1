use clap::{Arg, ArgAction, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_ADMIN_PASSWORD: &str = "admin-password";
pub const ARG_ADMIN_SESSION_TTL_SECONDS: &str = "admin-session-ttl-seconds";
pub const ARG_ADMIN_COOKIE_SECURE: &str = "admin-cookie-secure";

#[derive(Debug)]
pub struct Options {
    pub password: Option<SecretString>,
    pub session_ttl_seconds: u64,
    pub cookie_secure: bool,
}

impl Options {
    /// Parse admin session arguments from matches.
    ///
    /// The password is passed through as given; `AdminAuthenticator::new`
    /// trims it and treats a blank value as unset.
    ///
    /// # Errors
    /// Returns an error if the session TTL is zero.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let password = matches
            .get_one::<String>(ARG_ADMIN_PASSWORD)
            .cloned()
            .map(SecretString::from);

        let session_ttl_seconds = matches
            .get_one::<u64>(ARG_ADMIN_SESSION_TTL_SECONDS)
            .copied()
            .unwrap_or(43_200);
        if session_ttl_seconds == 0 {
            anyhow::bail!("--{ARG_ADMIN_SESSION_TTL_SECONDS} must be greater than zero");
        }

        Ok(Self {
            password,
            session_ttl_seconds,
            cookie_secure: matches.get_flag(ARG_ADMIN_COOKIE_SECURE),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_ADMIN_PASSWORD)
                .long(ARG_ADMIN_PASSWORD)
                .help("Shared moderator password; admin access is disabled when unset")
                .env("ADMIN_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_ADMIN_SESSION_TTL_SECONDS)
                .long(ARG_ADMIN_SESSION_TTL_SECONDS)
                .help("Admin session cookie TTL in seconds")
                .env("INSIGHTSETTER_ADMIN_SESSION_TTL_SECONDS")
                .default_value("43200")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_ADMIN_COOKIE_SECURE)
                .long(ARG_ADMIN_COOKIE_SECURE)
                .help("Mark the admin session cookie Secure (console served over HTTPS)")
                .env("INSIGHTSETTER_ADMIN_COOKIE_SECURE")
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::admin::{AdminAuthenticator, AdminConfig};
    use secrecy::ExposeSecret;

    fn command() -> Command {
        with_args(Command::new("test"))
    }

    fn authenticator(options: Options) -> AdminAuthenticator {
        AdminAuthenticator::new(
            options.password,
            AdminConfig::new().with_session_ttl_seconds(options.session_ttl_seconds),
        )
    }

    #[test]
    fn password_from_env_is_trimmed_by_authenticator() -> anyhow::Result<()> {
        temp_env::with_vars([("ADMIN_PASSWORD", Some("  hunter2 \n"))], || {
            let matches = command().try_get_matches_from(["test"])?;
            let options = Options::parse(&matches)?;
            assert_eq!(
                options.password.as_ref().map(ExposeSecret::expose_secret),
                Some("  hunter2 \n")
            );

            let auth = authenticator(options);
            assert!(auth.is_configured());
            assert!(auth.verify_password("hunter2"));
            Ok(())
        })
    }

    #[test]
    fn blank_password_disables_admin() -> anyhow::Result<()> {
        temp_env::with_vars([("ADMIN_PASSWORD", Some("   "))], || {
            let matches = command().try_get_matches_from(["test"])?;
            let auth = authenticator(Options::parse(&matches)?);
            assert!(!auth.is_configured());
            Ok(())
        })
    }

    #[test]
    fn defaults() -> anyhow::Result<()> {
        temp_env::with_vars(
            [
                ("ADMIN_PASSWORD", None::<&str>),
                ("INSIGHTSETTER_ADMIN_SESSION_TTL_SECONDS", None),
                ("INSIGHTSETTER_ADMIN_COOKIE_SECURE", None),
            ],
            || {
                let matches = command().try_get_matches_from(["test"])?;
                let options = Options::parse(&matches)?;
                assert!(options.password.is_none());
                assert_eq!(options.session_ttl_seconds, 43_200);
                assert!(!options.cookie_secure);
                Ok(())
            },
        )
    }

    #[test]
    fn zero_ttl_is_rejected() -> anyhow::Result<()> {
        let matches =
            command().try_get_matches_from(["test", "--admin-session-ttl-seconds", "0"])?;
        assert!(Options::parse(&matches).is_err());
        Ok(())
    }

    #[test]
    fn secure_flag() -> anyhow::Result<()> {
        temp_env::with_vars([("INSIGHTSETTER_ADMIN_COOKIE_SECURE", Some("true"))], || {
            let matches = command().try_get_matches_from(["test"])?;
            assert!(Options::parse(&matches)?.cookie_secure);
            Ok(())
        })
    }
}
