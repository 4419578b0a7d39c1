//! Shared-password admin sessions.
//!
//! The editorial console is protected by a single password (`ADMIN_PASSWORD`).
//! A session cookie holds `sha256(password)` and is validated statelessly.
//!
//! ## Flow
//!
//! - `admin_gate` runs before routing for `/admin` and `/admin/*`.
//! - `POST /admin/login` verifies the password and sets the cookie.
//! - `POST /admin/logout` clears it.
//! - Handlers that mutate editorial data take an [`AdminSession`].
//!
//! > **Note:** Rotating `ADMIN_PASSWORD` logs out every moderator. There is no
//! > other revocation mechanism.

pub(crate) mod console;
pub(crate) mod gate;
pub(crate) mod guard;
pub(crate) mod login;
pub(crate) mod session;
mod state;
pub(crate) mod types;

pub use console::console;
pub use gate::admin_gate;
pub use guard::{session_status, AdminSession};
pub use login::{login, logout, resolve_next_path};
pub use session::{constant_time_eq, derive_token, AdminAuthenticator, SessionError};
pub use state::AdminConfig;
