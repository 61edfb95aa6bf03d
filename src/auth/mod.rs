//! Single-admin authentication.
//!
//! Provides:
//! - Signed session tokens (`session`)
//! - The `AdminSession` guard extractor used by every protected route (`guard`)
//! - Sign-in / session / sign-out endpoints (`routes`)

pub mod guard;
pub mod routes;
pub mod session;

pub use guard::{resolve_session, session_token, AdminSession};
pub use session::{generate_secret, SessionClaims, SessionManager, SESSION_COOKIE};
