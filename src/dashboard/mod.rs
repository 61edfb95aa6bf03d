//! Embedded web dashboard
//!
//! Serves the single-page admin UI at `/` and the sign-in page at `/login`.
//! Assets are compiled into the binary from the `dashboard/` directory.

pub mod handler;

pub use handler::{assets_handler, dashboard_handler, login_handler};
