//! # ario-admin
//!
//! Admin dashboard and API proxy for AR.IO gateway nodes.
//!
//! The server authenticates a single operator, forwards privileged admin
//! calls to a gateway, discovers sibling services (bundler, AO compute unit,
//! observer) by probing candidate addresses in order, reports host resource
//! usage, and keeps a small file-backed list of UI notifications.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod locator;
pub mod logging;
pub mod notifications;
pub mod system;
