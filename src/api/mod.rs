//! HTTP surface: browser pages for staff plus a small JSON API.
//!
//! Routes share one middleware stack: Extension(ApiContext) → Session → Audit.
//! `clinic_router()` returns a composable `Router`; `start_server()` binds
//! it and serves in the background.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;
pub mod views;

pub use router::clinic_router;
pub use server::{start_server, ClinicServer};
pub use types::ApiContext;
