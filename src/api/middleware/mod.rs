//! Request middleware.
//!
//! Execution order (outermost → innermost):
//! 1. Session loader: resolves the session cookie into `CurrentSession`
//! 2. Audit logger: logs method, path, status and role

pub mod audit;
pub mod session;
