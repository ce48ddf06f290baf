//! Request-level middleware: authentication extraction and RBAC.

pub mod auth;
pub mod rbac;
