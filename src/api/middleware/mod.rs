//! API middleware.
//!
//! - `audit` wraps every route and logs method, path, status and latency.
//! - `auth` guards the admin routes with the session bearer token.

pub mod audit;
pub mod auth;
