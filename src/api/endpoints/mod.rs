//! API endpoint handlers.
//!
//! Each module corresponds to a portal screen. Handlers delegate to the
//! workflows through `CoreState`.

pub mod admin;
pub mod applications;
pub mod courses;
pub mod health;
pub mod status;
pub mod view;
