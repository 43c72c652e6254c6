//! Local portal API.
//!
//! Exposes the portal workflows as JSON endpoints for the browser frontend.
//! Routes are nested under `/api/`; admin routes sit behind a bearer-token
//! middleware issued by `POST /api/admin/login`.
//!
//! The router is composable: `portal_api_router()` returns a `Router` that
//! can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::portal_api_router;
pub use server::{start_portal_api_server, PortalApiServer, PortalApiSession};
pub use types::ApiContext;
