//! Portal API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. CORS → 2. Audit logger → 3. `Cache-Control: no-store` → 4. Admin token
//!    check (3 and 4 on admin routes only)

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the portal API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost layer
/// of the admin routes). Endpoint handlers use `State<ApiContext>`.
pub fn portal_api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

pub(crate) fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let admin = Router::new()
        .route("/admin/logout", post(endpoints::admin::logout))
        .route("/admin/applications", get(endpoints::admin::list))
        .route(
            "/admin/applications/:id/status",
            put(endpoints::admin::set_status),
        )
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_admin))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Extension must be outermost so the auth check can extract ApiContext
        .layer(axum::Extension(ctx.clone()));

    let public = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/courses", get(endpoints::courses::list))
        .route("/courses/:id", get(endpoints::courses::detail))
        .route(
            "/view",
            get(endpoints::view::current).post(endpoints::view::navigate),
        )
        .route("/applications", post(endpoints::applications::submit))
        .route("/status", get(endpoints::status::track))
        .route("/admin/login", post(endpoints::admin::login))
        .with_state(ctx);

    Router::new()
        .nest("/api", public.merge(admin))
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(CorsLayer::permissive())
}
