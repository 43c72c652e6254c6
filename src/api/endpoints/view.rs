//! Navigation endpoints.
//!
//! - `GET /api/view`: current screen
//! - `POST /api/view`: request a screen; the admin dashboard redirects to
//!   the login screen until an admin has signed in

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::View;

#[derive(Serialize)]
pub struct ViewResponse {
    pub view: View,
    pub admin_authenticated: bool,
}

#[derive(Deserialize)]
pub struct NavigateRequest {
    pub view: View,
}

/// `GET /api/view`
pub async fn current(State(ctx): State<ApiContext>) -> Result<Json<ViewResponse>, ApiError> {
    Ok(Json(ViewResponse {
        view: ctx.core.current_view()?,
        admin_authenticated: ctx.core.is_admin(),
    }))
}

/// `POST /api/view`
pub async fn navigate(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NavigateRequest>, JsonRejection>,
) -> Result<Json<ViewResponse>, ApiError> {
    let Json(request) = payload?;
    let view = ctx.core.navigate(request.view)?;
    Ok(Json(ViewResponse {
        view,
        admin_authenticated: ctx.core.is_admin(),
    }))
}
