//! Admin endpoints.
//!
//! - `POST /api/admin/login`: static credential check, returns a bearer token
//! - `POST /api/admin/logout`: end the admin session
//! - `GET /api/admin/applications`: every application plus status totals
//! - `PUT /api/admin/applications/:id/status`: set any status

use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::admin::{DashboardSummary, ReviewEntry};
use crate::api::error::ApiError;
use crate::api::types::{AdminContext, ApiContext};
use crate::core_state::CoreError;
use crate::models::ApplicationStatus;
use crate::store::PersistenceWarning;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
}

/// `POST /api/admin/login`
///
/// Failed attempts are throttled per peer address of the connection.
pub async fn login(
    State(ctx): State<ApiContext>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload?;
    let source = client_addr.ip();

    {
        let mut throttle = ctx
            .login_throttle
            .lock()
            .map_err(|_| ApiError::Internal("login throttle lock".into()))?;
        throttle
            .check(source)
            .map_err(|retry_after| ApiError::RateLimited { retry_after })?;
    }

    match ctx.core.login_admin(&request.username, &request.password) {
        Ok(token) => {
            if let Ok(mut throttle) = ctx.login_throttle.lock() {
                throttle.clear(source);
            }
            Ok(Json(LoginResponse {
                token,
                token_type: "Bearer",
            }))
        }
        Err(CoreError::InvalidCredentials) => {
            if let Ok(mut throttle) = ctx.login_throttle.lock() {
                throttle.record_failure(source);
            }
            Err(ApiError::InvalidCredentials)
        }
        Err(e) => Err(e.into()),
    }
}

/// `POST /api/admin/logout`
pub async fn logout(
    State(ctx): State<ApiContext>,
    Extension(_admin): Extension<AdminContext>,
) -> Result<StatusCode, ApiError> {
    ctx.core.logout_admin()?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct ApplicationsResponse {
    pub applications: Vec<ReviewEntry>,
    pub summary: DashboardSummary,
}

/// `GET /api/admin/applications`
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(_admin): Extension<AdminContext>,
) -> Result<Json<ApplicationsResponse>, ApiError> {
    let (applications, summary) = ctx.core.review_snapshot()?;
    Ok(Json(ApplicationsResponse {
        applications,
        summary,
    }))
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub applications: Vec<ReviewEntry>,
    pub warning: Option<PersistenceWarning>,
}

/// `PUT /api/admin/applications/:id/status`
pub async fn set_status(
    State(ctx): State<ApiContext>,
    Extension(_admin): Extension<AdminContext>,
    Path(id): Path<String>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = payload?;
    let status: ApplicationStatus = request
        .status
        .parse()
        .map_err(|e: crate::models::ParseEnumError| ApiError::BadRequest(e.to_string()))?;

    let change = ctx.core.set_status(&id, status)?;
    if !change.found {
        return Err(ApiError::NotFound(format!("Application {id} not found")));
    }

    Ok(Json(StatusResponse {
        applications: change.applications,
        warning: change.warning,
    }))
}
