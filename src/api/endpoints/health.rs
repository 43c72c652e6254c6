//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::store::PersistenceWarning;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub college: &'static str,
    pub applications: usize,
    pub persistence_warning: Option<PersistenceWarning>,
}

/// `GET /api/health`: liveness plus storage state.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let (applications, persistence_warning) = {
        let store = ctx.core.read_store()?;
        (store.len(), store.persistence_warning().cloned())
    };

    Ok(Json(HealthResponse {
        status: if persistence_warning.is_some() {
            "degraded"
        } else {
            "ok"
        },
        version: crate::config::APP_VERSION,
        college: crate::config::COLLEGE_NAME,
        applications,
        persistence_warning,
    }))
}
