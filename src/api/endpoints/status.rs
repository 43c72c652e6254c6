//! Tracking endpoint.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::tracking::{StatusReport, TrackOutcome};

#[derive(Deserialize)]
pub struct TrackQuery {
    #[serde(default)]
    pub id: String,
}

#[derive(Serialize)]
pub struct TrackResponse {
    /// `idle`, `found` or `not_found`.
    pub outcome: &'static str,
    pub report: Option<StatusReport>,
}

/// `GET /api/status?id=APP-...`: case-insensitive lookup by reference ID.
///
/// A miss is a normal 200 result with `outcome: "not_found"`.
pub async fn track(
    State(ctx): State<ApiContext>,
    query: Result<Query<TrackQuery>, QueryRejection>,
) -> Result<Json<TrackResponse>, ApiError> {
    let Query(query) = query?;
    let response = match ctx.core.track(&query.id)? {
        TrackOutcome::Idle => TrackResponse {
            outcome: "idle",
            report: None,
        },
        TrackOutcome::Found(record) => TrackResponse {
            outcome: "found",
            report: Some(StatusReport::for_record(&record)),
        },
        TrackOutcome::NotFound => TrackResponse {
            outcome: "not_found",
            report: None,
        },
    };
    Ok(Json(response))
}
