//! Submission endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::core_state::SubmissionReceipt;
use crate::submission::ApplicationForm;

/// `POST /api/applications`: validate and store a new application.
///
/// 201 with the stored record (its `id` is the reference ID to track).
/// A storage failure still returns 201, with `warning` set.
pub async fn submit(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ApplicationForm>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), ApiError> {
    let Json(form) = payload?;
    let receipt = ctx.core.submit_application(form)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
