//! Course catalog endpoints.
//!
//! - `GET /api/courses`: the full catalog
//! - `GET /api/courses/:id`: one program

use axum::extract::Path;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::catalog;
use crate::models::Course;

#[derive(Serialize)]
pub struct CoursesResponse {
    pub courses: &'static [Course],
}

/// `GET /api/courses`
pub async fn list() -> Json<CoursesResponse> {
    Json(CoursesResponse {
        courses: catalog::all(),
    })
}

/// `GET /api/courses/:id`
pub async fn detail(Path(id): Path<String>) -> Result<Json<&'static Course>, ApiError> {
    catalog::find(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Course {id} not found")))
}
