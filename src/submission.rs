//! Submission workflow: shallow validation of the application form, then
//! assembly of a `Submitted` record with a fresh reference ID.
//!
//! Catalog membership of `courseId` is the caller's job (the API boundary
//! only offers catalog entries); this module checks shape only.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{ApplicationRecord, ApplicationStatus};
use crate::reference_id;
use crate::store::RecordStore;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

const MAX_SHORT_FIELD: usize = 200;
const MAX_ADDRESS: usize = 500;
const MAX_STATEMENT: usize = 5_000;
const MAX_UPLOADED_FILES: usize = 10;
const MAX_ID_ATTEMPTS: usize = 16;

/// Raw form input from the apply screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub gender: String,
    pub address: String,
    pub course_id: String,
    pub prev_school: String,
    pub percentage: Option<f64>,
    pub entrance_score: Option<String>,
    pub statement: Option<String>,
    pub uploaded_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Email address is not valid")]
    InvalidEmail,
    #[error("Percentage must be a number between 0 and 100")]
    InvalidPercentage,
    #[error("{field} must be {max} characters or fewer")]
    TooLong { field: &'static str, max: usize },
    #[error("At most {0} files can be attached")]
    TooManyFiles(usize),
    #[error("Unknown course: {0}")]
    UnknownCourse(String),
}

impl ApplicationForm {
    /// Check mandatory fields and value shapes. Nothing is persisted on error.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Full name", &self.full_name)?;
        require("Email", &self.email)?;
        require("Course", &self.course_id)?;

        if !EMAIL_PATTERN.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }

        match self.percentage {
            Some(p) if p.is_finite() && (0.0..=100.0).contains(&p) => {}
            _ => return Err(ValidationError::InvalidPercentage),
        }

        for (field, value) in [
            ("Full name", &self.full_name),
            ("Email", &self.email),
            ("Phone", &self.phone),
            ("Date of birth", &self.dob),
            ("Gender", &self.gender),
            ("Course", &self.course_id),
            ("Previous school", &self.prev_school),
        ] {
            max_len(field, value, MAX_SHORT_FIELD)?;
        }
        max_len("Address", &self.address, MAX_ADDRESS)?;
        if let Some(ref score) = self.entrance_score {
            max_len("Entrance score", score, MAX_SHORT_FIELD)?;
        }
        if let Some(ref statement) = self.statement {
            max_len("Statement", statement, MAX_STATEMENT)?;
        }
        if self.uploaded_files.len() > MAX_UPLOADED_FILES {
            return Err(ValidationError::TooManyFiles(MAX_UPLOADED_FILES));
        }

        Ok(())
    }

    fn into_record(self, id: String, submitted_at: DateTime<Utc>) -> ApplicationRecord {
        ApplicationRecord {
            id,
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            dob: self.dob.trim().to_string(),
            gender: self.gender.trim().to_string(),
            address: self.address.trim().to_string(),
            course_id: self.course_id.trim().to_string(),
            prev_school: self.prev_school.trim().to_string(),
            percentage: self.percentage.unwrap_or_default(),
            entrance_score: non_blank(self.entrance_score),
            statement: non_blank(self.statement),
            uploaded_files: if self.uploaded_files.is_empty() {
                None
            } else {
                Some(self.uploaded_files)
            },
            status: ApplicationStatus::Submitted,
            submitted_at,
        }
    }
}

/// Validate, stamp and store a new application. Returns the stored record.
pub fn submit(
    store: &mut RecordStore,
    form: ApplicationForm,
) -> Result<ApplicationRecord, ValidationError> {
    submit_with(store, form, Utc::now(), reference_id::generate)
}

/// [`submit`] with an injectable clock and id source.
pub fn submit_with<F>(
    store: &mut RecordStore,
    form: ApplicationForm,
    now: DateTime<Utc>,
    next_id: F,
) -> Result<ApplicationRecord, ValidationError>
where
    F: FnMut() -> String,
{
    form.validate()?;

    let id = unique_reference_id(store, next_id);
    let record = form.into_record(id, now);
    store.append(record.clone());

    tracing::info!(id = %record.id, course = %record.course_id, "Application submitted");
    Ok(record)
}

fn unique_reference_id<F>(store: &RecordStore, mut next_id: F) -> String
where
    F: FnMut() -> String,
{
    let mut candidate = next_id();
    for _ in 1..MAX_ID_ATTEMPTS {
        if !store.contains_id(&candidate) {
            return candidate;
        }
        tracing::debug!(id = %candidate, "Reference ID clash, drawing another");
        candidate = next_id();
    }
    tracing::warn!(id = %candidate, "Reference ID attempts exhausted");
    candidate
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        Err(ValidationError::TooLong { field, max })
    } else {
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
