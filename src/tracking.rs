//! Tracking workflow: find an application by its reference ID.

use serde::Serialize;

use crate::catalog;
use crate::lifecycle::{self, TimelineStep, Tone};
use crate::models::{ApplicationRecord, ApplicationStatus};
use crate::reference_id;
use crate::store::RecordStore;

/// Result of one tracking query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "record", rename_all = "snake_case")]
pub enum TrackOutcome {
    /// Blank query; no search was performed.
    Idle,
    Found(Box<ApplicationRecord>),
    NotFound,
}

impl TrackOutcome {
    pub fn record(&self) -> Option<&ApplicationRecord> {
        match self {
            Self::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Case-insensitive exact match on the full reference ID.
///
/// Surrounding whitespace is ignored; a blank query short-circuits to
/// [`TrackOutcome::Idle`] without searching. Pure read.
pub fn track(store: &RecordStore, query: &str) -> TrackOutcome {
    let query = query.trim();
    if query.is_empty() {
        return TrackOutcome::Idle;
    }
    let wanted = query.to_uppercase();
    match store.records().iter().find(|r| r.id.to_uppercase() == wanted) {
        Some(record) => {
            tracing::debug!(id = %record.id, "Tracking lookup hit");
            TrackOutcome::Found(Box::new(record.clone()))
        }
        None => {
            tracing::debug!(
                query,
                well_formed = reference_id::is_reference_id(query),
                "Tracking lookup miss"
            );
            TrackOutcome::NotFound
        }
    }
}

/// Everything the status screen shows for a found application.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub record: ApplicationRecord,
    pub course_name: Option<&'static str>,
    pub step: u8,
    pub timeline: Vec<TimelineStep>,
    pub message: &'static str,
    pub tone: Tone,
}

impl StatusReport {
    pub fn for_record(record: &ApplicationRecord) -> Self {
        let status: ApplicationStatus = record.status;
        Self {
            record: record.clone(),
            course_name: catalog::find(&record.course_id).map(|c| c.name),
            step: lifecycle::step_of(status),
            timeline: lifecycle::timeline(status),
            message: lifecycle::status_message(status),
            tone: lifecycle::tone(status),
        }
    }
}
