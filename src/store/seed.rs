//! Illustrative records written when no saved applications exist.

use chrono::{DateTime, Utc};

use crate::models::{ApplicationRecord, ApplicationStatus};

/// What to do when storage holds no records blob yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Start with two demo applications (useful for local development).
    #[default]
    DemoRecords,
    /// Start with an empty list.
    Empty,
}

impl SeedPolicy {
    pub fn records(self, now: DateTime<Utc>) -> Vec<ApplicationRecord> {
        match self {
            Self::DemoRecords => demo_records(now),
            Self::Empty => Vec::new(),
        }
    }
}

pub fn demo_records(now: DateTime<Utc>) -> Vec<ApplicationRecord> {
    vec![
        ApplicationRecord {
            id: "APP-VPN2024A".into(),
            full_name: "Alice Johnson".into(),
            email: "alice@example.com".into(),
            phone: "123-456-7890".into(),
            dob: "2005-05-15".into(),
            gender: "Female".into(),
            address: "123 Maple St".into(),
            course_id: "CSE-001".into(),
            prev_school: "Liberty High".into(),
            percentage: 95.5,
            entrance_score: None,
            statement: None,
            uploaded_files: None,
            status: ApplicationStatus::Approved,
            submitted_at: now,
        },
        ApplicationRecord {
            id: "APP-VPN2024B".into(),
            full_name: "Robert Smith".into(),
            email: "bob@gmail.com".into(),
            phone: "987-654-3210".into(),
            dob: "2004-11-20".into(),
            gender: "Male".into(),
            address: "456 Oak Rd".into(),
            course_id: "IT-001".into(),
            prev_school: "North Side Secondary".into(),
            percentage: 82.0,
            entrance_score: None,
            statement: None,
            uploaded_files: None,
            status: ApplicationStatus::UnderReview,
            submitted_at: now,
        },
    ]
}
