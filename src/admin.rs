//! Admin review workflow: static credential check, listing and status changes.

use serde::Serialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::lifecycle;
use crate::models::{ApplicationRecord, ApplicationStatus};
use crate::store::RecordStore;

/// The single static admin login.
///
/// Only SHA-256 digests are kept; comparison is constant-time so a wrong
/// guess takes as long as a near miss.
pub struct AdminCredentials {
    username_hash: [u8; 32],
    password_hash: [u8; 32],
}

impl AdminCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username_hash: digest(username.trim()),
            password_hash: digest(password),
        }
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username_hash[..].ct_eq(&digest(username.trim())[..]);
        let pass_ok = self.password_hash[..].ct_eq(&digest(password)[..]);
        (user_ok & pass_ok).into()
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminCredentials(..)")
    }
}

/// Random bearer token for an admin session (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Tokens are held only as digests.
pub fn hash_token(token: &str) -> [u8; 32] {
    digest(token)
}

fn digest(value: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hasher.finalize().into()
}

/// Dashboard row: a record plus its timeline step and the usual next
/// statuses. Any status may still be set.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewEntry {
    #[serde(flatten)]
    pub record: ApplicationRecord,
    pub step: u8,
    pub decided: bool,
    pub suggested: &'static [ApplicationStatus],
}

/// Per-status totals shown above the admin table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub submitted: usize,
    pub under_review: usize,
    pub approved: usize,
    pub rejected: usize,
    pub draft: usize,
}

/// All records, most recent first. No filtering or paging.
pub fn list_all(store: &RecordStore) -> Vec<ReviewEntry> {
    store
        .records()
        .iter()
        .map(|record| ReviewEntry {
            step: lifecycle::step_of(record.status),
            decided: lifecycle::is_terminal(record.status),
            suggested: lifecycle::natural_successors(record.status),
            record: record.clone(),
        })
        .collect()
}

/// Set any record to any status. Transitions are not enforced.
pub fn set_status<'a>(
    store: &'a mut RecordStore,
    id: &str,
    status: ApplicationStatus,
) -> &'a [ApplicationRecord] {
    if let Some(current) = store.find_exact(id) {
        tracing::info!(id, from = %current.status, to = %status, "Application status changed");
    }
    store.update_status(id, status)
}

pub fn dashboard_summary(store: &RecordStore) -> DashboardSummary {
    store
        .records()
        .iter()
        .fold(DashboardSummary::default(), |mut acc, record| {
            acc.total += 1;
            match record.status {
                ApplicationStatus::Draft => acc.draft += 1,
                ApplicationStatus::Submitted => acc.submitted += 1,
                ApplicationStatus::UnderReview => acc.under_review += 1,
                ApplicationStatus::Approved => acc.approved += 1,
                ApplicationStatus::Rejected => acc.rejected += 1,
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBlobStorage, SeedPolicy};

    fn seeded() -> RecordStore {
        RecordStore::open(MemoryBlobStorage::new(), SeedPolicy::DemoRecords)
    }

    #[test]
    fn credentials_accept_exact_match_only() {
        let creds = AdminCredentials::new("admin", "vpn-admin");
        assert!(creds.verify("admin", "vpn-admin"));
        assert!(creds.verify(" admin ", "vpn-admin"));
        assert!(!creds.verify("admin", "vpn-admin "));
        assert!(!creds.verify("Admin", "vpn-admin"));
        assert!(!creds.verify("admin", ""));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let creds = AdminCredentials::new("admin", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn generate_token_is_unique() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
        assert!(!t1.is_empty());
    }

    #[test]
    fn hash_token_is_deterministic() {
        assert_eq!(hash_token("test"), hash_token("test"));
        assert_ne!(hash_token("token-a"), hash_token("token-b"));
    }

    #[test]
    fn approve_under_review_record() {
        let mut store = seeded();
        let alice_before = store.find_exact("APP-VPN2024A").cloned().unwrap();

        set_status(&mut store, "APP-VPN2024B", "Approved".parse().unwrap());

        let entries = list_all(&store);
        let bob = entries.iter().find(|e| e.record.id == "APP-VPN2024B").unwrap();
        assert_eq!(bob.record.status, ApplicationStatus::Approved);
        assert_eq!(bob.step, 3);
        let alice = entries.iter().find(|e| e.record.id == "APP-VPN2024A").unwrap();
        assert_eq!(alice.record, alice_before);
    }

    #[test]
    fn transitions_are_unguarded() {
        let mut store = seeded();
        set_status(&mut store, "APP-VPN2024A", ApplicationStatus::Submitted);
        set_status(&mut store, "APP-VPN2024A", ApplicationStatus::Rejected);
        set_status(&mut store, "APP-VPN2024A", ApplicationStatus::Draft);
        assert_eq!(
            store.find_exact("APP-VPN2024A").unwrap().status,
            ApplicationStatus::Draft
        );
    }

    #[test]
    fn unknown_id_leaves_records_unchanged() {
        let mut store = seeded();
        let before = store.records().to_vec();
        let after = set_status(&mut store, "APP-MISSING01", ApplicationStatus::Approved);
        assert_eq!(after, before.as_slice());
    }

    #[test]
    fn list_entry_flattens_record_fields() {
        let store = seeded();
        let json = serde_json::to_value(&list_all(&store)[1]).unwrap();
        assert_eq!(json["id"], "APP-VPN2024B");
        assert_eq!(json["status"], "Under Review");
        assert_eq!(json["step"], 2);
        assert_eq!(json["decided"], false);
        assert_eq!(json["suggested"], serde_json::json!(["Approved", "Rejected"]));
    }

    #[test]
    fn summary_counts_each_status() {
        let store = seeded();
        let summary = dashboard_summary(&store);
        assert_eq!(
            summary,
            DashboardSummary {
                total: 2,
                approved: 1,
                under_review: 1,
                ..Default::default()
            }
        );
    }
}
