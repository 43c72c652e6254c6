//! Transport-agnostic portal state.
//!
//! `CoreState` owns the record store, the admin session and the current
//! screen. It is wrapped in `Arc` at startup and shared with the HTTP API;
//! there are no process-wide globals.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use subtle::ConstantTimeEq;

use crate::admin::{self, AdminCredentials, DashboardSummary, ReviewEntry};
use crate::catalog;
use crate::config::PortalConfig;
use crate::models::{ApplicationRecord, ApplicationStatus, View};
use crate::store::{
    BlobStorage, FileBlobStorage, MemoryBlobStorage, PersistenceWarning, RecordStore, SeedPolicy,
};
use crate::submission::{self, ApplicationForm, ValidationError};
use crate::tracking::{self, TrackOutcome};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock poisoned")]
    LockPoisoned,
    #[error("Admin sign-in required")]
    NotAuthorized,
    #[error("Invalid admin credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Screen to show for a navigation request. The admin dashboard is gated
/// behind the login screen until the admin flag is set.
pub fn resolve_view(requested: View, admin_authenticated: bool) -> View {
    match requested {
        View::Admin if !admin_authenticated => View::AdminLogin,
        View::Home
        | View::Apply
        | View::Courses
        | View::Status
        | View::Admin
        | View::AdminLogin => requested,
    }
}

/// What the single active portal session is looking at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortalSession {
    pub view: View,
    pub track_query: String,
    pub last_result: TrackOutcome,
}

impl Default for PortalSession {
    fn default() -> Self {
        Self {
            view: View::Home,
            track_query: String::new(),
            last_result: TrackOutcome::Idle,
        }
    }
}

/// Result of a submission, with any storage degradation attached.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub record: ApplicationRecord,
    pub warning: Option<PersistenceWarning>,
}

/// Result of an admin status change.
#[derive(Debug, Clone, Serialize)]
pub struct StatusChange {
    pub found: bool,
    pub applications: Vec<ReviewEntry>,
    pub warning: Option<PersistenceWarning>,
}

pub struct CoreState {
    store: RwLock<RecordStore>,
    credentials: AdminCredentials,
    /// Shared "is admin" flag, set by a successful credential check.
    admin_authenticated: AtomicBool,
    /// Digest of the bearer token issued at the last admin sign-in.
    admin_token: Mutex<Option<[u8; 32]>>,
    session: Mutex<PortalSession>,
    /// Directory holding the records blob, `None` when running in memory.
    pub data_dir: Option<PathBuf>,
}

impl CoreState {
    pub fn new(store: RecordStore, credentials: AdminCredentials) -> Self {
        Self {
            store: RwLock::new(store),
            credentials,
            admin_authenticated: AtomicBool::new(false),
            admin_token: Mutex::new(None),
            session: Mutex::new(PortalSession::default()),
            data_dir: None,
        }
    }

    /// Open the file-backed store described by `config`.
    ///
    /// An unusable data directory degrades to in-memory storage with a warning
    /// rather than failing startup.
    pub fn open(config: &PortalConfig) -> Self {
        let credentials = AdminCredentials::new(&config.admin_username, &config.admin_password);
        if config.uses_default_admin_password() {
            tracing::warn!("Using the built-in admin password; set ADMISSIONS_ADMIN_PASSWORD");
        }

        match FileBlobStorage::open(&config.data_dir) {
            Ok(storage) => {
                tracing::info!(dir = %config.data_dir.display(), "Record store opened");
                let mut state = Self::with_storage(storage, config.seed, credentials);
                state.data_dir = Some(config.data_dir.clone());
                state
            }
            Err(e) => {
                tracing::warn!(
                    dir = %config.data_dir.display(),
                    "Data directory unusable ({e}); applications will not survive a restart"
                );
                Self::with_storage(MemoryBlobStorage::new(), config.seed, credentials)
            }
        }
    }

    pub fn with_storage(
        storage: impl BlobStorage + 'static,
        seed: SeedPolicy,
        credentials: AdminCredentials,
    ) -> Self {
        Self::new(RecordStore::open(storage, seed), credentials)
    }

    // ── Store access ────────────────────────────────────────

    pub fn read_store(&self) -> Result<RwLockReadGuard<'_, RecordStore>, CoreError> {
        self.store.read().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn write_store(&self) -> Result<RwLockWriteGuard<'_, RecordStore>, CoreError> {
        self.store.write().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn persistence_warning(&self) -> Result<Option<PersistenceWarning>, CoreError> {
        Ok(self.read_store()?.persistence_warning().cloned())
    }

    // ── Navigation ──────────────────────────────────────────

    pub fn session(&self) -> Result<PortalSession, CoreError> {
        let guard = self.session.lock().map_err(|_| CoreError::LockPoisoned)?;
        Ok(guard.clone())
    }

    pub fn current_view(&self) -> Result<View, CoreError> {
        Ok(self.session()?.view)
    }

    /// Switch screens, redirecting to the login screen for a gated dashboard.
    pub fn navigate(&self, requested: View) -> Result<View, CoreError> {
        let view = resolve_view(requested, self.is_admin());
        self.set_view(view)?;
        Ok(view)
    }

    fn set_view(&self, view: View) -> Result<(), CoreError> {
        let mut guard = self.session.lock().map_err(|_| CoreError::LockPoisoned)?;
        guard.view = view;
        Ok(())
    }

    // ── Submission ──────────────────────────────────────────

    /// Submit an application and move the session to the status screen
    /// showing it.
    pub fn submit_application(&self, form: ApplicationForm) -> Result<SubmissionReceipt, CoreError> {
        form.validate()?;
        if !catalog::contains(form.course_id.trim()) {
            return Err(ValidationError::UnknownCourse(form.course_id).into());
        }

        // Lock order: store, then session.
        let mut store = self.write_store()?;
        let record = submission::submit(&mut store, form)?;
        let warning = store.persistence_warning().cloned();

        let mut session = self.session.lock().map_err(|_| CoreError::LockPoisoned)?;
        session.view = View::Status;
        session.track_query = record.id.clone();
        session.last_result = TrackOutcome::Found(Box::new(record.clone()));

        Ok(SubmissionReceipt { record, warning })
    }

    // ── Tracking ────────────────────────────────────────────

    /// Look up an application by reference ID.
    ///
    /// A blank query leaves the previous result on screen.
    pub fn track(&self, query: &str) -> Result<TrackOutcome, CoreError> {
        let store = self.read_store()?;
        let outcome = tracking::track(&store, query);
        if outcome != TrackOutcome::Idle {
            let mut session = self.session.lock().map_err(|_| CoreError::LockPoisoned)?;
            session.track_query = query.trim().to_string();
            session.last_result = outcome.clone();
        }
        Ok(outcome)
    }

    // ── Admin ───────────────────────────────────────────────

    pub fn is_admin(&self) -> bool {
        self.admin_authenticated.load(Ordering::SeqCst)
    }

    /// Check the static credentials. On success sets the admin flag, opens the
    /// dashboard and returns a fresh bearer token (replacing any earlier one).
    pub fn login_admin(&self, username: &str, password: &str) -> Result<String, CoreError> {
        if !self.credentials.verify(username, password) {
            tracing::warn!("Rejected admin sign-in attempt");
            return Err(CoreError::InvalidCredentials);
        }
        let token = admin::generate_token();
        {
            let mut slot = self.admin_token.lock().map_err(|_| CoreError::LockPoisoned)?;
            *slot = Some(admin::hash_token(&token));
        }
        self.admin_authenticated.store(true, Ordering::SeqCst);
        self.set_view(View::Admin)?;
        tracing::info!("Admin signed in");
        Ok(token)
    }

    /// Whether `token` is the bearer token of the live admin session.
    pub fn validate_admin_token(&self, token: &str) -> bool {
        if !self.is_admin() {
            return false;
        }
        let Ok(slot) = self.admin_token.lock() else {
            return false;
        };
        match slot.as_ref() {
            Some(expected) => expected[..].ct_eq(&admin::hash_token(token)[..]).into(),
            None => false,
        }
    }

    /// Sign out: clear the flag and token, return to the home screen.
    pub fn logout_admin(&self) -> Result<(), CoreError> {
        self.admin_authenticated.store(false, Ordering::SeqCst);
        {
            let mut slot = self.admin_token.lock().map_err(|_| CoreError::LockPoisoned)?;
            *slot = None;
        }
        self.set_view(View::Home)?;
        tracing::info!("Admin signed out");
        Ok(())
    }

    fn require_admin(&self) -> Result<(), CoreError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(CoreError::NotAuthorized)
        }
    }

    pub fn list_applications(&self) -> Result<Vec<ReviewEntry>, CoreError> {
        self.require_admin()?;
        Ok(admin::list_all(&*self.read_store()?))
    }

    /// Review list and totals taken from the same snapshot of the store.
    pub fn review_snapshot(&self) -> Result<(Vec<ReviewEntry>, DashboardSummary), CoreError> {
        self.require_admin()?;
        let store = self.read_store()?;
        Ok((admin::list_all(&store), admin::dashboard_summary(&store)))
    }

    /// Change one application's status. A tracking result currently on
    /// screen for the same application is refreshed.
    pub fn set_status(&self, id: &str, status: ApplicationStatus) -> Result<StatusChange, CoreError> {
        self.require_admin()?;

        let mut store = self.write_store()?;
        let found = store.contains_id(id);
        admin::set_status(&mut store, id, status);

        if found {
            let mut session = self.session.lock().map_err(|_| CoreError::LockPoisoned)?;
            if let TrackOutcome::Found(ref mut shown) = session.last_result {
                if shown.id == id {
                    shown.status = status;
                }
            }
        }

        let applications = admin::list_all(&store);
        let warning = store.persistence_warning().cloned();

        Ok(StatusChange {
            found,
            applications,
            warning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_core() -> CoreState {
        CoreState::with_storage(
            MemoryBlobStorage::new(),
            SeedPolicy::DemoRecords,
            AdminCredentials::new("admin", "secret"),
        )
    }

    fn carol() -> ApplicationForm {
        ApplicationForm {
            full_name: "Carol Lee".into(),
            email: "carol@x.com".into(),
            course_id: "CSE-001".into(),
            percentage: Some(88.0),
            ..Default::default()
        }
    }

    #[test]
    fn admin_view_requires_login() {
        assert_eq!(resolve_view(View::Admin, false), View::AdminLogin);
        assert_eq!(resolve_view(View::Admin, true), View::Admin);
        assert_eq!(resolve_view(View::Courses, false), View::Courses);

        let core = test_core();
        assert_eq!(core.current_view().unwrap(), View::Home);
        assert_eq!(core.navigate(View::Admin).unwrap(), View::AdminLogin);
        assert_eq!(core.current_view().unwrap(), View::AdminLogin);
    }

    #[test]
    fn submit_then_track_any_case() {
        let core = CoreState::with_storage(
            MemoryBlobStorage::new(),
            SeedPolicy::Empty,
            AdminCredentials::new("admin", "secret"),
        );
        let receipt = core.submit_application(carol()).unwrap();
        assert!(receipt.warning.is_none());
        assert_eq!(receipt.record.status, ApplicationStatus::Submitted);

        let session = core.session().unwrap();
        assert_eq!(session.view, View::Status);
        assert_eq!(session.track_query, receipt.record.id);

        let outcome = core.track(&receipt.record.id.to_lowercase()).unwrap();
        assert_eq!(outcome.record(), Some(&receipt.record));
    }

    #[test]
    fn submission_with_unknown_course_is_rejected() {
        let core = test_core();
        let form = ApplicationForm {
            course_id: "BIO-001".into(),
            ..carol()
        };
        let err = core.submit_application(form).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::UnknownCourse(_))
        ));
        assert_eq!(core.read_store().unwrap().len(), 2);
    }

    #[test]
    fn blank_track_keeps_previous_result() {
        let core = test_core();
        core.track("APP-VPN2024A").unwrap();
        assert_eq!(core.track("  ").unwrap(), TrackOutcome::Idle);
        assert!(core.session().unwrap().last_result.is_found());
    }

    #[test]
    fn admin_operations_need_login() {
        let core = test_core();
        assert!(matches!(
            core.list_applications(),
            Err(CoreError::NotAuthorized)
        ));
        assert!(matches!(
            core.set_status("APP-VPN2024B", ApplicationStatus::Approved),
            Err(CoreError::NotAuthorized)
        ));
        assert!(matches!(
            core.login_admin("admin", "wrong"),
            Err(CoreError::InvalidCredentials)
        ));
        assert!(!core.is_admin());
    }

    #[test]
    fn login_issues_token_and_logout_revokes_it() {
        let core = test_core();
        let token = core.login_admin("admin", "secret").unwrap();
        assert!(core.is_admin());
        assert_eq!(core.current_view().unwrap(), View::Admin);
        assert!(core.validate_admin_token(&token));
        assert!(!core.validate_admin_token("forged"));

        let second = core.login_admin("admin", "secret").unwrap();
        assert!(!core.validate_admin_token(&token));
        assert!(core.validate_admin_token(&second));

        core.logout_admin().unwrap();
        assert!(!core.is_admin());
        assert!(!core.validate_admin_token(&second));
        assert_eq!(core.current_view().unwrap(), View::Home);
    }

    #[test]
    fn status_change_refreshes_displayed_result() {
        let core = test_core();
        core.track("app-vpn2024b").unwrap();
        core.login_admin("admin", "secret").unwrap();

        let change = core
            .set_status("APP-VPN2024B", ApplicationStatus::Approved)
            .unwrap();
        assert!(change.found);
        let bob = change
            .applications
            .iter()
            .find(|e| e.record.id == "APP-VPN2024B")
            .unwrap();
        assert_eq!(bob.step, 3);

        let shown = core.session().unwrap().last_result;
        assert_eq!(
            shown.record().map(|r| r.status),
            Some(ApplicationStatus::Approved)
        );
    }

    #[test]
    fn review_snapshot_totals_match_list() {
        let core = test_core();
        assert!(matches!(core.review_snapshot(), Err(CoreError::NotAuthorized)));

        core.login_admin("admin", "secret").unwrap();
        core.submit_application(carol()).unwrap();
        let (entries, summary) = core.review_snapshot().unwrap();
        assert_eq!(entries.len(), summary.total);
        assert_eq!(summary.submitted, 1);
    }

    #[test]
    fn concurrent_status_changes_leave_display_matching_store() {
        let core = std::sync::Arc::new(test_core());
        core.track("APP-VPN2024B").unwrap();
        core.login_admin("admin", "secret").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let core = core.clone();
                std::thread::spawn(move || {
                    let status = if i % 2 == 0 {
                        ApplicationStatus::Approved
                    } else {
                        ApplicationStatus::Rejected
                    };
                    core.set_status("APP-VPN2024B", status).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stored = core
            .read_store()
            .unwrap()
            .find_exact("APP-VPN2024B")
            .map(|r| r.status);
        let shown = core.session().unwrap().last_result.record().map(|r| r.status);
        assert_eq!(shown, stored);
    }

    #[test]
    fn status_change_for_unknown_id_reports_not_found() {
        let core = test_core();
        core.login_admin("admin", "secret").unwrap();
        let change = core
            .set_status("NOPE-404", ApplicationStatus::Approved)
            .unwrap();
        assert!(!change.found);
        assert_eq!(change.applications.len(), 2);
    }

    #[test]
    fn open_uses_file_storage_in_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = PortalConfig {
            data_dir: tmp.path().to_path_buf(),
            seed: SeedPolicy::DemoRecords,
            ..PortalConfig::default()
        };
        let core = CoreState::open(&config);
        assert_eq!(core.data_dir.as_deref(), Some(tmp.path()));
        assert!(tmp.path().join("vpn_applications.json").exists());
    }
}
