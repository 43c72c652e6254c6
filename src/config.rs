use std::net::SocketAddr;
use std::path::PathBuf;

use crate::store::SeedPolicy;

/// Application-level constants
pub const APP_NAME: &str = "Admissions Portal";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const COLLEGE_NAME: &str = "V.P.N College of Engineering and Technology";

/// Key of the single persisted blob holding every application.
pub const STORAGE_KEY: &str = "vpn_applications";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "vpn-admin";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,admissions_lib=debug,tower_http=info"
}

/// Get the application data directory.
///
/// `ADMISSIONS_DATA_DIR` wins; otherwise the platform data dir
/// (`~/.local/share/AdmissionsPortal` on Linux), falling back to the
/// working directory when the platform gives none.
pub fn app_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("ADMISSIONS_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("AdmissionsPortal")
}

/// Runtime settings for the portal service.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub admin_username: String,
    pub admin_password: String,
    pub seed: SeedPolicy,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            data_dir: app_data_dir(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8787)),
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            seed: SeedPolicy::DemoRecords,
        }
    }
}

impl PortalConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup. Invalid values fall
    /// back to defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(dir) = lookup("ADMISSIONS_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            cfg.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup("ADMISSIONS_BIND") {
            match raw.trim().parse::<SocketAddr>() {
                Ok(addr) => cfg.bind_addr = addr,
                Err(e) => tracing::warn!(
                    value = %raw,
                    "Ignoring invalid ADMISSIONS_BIND ({e}), using {DEFAULT_BIND_ADDR}"
                ),
            }
        }

        if let Some(user) = lookup("ADMISSIONS_ADMIN_USER").filter(|v| !v.trim().is_empty()) {
            cfg.admin_username = user.trim().to_string();
        }
        if let Some(password) = lookup("ADMISSIONS_ADMIN_PASSWORD").filter(|v| !v.is_empty()) {
            cfg.admin_password = password;
        }

        if let Some(raw) = lookup("ADMISSIONS_SEED_DEMO") {
            cfg.seed = match raw.trim().to_ascii_lowercase().as_str() {
                "0" | "false" | "no" | "off" => SeedPolicy::Empty,
                _ => SeedPolicy::DemoRecords,
            };
        }

        cfg
    }

    pub fn uses_default_admin_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn app_data_dir_ends_with_app_folder_or_override() {
        let dir = app_data_dir();
        if std::env::var_os("ADMISSIONS_DATA_DIR").is_none() {
            assert!(dir.ends_with("AdmissionsPortal"));
        }
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = PortalConfig::from_lookup(|_| None);
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.admin_username, "admin");
        assert_eq!(cfg.seed, SeedPolicy::DemoRecords);
        assert!(cfg.uses_default_admin_password());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = PortalConfig::from_lookup(lookup_from(&[
            ("ADMISSIONS_DATA_DIR", "/tmp/admissions"),
            ("ADMISSIONS_BIND", "0.0.0.0:9000"),
            ("ADMISSIONS_ADMIN_USER", " registrar "),
            ("ADMISSIONS_ADMIN_PASSWORD", "s3cret"),
            ("ADMISSIONS_SEED_DEMO", "off"),
        ]));
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/admissions"));
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.admin_username, "registrar");
        assert_eq!(cfg.admin_password, "s3cret");
        assert_eq!(cfg.seed, SeedPolicy::Empty);
        assert!(!cfg.uses_default_admin_password());
    }

    #[test]
    fn invalid_bind_address_falls_back_to_default() {
        let cfg = PortalConfig::from_lookup(lookup_from(&[("ADMISSIONS_BIND", "not-an-addr")]));
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
