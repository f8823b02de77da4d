//! Shared configuration for the trafmon CLI and TUI.
//!
//! TOML profiles layered with `TRAFMON_*` environment variables, and
//! translation to `trafmon_core::DashboardConfig`. Both binaries depend on
//! this crate; the CLI adds `GlobalOpts`-aware overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use trafmon_core::{DashboardConfig, TlsVerification};

/// Backend address used when no profile names one.
pub const DEFAULT_URL: &str = "http://127.0.0.1:5000";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in {}", path.display())]
    UnknownProfile { name: String, path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Seconds between background refreshes.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,

    /// Request timeout in seconds. Unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            refresh_interval: default_refresh_interval(),
            timeout: None,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_refresh_interval() -> u64 {
    trafmon_core::DEFAULT_REFRESH_INTERVAL.as_secs()
}

/// A named backend profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "http://127.0.0.1:5000").
    #[serde(default = "default_url")]
    pub url: String,

    /// Override request timeout (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Override refresh interval (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<u64>,

    /// Accept invalid TLS certificates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Path to a custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: None,
            refresh_interval: None,
            insecure: None,
            ca_cert: None,
        }
    }
}

fn default_url() -> String {
    DEFAULT_URL.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "trafmon", "trafmon").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("trafmon");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from a specific file, then `TRAFMON_*` env vars.
///
/// Nested keys use a double underscore:
/// `TRAFMON_DEFAULTS__REFRESH_INTERVAL=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TRAFMON_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

impl Config {
    /// Name of the profile to use: explicit, then `default_profile`.
    pub fn profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Look up a profile by name.
    ///
    /// A missing profile named `default` resolves to the local backend at
    /// [`DEFAULT_URL`].
    pub fn resolve_profile(&self, requested: Option<&str>) -> Result<(String, Profile), ConfigError> {
        let name = self.profile_name(requested);
        if let Some(profile) = self.profiles.get(&name) {
            return Ok((name, profile.clone()));
        }
        if name == "default" {
            return Ok((name, Profile::default()));
        }
        Err(ConfigError::UnknownProfile {
            name,
            path: config_path(),
        })
    }
}

/// Build a `DashboardConfig` from a profile and the global defaults,
/// with no CLI overrides.
pub fn profile_to_dashboard_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<DashboardConfig, ConfigError> {
    let url: url::Url = profile.url.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {}", profile.url),
    })?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = profile
        .timeout
        .or(defaults.timeout)
        .map(Duration::from_secs);
    let refresh_interval =
        Duration::from_secs(profile.refresh_interval.unwrap_or(defaults.refresh_interval));

    Ok(DashboardConfig {
        url,
        tls,
        timeout,
        refresh_interval,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_poll_every_five_seconds_without_timeout() {
        let cfg = Config::default();
        let (name, profile) = cfg.resolve_profile(None).unwrap();
        assert_eq!(name, "default");

        let dash = profile_to_dashboard_config(&profile, &cfg.defaults).unwrap();
        assert_eq!(dash.url.as_str(), "http://127.0.0.1:5000/");
        assert_eq!(dash.refresh_interval, Duration::from_secs(5));
        assert!(dash.timeout.is_none());
        assert_eq!(dash.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn profile_overrides_defaults() {
        let defaults = Defaults {
            timeout: Some(10),
            ..Defaults::default()
        };
        let profile = Profile {
            url: "https://monitor.lan".into(),
            timeout: Some(3),
            refresh_interval: Some(15),
            insecure: Some(true),
            ca_cert: Some("/etc/ca.pem".into()),
        };
        let dash = profile_to_dashboard_config(&profile, &defaults).unwrap();
        assert_eq!(dash.timeout, Some(Duration::from_secs(3)));
        assert_eq!(dash.refresh_interval, Duration::from_secs(15));
        assert_eq!(dash.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn ca_cert_is_used_when_not_insecure() {
        let profile = Profile {
            ca_cert: Some("/etc/ca.pem".into()),
            ..Profile::default()
        };
        let dash = profile_to_dashboard_config(&profile, &Defaults::default()).unwrap();
        assert_eq!(dash.tls, TlsVerification::CustomCa("/etc/ca.pem".into()));
    }

    #[test]
    fn bad_url_is_a_validation_error() {
        let profile = Profile {
            url: "not a url".into(),
            ..Profile::default()
        };
        let err = profile_to_dashboard_config(&profile, &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "url"));
    }

    #[test]
    fn unknown_named_profile_is_an_error() {
        let mut cfg = Config::default();
        cfg.profiles.insert("lab".into(), Profile::default());
        assert!(matches!(
            cfg.resolve_profile(Some("prod")),
            Err(ConfigError::UnknownProfile { .. })
        ));
        assert_eq!(cfg.resolve_profile(Some("lab")).unwrap().0, "lab");
    }

    #[test]
    fn file_round_trips_through_figment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "lab"

[defaults]
output = "json"
refresh_interval = 2

[profiles.lab]
url = "http://10.0.0.5:5000"
timeout = 20
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.color, "auto");
        let (name, profile) = cfg.resolve_profile(None).unwrap();
        assert_eq!(name, "lab");
        assert_eq!(profile.url, "http://10.0.0.5:5000");

        let dash = profile_to_dashboard_config(&profile, &cfg.defaults).unwrap();
        assert_eq!(dash.refresh_interval, Duration::from_secs(2));
        assert_eq!(dash.timeout, Some(Duration::from_secs(20)));

        let out = dir.path().join("nested").join("saved.toml");
        save_config_to(&cfg, &out).unwrap();
        let reloaded = load_config_from(&out).unwrap();
        assert_eq!(reloaded.profiles["lab"].timeout, Some(20));
    }
}
