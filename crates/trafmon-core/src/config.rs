// ── Runtime dashboard configuration ──
//
// Describes *how* to reach the backend and how often to poll it. Never
// touches disk: the CLI/TUI builds a `DashboardConfig` (usually through
// trafmon-config) and hands it in.

use std::time::Duration;

use url::Url;

/// Default poll period for the refresh cycle.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed proxies).
    DangerAcceptInvalid,
}

/// Configuration for one backend.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Backend root URL (e.g., `http://127.0.0.1:5000`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Period of the background refresh cycle.
    pub refresh_interval: Duration,
}

impl DashboardConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: None,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}
