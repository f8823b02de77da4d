// Backend API response types
//
// Models for the traffic monitor's JSON API. Endpoints return bare JSON
// arrays (no envelope). Fields use `#[serde(default)]` liberally because
// the backend serializes nullable database columns as `null` or omits them.
// Timestamps stay as raw strings here; `trafmon-core` parses them.

use serde::{Deserialize, Serialize};

// ── Traffic ──────────────────────────────────────────────────────────

/// One traffic sample from `GET /api/traffic`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiTrafficSample {
    pub timestamp: String,
    #[serde(default)]
    pub incoming_bytes: u64,
    #[serde(default)]
    pub outgoing_bytes: u64,
    #[serde(default)]
    pub protocol: Option<String>,
}

/// Aggregate counters from `GET /api/traffic_stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiTrafficStats {
    #[serde(default)]
    pub total_packets: u64,
    #[serde(default)]
    pub total_bytes: u64,
    #[serde(default)]
    pub active_connections: u64,
    #[serde(default)]
    pub alert_count: u64,
}

/// One minute bucket from `GET /api/traffic_trend`.
///
/// `time` is the bucket start as `HH:MM` in the backend's local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiTrendPoint {
    pub time: String,
    #[serde(default)]
    pub bytes: u64,
}

// ── Interfaces ───────────────────────────────────────────────────────

/// Network interface from `GET /api/interfaces`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInterface {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    /// `"up"` / `"down"`, free-form on the backend side.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_monitored: bool,
}

// ── Alerts ───────────────────────────────────────────────────────────

/// Alert from `GET /api/alerts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAlert {
    pub id: i64,
    pub timestamp: String,
    pub alert_type: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_resolved: bool,
}

// ── Packets ──────────────────────────────────────────────────────────

/// Captured packet summary from `GET /api/packets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPacket {
    pub timestamp: String,
    pub source_ip: String,
    #[serde(default)]
    pub source_port: Option<u16>,
    pub destination_ip: String,
    #[serde(default)]
    pub destination_port: Option<u16>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub length: u64,
    #[serde(default)]
    pub flags: Option<String>,
}

// ── Users ────────────────────────────────────────────────────────────

/// Dashboard user from `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUser {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}

// ── Action replies ──────────────────────────────────────────────────

/// What a mutating endpoint answered with.
///
/// Any JSON body counts as delivered, whatever the status. The status is
/// kept so callers can still report a rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionReply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ActionReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The status as an [`Error::Http`](crate::Error::Http), unless it was a success.
    pub fn rejection(&self) -> Option<crate::Error> {
        if self.is_success() {
            return None;
        }
        let message = self
            .body
            .get("error")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| self.body.to_string(), str::to_owned);
        Some(crate::Error::Http {
            status: self.status,
            message,
        })
    }
}
