// ── Network interface domain type ──

use serde::{Deserialize, Serialize};

/// A capture interface known to the backend.
///
/// `is_monitored` only changes remotely, through the toggle endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub id: i64,
    pub name: String,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub status: Option<String>,
    pub is_monitored: bool,
}
