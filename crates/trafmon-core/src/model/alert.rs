// ── Alert domain type ──

use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// A detection alert raised by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub timestamp: Timestamp,
    pub alert_type: String,
    pub severity: Option<String>,
    pub description: Option<String>,
    /// Goes `false` → `true` through the resolve action, never back.
    pub is_resolved: bool,
}

impl Alert {
    pub fn status_label(&self) -> &'static str {
        if self.is_resolved { "Resolved" } else { "Active" }
    }
}
