// ── Dashboard user domain type ──

use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// A dashboard account. Deletion is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: Option<String>,
    pub created_at: Option<Timestamp>,
    pub last_login: Option<Timestamp>,
}
