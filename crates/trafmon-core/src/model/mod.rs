// ── Dashboard domain model ──
//
// Canonical shapes of the backend records after wire-level quirks have been
// smoothed over by `convert`. Consumers (CLI/TUI) depend on these, never on
// the raw `trafmon_api` models.

pub mod alert;
pub mod interface;
pub mod packet;
pub mod resource;
pub mod timestamp;
pub mod traffic;
pub mod user;

// ── Re-exports ──────────────────────────────────────────────────────

pub use alert::Alert;
pub use interface::Interface;
pub use packet::{Endpoint, Packet};
pub use resource::Resource;
pub use timestamp::Timestamp;
pub use traffic::{Protocol, TrafficSample, TrafficSummary, TrendPoint};
pub use user::User;
