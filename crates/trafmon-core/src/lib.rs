// trafmon-core: Dashboard controller and view models between trafmon-api and the CLI/TUI.

pub mod chart;
pub mod config;
pub mod confirm;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod render;
pub mod store;
pub mod table;

// ── Primary re-exports ──────────────────────────────────────────────
pub use chart::{Charts, ProtocolChart, ProtocolTally, Rgb, Series, TrafficChart};
pub use config::{DashboardConfig, TlsVerification, DEFAULT_REFRESH_INTERVAL};
pub use confirm::{ActionOutcome, Confirm, Preapproved, DELETE_USER_PROMPT};
pub use dashboard::Dashboard;
pub use error::CoreError;
pub use store::{ListView, TrafficView, Versioned, ViewStore};
pub use table::{ActionKind, RowAction, TableId, TableRow, TableView};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Alert, Endpoint, Interface, Packet, Protocol, Resource, Timestamp, TrafficSample,
    TrafficSummary, TrendPoint, User,
};
