// ── Traffic domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

use super::timestamp::Timestamp;

/// Protocol bucket used by the distribution chart.
///
/// Only the exact upper-case names `TCP`, `UDP` and `ICMP` get their own
/// bucket; every other value (including lower-case spellings and a missing
/// protocol) lands in `Other`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
pub enum Protocol {
    #[strum(serialize = "TCP")]
    #[serde(rename = "TCP")]
    Tcp,
    #[strum(serialize = "UDP")]
    #[serde(rename = "UDP")]
    Udp,
    #[strum(serialize = "ICMP")]
    #[serde(rename = "ICMP")]
    Icmp,
    Other,
}

impl Protocol {
    pub fn classify(raw: Option<&str>) -> Self {
        match raw {
            Some("TCP") => Self::Tcp,
            Some("UDP") => Self::Udp,
            Some("ICMP") => Self::Icmp,
            _ => Self::Other,
        }
    }
}

/// One traffic sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficSample {
    pub timestamp: Timestamp,
    pub incoming_bytes: u64,
    pub outgoing_bytes: u64,
    /// Protocol as reported by the backend, unnormalized.
    pub protocol: Option<String>,
}

impl TrafficSample {
    pub fn protocol_class(&self) -> Protocol {
        Protocol::classify(self.protocol.as_deref())
    }
}

/// Aggregate counters for the traffic header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficSummary {
    pub total_packets: u64,
    pub total_bytes: u64,
    pub active_connections: u64,
    pub alert_count: u64,
}

/// One bucket of the recent byte-volume trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Bucket label as sent by the backend (`HH:MM`).
    pub time: String,
    pub bytes: u64,
}
