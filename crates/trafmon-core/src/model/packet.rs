// ── Captured packet domain types ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// One side of a packet: address plus optional port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub ip: String,
    pub port: Option<u16>,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{port}", self.ip),
            None => f.write_str(&self.ip),
        }
    }
}

/// Summary of one captured packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    pub timestamp: super::Timestamp,
    pub source: Endpoint,
    pub destination: Endpoint,
    pub protocol: Option<String>,
    pub length: u64,
    pub flags: Option<String>,
}
