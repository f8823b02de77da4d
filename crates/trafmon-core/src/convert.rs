// ── API-to-domain type conversions ──
//
// Bridges raw `trafmon_api` response types into `trafmon_core::model`
// domain types. Timestamps are parsed here; blank optional strings are
// folded into `None` so the renderers only ever deal with one "absent".

use trafmon_api::{
    ApiAlert, ApiInterface, ApiPacket, ApiTrafficSample, ApiTrafficStats, ApiTrendPoint, ApiUser,
};

use crate::model::{
    Alert, Endpoint, Interface, Packet, Timestamp, TrafficSample, TrafficSummary, TrendPoint, User,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Treat empty / whitespace-only strings the same as a missing field.
fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

fn parse_optional_timestamp(raw: Option<String>) -> Option<Timestamp> {
    non_blank(raw).map(|s| Timestamp::parse(&s))
}

// ── Traffic ────────────────────────────────────────────────────────

impl From<ApiTrafficSample> for TrafficSample {
    fn from(raw: ApiTrafficSample) -> Self {
        Self {
            timestamp: Timestamp::parse(&raw.timestamp),
            incoming_bytes: raw.incoming_bytes,
            outgoing_bytes: raw.outgoing_bytes,
            protocol: non_blank(raw.protocol),
        }
    }
}

impl From<ApiTrafficStats> for TrafficSummary {
    fn from(raw: ApiTrafficStats) -> Self {
        Self {
            total_packets: raw.total_packets,
            total_bytes: raw.total_bytes,
            active_connections: raw.active_connections,
            alert_count: raw.alert_count,
        }
    }
}

impl From<ApiTrendPoint> for TrendPoint {
    fn from(raw: ApiTrendPoint) -> Self {
        Self {
            time: raw.time,
            bytes: raw.bytes,
        }
    }
}

// ── Interfaces ─────────────────────────────────────────────────────

impl From<ApiInterface> for Interface {
    fn from(raw: ApiInterface) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            ip_address: non_blank(raw.ip_address),
            mac_address: non_blank(raw.mac_address),
            status: non_blank(raw.status),
            is_monitored: raw.is_monitored,
        }
    }
}

// ── Alerts ─────────────────────────────────────────────────────────

impl From<ApiAlert> for Alert {
    fn from(raw: ApiAlert) -> Self {
        Self {
            id: raw.id,
            timestamp: Timestamp::parse(&raw.timestamp),
            alert_type: raw.alert_type,
            severity: non_blank(raw.severity),
            description: non_blank(raw.description),
            is_resolved: raw.is_resolved,
        }
    }
}

// ── Packets ────────────────────────────────────────────────────────

impl From<ApiPacket> for Packet {
    fn from(raw: ApiPacket) -> Self {
        Self {
            timestamp: Timestamp::parse(&raw.timestamp),
            source: Endpoint {
                ip: raw.source_ip,
                port: raw.source_port,
            },
            destination: Endpoint {
                ip: raw.destination_ip,
                port: raw.destination_port,
            },
            protocol: non_blank(raw.protocol),
            length: raw.length,
            flags: non_blank(raw.flags),
        }
    }
}

// ── Users ──────────────────────────────────────────────────────────

impl From<ApiUser> for User {
    fn from(raw: ApiUser) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            role: non_blank(raw.role),
            created_at: parse_optional_timestamp(raw.created_at),
            last_login: parse_optional_timestamp(raw.last_login),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_become_none() {
        let iface = Interface::from(ApiInterface {
            id: 1,
            name: "eth0".into(),
            ip_address: Some(String::new()),
            mac_address: Some("  ".into()),
            status: Some("up".into()),
            is_monitored: false,
        });
        assert_eq!(iface.ip_address, None);
        assert_eq!(iface.mac_address, None);
        assert_eq!(iface.status.as_deref(), Some("up"));
    }

    #[test]
    fn user_without_login_has_no_timestamp() {
        let user = User::from(ApiUser {
            id: 4,
            name: "carol".into(),
            role: Some("analyst".into()),
            created_at: Some("2024-01-01T00:00:00".into()),
            last_login: None,
        });
        assert!(user.last_login.is_none());
        assert!(matches!(user.created_at, Some(Timestamp::Parsed(_))));
    }

    #[test]
    fn packet_endpoints_carry_ports() {
        let packet = Packet::from(ApiPacket {
            timestamp: "not a time".into(),
            source_ip: "10.0.0.2".into(),
            source_port: Some(51514),
            destination_ip: "10.0.0.1".into(),
            destination_port: Some(53),
            protocol: Some("UDP".into()),
            length: 74,
            flags: Some(String::new()),
        });
        assert_eq!(packet.source.to_string(), "10.0.0.2:51514");
        assert_eq!(packet.destination.to_string(), "10.0.0.1:53");
        assert_eq!(packet.timestamp, Timestamp::Raw("not a time".into()));
        assert_eq!(packet.flags, None);
    }
}
