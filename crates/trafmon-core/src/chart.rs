// ── Chart models ──
//
// Renderer-agnostic state for the two dashboard charts: a time series of
// incoming/outgoing bytes and a protocol distribution donut. Both are
// constructed once with fixed presentation settings and then have their
// data replaced wholesale on every traffic update.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::model::{Protocol, TrafficSample};

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

pub const INCOMING_COLOR: Rgb = Rgb(75, 192, 192);
pub const OUTGOING_COLOR: Rgb = Rgb(255, 99, 132);

/// Slice colour of a protocol bucket in the distribution chart.
pub fn protocol_color(protocol: Protocol) -> Rgb {
    match protocol {
        Protocol::Tcp => Rgb(255, 99, 132),
        Protocol::Udp => Rgb(54, 162, 235),
        Protocol::Icmp => Rgb(255, 205, 86),
        Protocol::Other => Rgb(75, 192, 192),
    }
}

// ── Traffic time series ─────────────────────────────────────────────

/// A labelled data series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub label: &'static str,
    pub color: Rgb,
    pub data: Vec<u64>,
}

/// Line chart of bytes in/out per sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrafficChart {
    /// One x-axis label per sample, local wall-clock time.
    pub labels: Vec<String>,
    pub incoming: Series,
    pub outgoing: Series,
    /// The y-axis always starts at zero.
    pub begin_at_zero: bool,
}

impl TrafficChart {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            incoming: Series {
                label: "Incoming Traffic (bytes)",
                color: INCOMING_COLOR,
                data: Vec::new(),
            },
            outgoing: Series {
                label: "Outgoing Traffic (bytes)",
                color: OUTGOING_COLOR,
                data: Vec::new(),
            },
            begin_at_zero: true,
        }
    }

    /// Replace every label and data point with the given samples, in order.
    pub fn replace(&mut self, samples: &[TrafficSample]) {
        self.labels = samples.iter().map(|s| s.timestamp.time_label()).collect();
        self.incoming.data = samples.iter().map(|s| s.incoming_bytes).collect();
        self.outgoing.data = samples.iter().map(|s| s.outgoing_bytes).collect();
    }

    /// Largest value across both series (0 when empty).
    pub fn max_value(&self) -> u64 {
        self.incoming
            .data
            .iter()
            .chain(&self.outgoing.data)
            .copied()
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for TrafficChart {
    fn default() -> Self {
        Self::new()
    }
}

// ── Protocol distribution ───────────────────────────────────────────

/// Sample counts per protocol bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolTally {
    pub tcp: u64,
    pub udp: u64,
    pub icmp: u64,
    pub other: u64,
}

impl ProtocolTally {
    /// Count samples per bucket; unknown protocols go to `Other`.
    pub fn from_samples(samples: &[TrafficSample]) -> Self {
        let mut tally = Self::default();
        for sample in samples {
            *tally.slot_mut(sample.protocol_class()) += 1;
        }
        tally
    }

    pub fn get(&self, protocol: Protocol) -> u64 {
        match protocol {
            Protocol::Tcp => self.tcp,
            Protocol::Udp => self.udp,
            Protocol::Icmp => self.icmp,
            Protocol::Other => self.other,
        }
    }

    fn slot_mut(&mut self, protocol: Protocol) -> &mut u64 {
        match protocol {
            Protocol::Tcp => &mut self.tcp,
            Protocol::Udp => &mut self.udp,
            Protocol::Icmp => &mut self.icmp,
            Protocol::Other => &mut self.other,
        }
    }

    pub fn total(&self) -> u64 {
        self.tcp + self.udp + self.icmp + self.other
    }

    /// Buckets in fixed display order: TCP, UDP, ICMP, Other.
    pub fn iter(&self) -> impl Iterator<Item = (Protocol, u64)> + '_ {
        Protocol::iter().map(|p| (p, self.get(p)))
    }
}

/// Donut chart of the protocol tally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProtocolChart {
    pub tally: ProtocolTally,
}

impl ProtocolChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, samples: &[TrafficSample]) {
        self.tally = ProtocolTally::from_samples(samples);
    }

    /// `(label, colour, count)` per slice, in display order.
    pub fn slices(&self) -> impl Iterator<Item = (&'static str, Rgb, u64)> + '_ {
        self.tally
            .iter()
            .map(|(p, count)| {
                let label: &'static str = p.into();
                (label, protocol_color(p), count)
            })
    }
}

// ── Both charts ─────────────────────────────────────────────────────

/// The dashboard's two chart models.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Charts {
    pub traffic: TrafficChart,
    pub protocols: ProtocolChart,
}

impl Charts {
    /// Empty charts with their fixed presentation settings.
    pub fn new() -> Self {
        Self {
            traffic: TrafficChart::new(),
            protocols: ProtocolChart::new(),
        }
    }

    /// Replace both datasets from one traffic response.
    pub fn update(&mut self, samples: &[TrafficSample]) {
        self.traffic.replace(samples);
        self.protocols.replace(samples);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Timestamp;

    fn sample(ts: &str, incoming: u64, outgoing: u64, protocol: Option<&str>) -> TrafficSample {
        TrafficSample {
            timestamp: Timestamp::Raw(ts.into()),
            incoming_bytes: incoming,
            outgoing_bytes: outgoing,
            protocol: protocol.map(str::to_owned),
        }
    }

    #[test]
    fn new_charts_are_empty_with_fixed_settings() {
        let charts = Charts::new();
        assert!(charts.traffic.is_empty());
        assert!(charts.traffic.begin_at_zero);
        assert_eq!(charts.traffic.incoming.label, "Incoming Traffic (bytes)");
        assert_eq!(charts.traffic.outgoing.color.to_string(), "rgb(255, 99, 132)");
        assert_eq!(charts.protocols.tally.total(), 0);
        let labels: Vec<_> = charts.protocols.slices().map(|(l, _, _)| l).collect();
        assert_eq!(labels, ["TCP", "UDP", "ICMP", "Other"]);
    }

    #[test]
    fn two_samples_fill_both_charts() {
        let samples = [
            sample("t1", 10, 20, Some("TCP")),
            sample("t2", 30, 5, Some("UDP")),
        ];
        let mut charts = Charts::new();
        charts.update(&samples);

        assert_eq!(charts.traffic.labels, ["t1", "t2"]);
        assert_eq!(charts.traffic.incoming.data, [10, 30]);
        assert_eq!(charts.traffic.outgoing.data, [20, 5]);
        assert_eq!(
            charts.protocols.tally,
            ProtocolTally {
                tcp: 1,
                udp: 1,
                icmp: 0,
                other: 0,
            }
        );
        assert_eq!(charts.traffic.max_value(), 30);
    }

    #[test]
    fn unknown_protocols_count_as_other() {
        let samples = [
            sample("a", 1, 1, Some("tcp")),
            sample("b", 1, 1, Some("GRE")),
            sample("c", 1, 1, None),
            sample("d", 1, 1, Some("ICMP")),
        ];
        let tally = ProtocolTally::from_samples(&samples);
        assert_eq!(tally.other, 3);
        assert_eq!(tally.icmp, 1);
        assert_eq!(tally.total(), samples.len() as u64);
    }

    #[test]
    fn update_replaces_rather_than_appends() {
        let mut charts = Charts::new();
        charts.update(&[sample("t1", 1, 2, Some("TCP")), sample("t2", 3, 4, Some("TCP"))]);
        charts.update(&[sample("t3", 9, 9, Some("UDP"))]);

        assert_eq!(charts.traffic.labels, ["t3"]);
        assert_eq!(charts.traffic.incoming.data, [9]);
        assert_eq!(charts.protocols.tally.tcp, 0);
        assert_eq!(charts.protocols.tally.udp, 1);
    }
}
