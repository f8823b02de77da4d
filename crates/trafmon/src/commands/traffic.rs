//! Traffic command handlers.

use std::fmt::Write as _;

use serde::Serialize;
use tabled::Tabled;
use trafmon_core::{Dashboard, Resource, TrafficSample, TrafficSummary, TrendPoint};

use crate::cli::{GlobalOpts, TrafficArgs, TrafficCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SampleRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Incoming")]
    incoming: String,
    #[tabled(rename = "Outgoing")]
    outgoing: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
}

impl From<&TrafficSample> for SampleRow {
    fn from(s: &TrafficSample) -> Self {
        Self {
            time: s.timestamp.datetime_label(),
            incoming: util::bytes(s.incoming_bytes),
            outgoing: util::bytes(s.outgoing_bytes),
            protocol: s.protocol.clone().unwrap_or_default(),
        }
    }
}

/// One slice of the protocol distribution.
#[derive(Debug, Serialize)]
struct ProtocolShare {
    protocol: &'static str,
    samples: u64,
    color: String,
}

#[derive(Tabled)]
struct ProtocolRow {
    #[tabled(rename = "Protocol")]
    protocol: &'static str,
    #[tabled(rename = "Samples")]
    samples: u64,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Minute")]
    time: String,
    #[tabled(rename = "Bytes")]
    bytes: String,
}

fn summary_detail(s: &TrafficSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total packets:       {}", s.total_packets);
    let _ = writeln!(out, "Total bytes:         {}", util::bytes(s.total_bytes));
    let _ = writeln!(out, "Active connections:  {}", s.active_connections);
    let _ = write!(out, "Alerts:              {}", s.alert_count);
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: TrafficArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TrafficCommand::List => {
            util::fetch(dashboard, Resource::Traffic).await?;
            let view = dashboard.store().traffic();
            let out = output::render_list(
                global.output(),
                view.samples.as_slice(),
                |s| SampleRow::from(s),
                |s| s.timestamp.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TrafficCommand::Protocols => {
            util::fetch(dashboard, Resource::Traffic).await?;
            let chart = dashboard.store().traffic().charts.protocols;
            let total = chart.tally.total();
            let shares: Vec<ProtocolShare> = chart
                .slices()
                .map(|(protocol, color, samples)| ProtocolShare {
                    protocol,
                    samples,
                    color: color.to_string(),
                })
                .collect();
            let out = output::render_list(
                global.output(),
                &shares,
                |s| ProtocolRow {
                    protocol: s.protocol,
                    samples: s.samples,
                    share: util::percent(s.samples, total),
                },
                |s| format!("{} {}", s.protocol, s.samples),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TrafficCommand::Stats => {
            let summary = dashboard.summary().await?;
            let out = output::render_single(global.output(), &summary, summary_detail, |s| {
                format!(
                    "{} {} {} {}",
                    s.total_packets, s.total_bytes, s.active_connections, s.alert_count
                )
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TrafficCommand::Trend => {
            let trend = dashboard.trend().await?;
            let out = output::render_list(
                global.output(),
                &trend,
                |p: &TrendPoint| TrendRow {
                    time: p.time.clone(),
                    bytes: util::bytes(p.bytes),
                },
                |p| format!("{} {}", p.time, p.bytes),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
