//! Packet command handlers.

use tabled::Tabled;
use trafmon_core::{Dashboard, Packet, Resource};

use crate::cli::{GlobalOpts, PacketsArgs, PacketsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PacketRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Length")]
    length: u64,
    #[tabled(rename = "Flags")]
    flags: String,
}

impl From<&Packet> for PacketRow {
    fn from(p: &Packet) -> Self {
        Self {
            time: p.timestamp.datetime_label(),
            source: p.source.to_string(),
            destination: p.destination.to_string(),
            protocol: p.protocol.clone().unwrap_or_default(),
            length: p.length,
            flags: p.flags.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: PacketsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PacketsCommand::List { limit } => {
            util::fetch(dashboard, Resource::Packets).await?;
            let packets = dashboard.store().packets();
            let shown = &packets[..limit.map_or(packets.len(), |n| n.min(packets.len()))];
            let out = output::render_list(
                global.output(),
                shown,
                |p| PacketRow::from(p),
                |p| format!("{} {} {}", p.timestamp, p.source, p.destination),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
