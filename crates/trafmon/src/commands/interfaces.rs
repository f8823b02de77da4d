//! Interface command handlers.

use tabled::Tabled;
use trafmon_core::{Dashboard, Interface, Resource};

use crate::cli::{GlobalOpts, InterfacesArgs, InterfacesCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP Address")]
    ip: String,
    #[tabled(rename = "MAC Address")]
    mac: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Monitored")]
    monitored: String,
}

fn row(iface: &Interface, color: bool) -> InterfaceRow {
    let monitored = if iface.is_monitored {
        output::paint("Yes", Tone::Good, color)
    } else {
        output::paint("No", Tone::Muted, color)
    };
    InterfaceRow {
        id: iface.id,
        name: iface.name.clone(),
        ip: iface.ip_address.clone().unwrap_or_default(),
        mac: iface.mac_address.clone().unwrap_or_default(),
        status: iface.status.clone().unwrap_or_default(),
        monitored,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: InterfacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        InterfacesCommand::List => {
            util::fetch(dashboard, Resource::Interfaces).await?;
            let interfaces = dashboard.store().interfaces();
            let color = output::should_color(global.color());
            let out = output::render_list(
                global.output(),
                interfaces.as_slice(),
                |i| row(i, color),
                |i| i.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        InterfacesCommand::Toggle { id } => {
            dashboard.toggle_monitoring(id).await?;

            // The action re-fetched interfaces; report the new state if we have it.
            let interfaces = dashboard.store().interfaces();
            let message = match interfaces.iter().find(|i| i.id == id) {
                Some(iface) if iface.is_monitored => format!("Monitoring started on {}", iface.name),
                Some(iface) => format!("Monitoring stopped on {}", iface.name),
                None => format!("Monitoring toggled on interface {id}"),
            };
            output::print_status(&message, global.quiet);
            Ok(())
        }
    }
}
