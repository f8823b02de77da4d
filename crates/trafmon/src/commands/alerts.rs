//! Alert command handlers.

use tabled::Tabled;
use trafmon_core::{Alert, Dashboard, Resource};

use crate::cli::{AlertsArgs, AlertsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Type")]
    alert_type: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn row(alert: &Alert, color: bool) -> AlertRow {
    let tone = if alert.is_resolved { Tone::Good } else { Tone::Bad };
    AlertRow {
        id: alert.id,
        time: alert.timestamp.datetime_label(),
        alert_type: alert.alert_type.clone(),
        severity: alert.severity.clone().unwrap_or_default(),
        description: alert.description.clone().unwrap_or_default(),
        status: output::paint(alert.status_label(), tone, color),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: AlertsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AlertsCommand::List { active } => {
            util::fetch(dashboard, Resource::Alerts).await?;
            let alerts: Vec<Alert> = dashboard
                .store()
                .alerts()
                .iter()
                .filter(|a| !active || !a.is_resolved)
                .cloned()
                .collect();
            let color = output::should_color(global.color());
            let out = output::render_list(
                global.output(),
                &alerts,
                |a| row(a, color),
                |a| a.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlertsCommand::Resolve { id } => {
            dashboard.resolve_alert(id).await?;
            output::print_status(&format!("Alert {id} resolved"), global.quiet);
            Ok(())
        }
    }
}
