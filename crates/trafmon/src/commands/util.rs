//! Shared helpers for command handlers.

use std::io::IsTerminal;

use bytesize::ByteSize;

use trafmon_core::{Dashboard, Resource};

use crate::error::CliError;

/// Fetch one resource into the dashboard's store.
///
/// The CLI issues a single fetch, so the response is always the newest one.
pub async fn fetch(dashboard: &Dashboard, resource: Resource) -> Result<(), CliError> {
    dashboard.load(resource).await?;
    Ok(())
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, destructive actions need `--yes`.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Human-readable byte count.
pub fn bytes(n: u64) -> String {
    ByteSize(n).to_string()
}

/// `part` as a percentage of `whole`, one decimal place.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn percent(part: u64, whole: u64) -> String {
    if whole == 0 {
        return "0.0%".into();
    }
    format!("{:.1}%", part as f64 * 100.0 / whole as f64)
}
