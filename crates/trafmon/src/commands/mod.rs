//! Command dispatch: bridges CLI args -> dashboard calls -> output formatting.

pub mod alerts;
pub mod config_cmd;
pub mod interfaces;
pub mod packets;
pub mod snapshot;
pub mod traffic;
pub mod users;
pub mod util;

use trafmon_core::Dashboard;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    dashboard: &Dashboard,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Traffic(args) => traffic::handle(dashboard, args, global).await,
        Command::Interfaces(args) => interfaces::handle(dashboard, args, global).await,
        Command::Alerts(args) => alerts::handle(dashboard, args, global).await,
        Command::Packets(args) => packets::handle(dashboard, args, global).await,
        Command::Users(args) => users::handle(dashboard, args, global).await,
        Command::Snapshot(args) => snapshot::handle(dashboard, &args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
