//! User command handlers.

use tabled::Tabled;
use trafmon_core::table::NEVER;
use trafmon_core::{ActionOutcome, DELETE_USER_PROMPT, Dashboard, Preapproved, Resource, User};

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Last Login")]
    last_login: String,
}

fn row(user: &User, color: bool) -> UserRow {
    UserRow {
        id: user.id,
        name: user.name.clone(),
        role: user.role.clone().unwrap_or_default(),
        created: user
            .created_at
            .as_ref()
            .map(|t| t.datetime_label())
            .unwrap_or_default(),
        last_login: user.last_login.as_ref().map_or_else(
            || output::paint(NEVER, Tone::Muted, color),
            |t| t.datetime_label(),
        ),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: UsersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List => {
            util::fetch(dashboard, Resource::Users).await?;
            let users = dashboard.store().users();
            let color = output::should_color(global.color());
            let out = output::render_list(
                global.output(),
                users.as_slice(),
                |u| row(u, color),
                |u| u.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Delete { id } => {
            let approved = util::confirm(DELETE_USER_PROMPT, "users delete", global.yes)?;
            match dashboard.delete_user(id, &Preapproved(approved)).await? {
                ActionOutcome::Applied => {
                    output::print_status(&format!("User {id} deleted"), global.quiet);
                }
                ActionOutcome::Declined => output::print_status("Aborted", global.quiet),
            }
            Ok(())
        }
    }
}
