//! CLI configuration, a thin wrapper around `trafmon_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--url, --timeout, --insecure).

use std::time::Duration;

use clap::ValueEnum;
use tracing::debug;

use trafmon_config::ConfigError;
use trafmon_core::DashboardConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use trafmon_config::{Config, Profile, config_path, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Fill `--output` / `--color` from `[defaults]` when not given on the
/// command line. Unknown values in the file fall back to the built-ins.
pub fn apply_defaults(global: &mut GlobalOpts, cfg: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&cfg.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&cfg.defaults.color, true).ok();
    }
}

/// Translate the active profile + global flags into a `DashboardConfig`.
///
/// Flags take priority over the profile. With `--url`, a missing profile
/// is not an error. The CLI never polls, so the refresh interval is zero.
pub fn resolve_dashboard_config(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<DashboardConfig, CliError> {
    let (name, mut profile) = match cfg.resolve_profile(global.profile.as_deref()) {
        Ok(found) => found,
        Err(ConfigError::UnknownProfile { name, .. }) if global.url.is_some() => {
            (name, Profile::default())
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(ref url) = global.url {
        profile.url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }

    let mut dash = trafmon_config::profile_to_dashboard_config(&profile, &cfg.defaults)?;
    dash.refresh_interval = Duration::ZERO;

    debug!(profile = %name, url = %dash.url, timeout = ?dash.timeout, "resolved backend");
    Ok(dash)
}
