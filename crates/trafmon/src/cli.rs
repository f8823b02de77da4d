//! Clap derive structures for the `trafmon` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// trafmon -- network traffic monitor from the command line
#[derive(Debug, Parser)]
#[command(
    name = "trafmon",
    version,
    about = "Inspect network traffic, interfaces, alerts and users from the command line",
    long_about = "Talks to a traffic monitor backend over its JSON API.\n\n\
        List views mirror the dashboard tables; `snapshot --html` renders\n\
        all four tables as HTML fragments keyed by their DOM id.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "TRAFMON_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 'u', env = "TRAFMON_URL", global = true)]
    pub url: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "TRAFMON_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "TRAFMON_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, env = "TRAFMON_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Traffic samples, protocol breakdown and aggregates
    #[command(alias = "t")]
    Traffic(TrafficArgs),

    /// Network interfaces and their monitoring state
    #[command(alias = "if", alias = "i")]
    Interfaces(InterfacesArgs),

    /// Security alerts
    #[command(alias = "a")]
    Alerts(AlertsArgs),

    /// Captured packets
    Packets(PacketsArgs),

    /// Dashboard users
    Users(UsersArgs),

    /// Render all four tables at once
    Snapshot(SnapshotArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Traffic ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TrafficArgs {
    #[command(subcommand)]
    pub command: TrafficCommand,
}

#[derive(Debug, Subcommand)]
pub enum TrafficCommand {
    /// List traffic samples (incoming/outgoing bytes over time)
    #[command(alias = "ls")]
    List,

    /// Sample count per protocol (TCP, UDP, ICMP, Other)
    Protocols,

    /// Aggregate counters: packets, bytes, connections, alerts
    Stats,

    /// Byte volume per minute over the recent window
    Trend,
}

// ── Interfaces ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InterfacesArgs {
    #[command(subcommand)]
    pub command: InterfacesCommand,
}

#[derive(Debug, Subcommand)]
pub enum InterfacesCommand {
    /// List interfaces
    #[command(alias = "ls")]
    List,

    /// Start or stop monitoring an interface
    Toggle {
        /// Interface ID
        id: i64,
    },
}

// ── Alerts ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// List alerts
    #[command(alias = "ls")]
    List {
        /// Only show alerts that are still active
        #[arg(long)]
        active: bool,
    },

    /// Mark an alert as resolved
    Resolve {
        /// Alert ID
        id: i64,
    },
}

// ── Packets ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PacketsArgs {
    #[command(subcommand)]
    pub command: PacketsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PacketsCommand {
    /// List captured packets
    #[command(alias = "ls")]
    List {
        /// Show at most this many packets
        #[arg(long, short = 'l')]
        limit: Option<usize>,
    },
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users
    #[command(alias = "ls")]
    List,

    /// Delete a user (asks for confirmation unless --yes)
    #[command(alias = "rm")]
    Delete {
        /// User ID
        id: i64,
    },
}

// ── Snapshot ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Emit the table bodies as HTML instead of terminal tables
    #[arg(long)]
    pub html: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
