//! Clap derive structures for the `meraki` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// meraki -- query a Meraki network and decode CMX scanning payloads
#[derive(Debug, Parser)]
#[command(
    name = "meraki",
    version,
    about = "Query Meraki wireless networks from the command line",
    long_about = "List SSIDs and access points of a Meraki network through the\n\
        Dashboard API, and decode CMX location-analytics payloads.",
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
    /// Network profile to use
    #[arg(long, short = 'p', env = "MERAKI_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Dashboard API root (overrides profile)
    #[arg(long, env = "MERAKI_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Dashboard API key
    #[arg(long, env = "MERAKI_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Network identifier (overrides profile)
    #[arg(long, short = 'n', env = "MERAKI_NETWORK", global = true)]
    pub network: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MERAKI_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "MERAKI_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the SSIDs configured on the network
    #[command(alias = "essids")]
    Ssids,

    /// List the wireless access points of the network
    #[command(alias = "ap")]
    Aps(ApsArgs),

    /// Work with CMX scanning payloads
    Cmx(CmxArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Access points ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApsArgs {
    /// Include every device, not only access points
    #[arg(long, short = 'a')]
    pub all: bool,
}

// ── CMX ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CmxArgs {
    #[command(subcommand)]
    pub command: CmxCommand,
}

#[derive(Debug, Subcommand)]
pub enum CmxCommand {
    /// Decode a scanning payload and list its observations
    Decode {
        /// JSON file holding the POST body ("-" reads stdin)
        file: PathBuf,

        /// Zone to render seenTime in (IANA name, overrides profile)
        #[arg(long, short = 'z')]
        zone: Option<String>,

        /// Check the payload secret against the profile's cmx_secret
        #[arg(long)]
        verify: bool,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display current configuration (secrets masked)
    Show,

    /// List configured profiles
    Profiles,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
