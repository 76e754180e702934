use clap::{Parser, Subcommand, ValueEnum};
use infrastructure::config::{LogFormat, LogLevel};
use infrastructure::constants::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(
    name = "socworkflow-agent",
    about = "SOC workflow agent: playbook linking and external command dispatch",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: String,

    /// Log level override (takes precedence over config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Log format: json (default, production) or text (development)
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    Table,
    /// Raw JSON
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display version information
    Version,

    /// Load and validate the configuration file
    Validate,

    /// Playbook mapping table and playbook bodies
    Playbooks {
        #[command(subcommand)]
        command: PlaybooksCommand,
    },

    /// Lookup/response command tree
    Commands {
        #[command(subcommand)]
        command: CommandsCommand,
    },

    /// Alert documents from the alert index
    Alerts {
        #[command(subcommand)]
        command: AlertsCommand,
    },
}

// ── Playbooks ───────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum PlaybooksCommand {
    /// List the configured playbook mappings
    List,
    /// Show the playbooks linked to an alert name
    Link {
        /// Alert name to look up (exact, case-sensitive)
        alert_name: String,
    },
    /// Fetch a playbook body from the playbook index
    Show {
        /// Playbook name
        name: String,
    },
}

// ── Commands ────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum CommandsCommand {
    /// List all dispatchable entries
    List,
    /// Show the substituted invocation or URL without executing
    Render {
        /// Entry path, menu levels separated by '/' (e.g. "Intel/Whois")
        path: String,
        /// Field value to substitute for [[value]]
        value: String,
    },
    /// Run a command entry (or print the substituted URL for a link entry)
    Run {
        /// Entry path, menu levels separated by '/' (e.g. "Intel/Whois")
        path: String,
        /// Field value to substitute for [[value]]
        value: String,
    },
}

// ── Alerts ──────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum AlertsCommand {
    /// Fetch an alert by document ID, with its linked playbooks
    Show {
        /// Alert document ID
        id: String,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
