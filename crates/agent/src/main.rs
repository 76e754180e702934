#![forbid(unsafe_code)]

mod cli;
mod commands;

use std::path::Path;

use anyhow::{Context, Result};

use cli::{AlertsCommand, Command, CommandsCommand, PlaybooksCommand};
use infrastructure::config::AgentConfig;
use infrastructure::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::parse();
    let output = cli.output;

    if matches!(cli.command, Command::Version) {
        println!("socworkflow-agent {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = AgentConfig::load(Path::new(&cli.config))
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;

    let log_level = cli.log_level.unwrap_or(config.agent.log_level);
    let log_format = cli.log_format.unwrap_or(config.agent.log_format);
    init_logging(log_level, log_format)?;
    tracing::debug!(config = ?config.sanitized(), "configuration loaded");

    match cli.command {
        Command::Version => Ok(()),

        Command::Validate => commands::cmd_validate(&config, &cli.config, output),

        Command::Playbooks { command } => match command {
            PlaybooksCommand::List => commands::cmd_playbooks_list(&config, output),
            PlaybooksCommand::Link { alert_name } => {
                commands::cmd_playbooks_link(&config, &alert_name, output)
            }
            PlaybooksCommand::Show { name } => {
                commands::cmd_playbooks_show(&config, &name, output).await
            }
        },

        Command::Commands { command } => match command {
            CommandsCommand::List => commands::cmd_commands_list(&config, output),
            CommandsCommand::Render { path, value } => {
                commands::cmd_commands_render(&config, &path, &value, output)
            }
            CommandsCommand::Run { path, value } => {
                commands::cmd_commands_run(&config, &path, &value, output).await
            }
        },

        Command::Alerts { command } => match command {
            AlertsCommand::Show { id } => commands::cmd_alerts_show(&config, &id, output).await,
        },
    }
}
