use std::sync::Arc;

use anyhow::{Context, Result, bail};

use adapters::process::LocalProcessRunner;
use adapters::storage::{EsAlertStore, EsClient, EsPlaybookStore};
use application::alert_enrichment::AlertContextService;
use application::dispatch_service_impl::DispatchAppService;
use application::playbook_service_impl::PlaybookAppService;
use domain::command::entity::DispatchResult;
use infrastructure::config::AgentConfig;

use crate::cli::OutputFormat;

// ── Validate ────────────────────────────────────────────────────────────

pub fn cmd_validate(config: &AgentConfig, path: &str, output: OutputFormat) -> Result<()> {
    // Structural validation already passed at load; exercise the domain
    // conversions too so template and tree errors surface here. Disabled
    // sections are still validated in full.
    let service = PlaybookAppService::new(config.playbook_mappings())
        .context("failed to build the playbook mapping table")?;
    let tree = config.command_tree()?;

    if output == OutputFormat::Json {
        let summary = serde_json::json!({
            "config": path,
            "valid": true,
            "playbook_mappings": service.mapping_count(),
            "command_entries": tree.actions().len(),
            "elasticsearch_enabled": config.elasticsearch.enabled,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Configuration OK: {path}");
    println!("  Playbook mappings: {}", service.mapping_count());
    println!("  Command entries:   {}", tree.actions().len());
    println!(
        "  Elasticsearch:     {}",
        if config.elasticsearch.enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    Ok(())
}

// ── Playbooks ───────────────────────────────────────────────────────────

pub fn cmd_playbooks_list(config: &AgentConfig, output: OutputFormat) -> Result<()> {
    ensure_playbooks_enabled(config)?;
    let mappings = config.playbook_mappings();

    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&mappings)?);
        return Ok(());
    }

    if mappings.is_empty() {
        println!("No playbook mappings configured.");
        return Ok(());
    }

    println!("{:<32}  {:>6}  {}", "PLAYBOOK", "ALERTS", "ALERT NAMES");
    for mapping in &mappings {
        println!(
            "{:<32}  {:>6}  {}",
            mapping.name,
            mapping.alert_names.len(),
            mapping.alert_names.join(", "),
        );
    }
    println!("\n{} mapping(s) total.", mappings.len());
    Ok(())
}

pub fn cmd_playbooks_link(
    config: &AgentConfig,
    alert_name: &str,
    output: OutputFormat,
) -> Result<()> {
    let service = playbook_service(config)?;
    let playbooks = service.link(alert_name);

    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&playbooks)?);
        return Ok(());
    }

    if playbooks.is_empty() {
        println!("No playbooks linked to '{alert_name}'.");
        return Ok(());
    }
    for name in &playbooks {
        println!("{name}");
    }
    Ok(())
}

pub async fn cmd_playbooks_show(
    config: &AgentConfig,
    name: &str,
    output: OutputFormat,
) -> Result<()> {
    let client = es_client(config)?;
    let mut service = playbook_service(config)?;
    service.set_store(Arc::new(EsPlaybookStore::new(
        client,
        &config.elasticsearch.playbook_index,
    )));

    let Some(body) = service.playbook_body(name).await? else {
        bail!("playbook '{name}' not found in index '{}'", config.elasticsearch.playbook_index);
    };

    if output == OutputFormat::Json {
        let doc = serde_json::json!({ "name": name, "body": body });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }
    println!("{body}");
    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────

pub fn cmd_commands_list(config: &AgentConfig, output: OutputFormat) -> Result<()> {
    let service = dispatch_service(config)?;
    let entries = service.list();

    if output == OutputFormat::Json {
        let rows: Vec<serde_json::Value> = entries
            .iter()
            .map(|(path, kind)| serde_json::json!({ "path": path, "kind": kind }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No command entries configured.");
        return Ok(());
    }

    println!("{:<48}  {}", "PATH", "KIND");
    for (path, kind) in &entries {
        println!("{path:<48}  {kind}");
    }
    println!("\n{} entr(ies) total.", entries.len());
    Ok(())
}

pub fn cmd_commands_render(
    config: &AgentConfig,
    path: &str,
    value: &str,
    output: OutputFormat,
) -> Result<()> {
    let service = dispatch_service(config)?;
    let segments = split_path(path);
    let rendered = service.render(&segments, value)?;

    if output == OutputFormat::Json {
        let doc = serde_json::json!({ "path": path, "rendered": rendered });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }
    println!("{rendered}");
    Ok(())
}

pub async fn cmd_commands_run(
    config: &AgentConfig,
    path: &str,
    value: &str,
    output: OutputFormat,
) -> Result<()> {
    let service = dispatch_service(config)?;
    let segments = split_path(path);
    let result = service.dispatch(&segments, value).await?;

    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result {
        DispatchResult::Link(url) => {
            println!("{url}");
            Ok(())
        }
        DispatchResult::Command(outcome) => {
            print!("{}", outcome.stdout);
            eprint!("{}", outcome.stderr);
            match outcome.exit_code {
                Some(0) => Ok(()),
                Some(code) => bail!("command exited with status {code}"),
                None => bail!("command was terminated by a signal"),
            }
        }
    }
}

// ── Alerts ──────────────────────────────────────────────────────────────

pub async fn cmd_alerts_show(config: &AgentConfig, id: &str, output: OutputFormat) -> Result<()> {
    let client = es_client(config)?;
    let store = Arc::new(EsAlertStore::new(client, &config.elasticsearch.alert_index));
    // With linking disabled the alert is still shown, just without playbooks.
    let mappings = if config.playbooks.enabled {
        config.playbook_mappings()
    } else {
        Vec::new()
    };
    let playbooks = PlaybookAppService::new(mappings)
        .context("failed to build the playbook mapping table")?;
    let service = AlertContextService::new(store);

    let Some(ctx) = service.context(id, playbooks.linker()).await? else {
        bail!("alert '{id}' not found in index '{}'", config.elasticsearch.alert_index);
    };

    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&ctx)?);
        return Ok(());
    }

    println!("Alert {}", ctx.alert.id);
    println!("  Name:      {}", ctx.alert.name);
    if let Some(severity) = ctx.alert.severity {
        println!("  Severity:  {severity}");
    }
    if let Some(timestamp) = &ctx.alert.timestamp {
        println!("  Timestamp: {timestamp}");
    }
    if ctx.playbooks.is_empty() {
        println!("  Playbooks: (none)");
    } else {
        println!("  Playbooks: {}", ctx.playbooks.join(", "));
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn ensure_playbooks_enabled(config: &AgentConfig) -> Result<()> {
    if !config.playbooks.enabled {
        bail!("playbook linking is disabled in the configuration (set playbooks.enabled: true)");
    }
    Ok(())
}

fn playbook_service(config: &AgentConfig) -> Result<PlaybookAppService> {
    ensure_playbooks_enabled(config)?;
    PlaybookAppService::new(config.playbook_mappings())
        .context("failed to build the playbook mapping table")
}

fn dispatch_service(config: &AgentConfig) -> Result<DispatchAppService> {
    if !config.commands.enabled {
        bail!("command dispatch is disabled in the configuration (set commands.enabled: true)");
    }
    let tree = config.command_tree()?;
    Ok(DispatchAppService::new(
        tree,
        Arc::new(LocalProcessRunner),
        config.dispatch_timeout(),
    ))
}

fn es_client(config: &AgentConfig) -> Result<Arc<EsClient>> {
    if !config.elasticsearch.enabled {
        bail!("elasticsearch is disabled in the configuration (set elasticsearch.enabled: true)");
    }
    let es = &config.elasticsearch;
    let client = EsClient::new(
        &es.url,
        std::time::Duration::from_secs(es.timeout_secs),
        es.username.clone(),
        es.password.clone(),
    )?;
    Ok(Arc::new(client))
}

/// Split an entry path argument into its menu segments.
fn split_path(path: &str) -> Vec<&str> {
    path.split('/').collect()
}
