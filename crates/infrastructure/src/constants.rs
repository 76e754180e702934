// ── Paths ──────────────────────────────────────────────────────────

pub const DEFAULT_CONFIG_PATH: &str = "/etc/socworkflow/config.yaml";

// ── Elasticsearch defaults ─────────────────────────────────────────

pub const DEFAULT_ES_URL: &str = "http://127.0.0.1:9200";
pub const DEFAULT_ALERT_INDEX: &str = "soc_workflow_case";
pub const DEFAULT_PLAYBOOK_INDEX: &str = "soc_playbook";
pub const DEFAULT_ES_TIMEOUT_SECS: u64 = 10;

// ── Timeouts ───────────────────────────────────────────────────────

/// Default bound on one external command invocation, so a hung script
/// cannot block the caller indefinitely.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;
