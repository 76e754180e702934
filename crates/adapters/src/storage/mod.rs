pub mod es_alert_store;
pub mod es_client;
pub mod es_playbook_store;

pub use es_alert_store::EsAlertStore;
pub use es_client::EsClient;
pub use es_playbook_store::EsPlaybookStore;
