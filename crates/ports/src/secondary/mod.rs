pub mod alert_store;
pub mod command_runner;
pub mod playbook_store;
