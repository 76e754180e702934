#![forbid(unsafe_code)]

pub mod alert_enrichment;
pub mod dispatch_service_impl;
pub mod playbook_service_impl;
