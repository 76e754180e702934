#![forbid(unsafe_code)]

pub mod alert;
pub mod command;
pub mod common;
pub mod playbook;
