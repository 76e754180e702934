#![deny(unsafe_code)]

pub mod process;
pub mod storage;
