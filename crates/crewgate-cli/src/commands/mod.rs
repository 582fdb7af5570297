//! CLI command handlers

pub mod capability;
pub mod init;

pub use capability::{CapabilityRunner, parse_json_arg};
pub use init::run_init;
