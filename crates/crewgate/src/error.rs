//! Error types for crewgate crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrewError {
    #[error("Engine error: {0}")]
    Engine(#[from] crewgate_core::EngineError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Unknown feature flag: {0}")]
    UnknownFeature(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, CrewError>;
