//! Error types for crewgate-cli

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] crewgate::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0} is disabled in the configuration")]
    FeatureDisabled(crewgate::Capability),

    #[error("{0}")]
    Crew(#[from] crewgate::CrewError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
