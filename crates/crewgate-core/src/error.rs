//! Error types for crewgate-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Engine backend error: {0}")]
    Backend(String),

    #[error("Invalid engine response: {0}")]
    InvalidResponse(String),

    #[error("Engine unavailable: {0}")]
    Unavailable(String),

    #[error("Cannot run an empty task batch")]
    EmptyBatch,
}

pub type Result<T> = std::result::Result<T, EngineError>;
