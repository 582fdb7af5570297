//! # Crewgate Core
//!
//! The engine interface every capability is delegated through, plus the task
//! and agent types that cross it.

pub mod engine;
pub mod error;
pub mod mock;
pub mod task;

pub use engine::{Engine, EngineExt, EngineMetadata, SharedEngine};
pub use error::{EngineError, Result};
pub use mock::MockEngine;
pub use task::{AgentProfile, TaskId, TaskSpec};
