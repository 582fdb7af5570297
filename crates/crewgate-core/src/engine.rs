//! Engine trait for crewgate-core
//!
//! An engine is the external orchestration framework that actually performs
//! the work. The rest of the system only ever sees this narrow interface:
//! a task description and an output hint go in, text comes out.

use crate::{EngineError, Result, TaskSpec};
use async_trait::async_trait;
use std::sync::Arc;

/// Capability interface of an orchestration engine
#[async_trait]
pub trait Engine: Send + Sync {
    /// Run a single task and return the engine's raw output
    async fn submit(&self, task: &TaskSpec) -> Result<String>;

    /// Run a batch of tasks in order and return the output of the last one
    ///
    /// The default implementation runs the tasks one after another and hands
    /// every earlier output to later tasks as context. Engines with their own
    /// sequential process should override this.
    async fn submit_sequence(&self, tasks: &[TaskSpec]) -> Result<String> {
        if tasks.is_empty() {
            return Err(EngineError::EmptyBatch);
        }

        let mut outputs: Vec<String> = Vec::with_capacity(tasks.len());
        for task in tasks {
            let mut context = task.context.clone();
            context.extend(outputs.iter().cloned());
            let task = task.clone().with_context(context);
            outputs.push(self.submit(&task).await?);
        }

        outputs.pop().ok_or(EngineError::EmptyBatch)
    }

    /// Optional method to get engine metadata
    fn metadata(&self) -> EngineMetadata {
        EngineMetadata::default()
    }
}

/// Metadata about an engine
#[derive(Debug, Clone, Default)]
pub struct EngineMetadata {
    /// Human-readable name of the engine
    pub name: Option<String>,
    /// Model the engine talks to, if any
    pub model: Option<String>,
}

/// Arc-wrapped engine for thread-safe sharing
pub type SharedEngine = Arc<dyn Engine>;

/// Extension trait for engines
pub trait EngineExt: Engine {
    /// Convert to a shared engine
    fn shared(self) -> SharedEngine
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl<T: Engine> EngineExt for T {}
