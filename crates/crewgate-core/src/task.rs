//! Task and agent types handed to an engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// NewType pattern for Task ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Create a new TaskId
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The persona an engine should adopt while working on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl AgentProfile {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }
}

/// A single unit of work submitted to an engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Unique task ID
    pub id: TaskId,
    /// Agent responsible for the task
    pub agent: AgentProfile,
    /// Natural-language description of the work
    pub description: String,
    /// Hint describing the shape of the expected output
    pub expected_output: String,
    /// Outputs of earlier tasks in the same batch
    #[serde(default)]
    pub context: Vec<String>,
}

impl TaskSpec {
    /// Create a task with no prior context
    pub fn new(
        agent: AgentProfile,
        description: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            agent,
            description: description.into(),
            expected_output: expected_output.into(),
            context: Vec::new(),
        }
    }

    /// Return a copy of this task carrying the given context
    pub fn with_context(mut self, context: Vec<String>) -> Self {
        self.context = context;
        self
    }
}
