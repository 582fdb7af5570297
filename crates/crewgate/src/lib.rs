//! Main crate for crewgate
//!
//! The delegation facade that turns validated requests into engine tasks,
//! together with the capability list, payload rules and configuration shared
//! by the HTTP gateway and the CLI.

pub mod capability;
pub mod config;
pub mod crew;
pub mod error;
pub mod payload;

// Re-export core types
pub use crewgate_core::{
    AgentProfile, Engine, EngineError, EngineExt, EngineMetadata, MockEngine, SharedEngine,
    TaskId, TaskSpec,
};

pub use capability::Capability;
pub use config::{AuthConfig, CrewgateConfig, FeatureFlags, LlmConfig};
pub use crew::{
    AgentRoster, AnalysisResult, ChatCompletionEngine, ComprehensiveResult, ContentResult,
    CrewService, RecommendationResult, SentimentResult,
};
pub use error::{ConfigError, CrewError, Result};
pub use payload::{ContentRequest, Payload, PayloadError};

/// Load variables from a `.env` file in the working directory, if present
pub fn load_dotenv() -> bool {
    dotenv::dotenv().is_ok()
}
