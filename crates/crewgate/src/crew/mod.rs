pub mod agents;
pub mod llm_engine;
pub mod results;
pub mod service;

pub use agents::AgentRoster;
pub use llm_engine::ChatCompletionEngine;
pub use results::{
    AnalysisResult, ComprehensiveResult, ContentResult, RecommendationResult, SentimentResult,
};
pub use service::CrewService;
