use crewgate_core::{Engine, SharedEngine, TaskSpec};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::{
    AgentRoster, AnalysisResult, ComprehensiveResult, ContentResult, RecommendationResult,
    SentimentResult,
};
use crate::error::Result;
use crate::payload::excerpt;

/// Characters of user text that may appear in logs
const LOG_EXCERPT_CHARS: usize = 50;

/// Service that turns validated requests into engine tasks
#[derive(Clone)]
pub struct CrewService {
    engine: SharedEngine,
    agents: Arc<AgentRoster>,
}

impl CrewService {
    /// Create a new CrewService with the default roster
    pub fn new(engine: SharedEngine) -> Self {
        Self::with_agents(engine, AgentRoster::default())
    }

    /// Create a new CrewService with a custom roster
    pub fn with_agents(engine: SharedEngine, agents: AgentRoster) -> Self {
        Self {
            engine,
            agents: Arc::new(agents),
        }
    }

    pub fn agents(&self) -> &AgentRoster {
        &self.agents
    }

    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    /// Analyze arbitrary data
    pub async fn analyze_data(&self, data: &Value) -> Result<AnalysisResult> {
        let task = TaskSpec::new(
            self.agents.analyst.clone(),
            format!(
                "Analyze the following data and provide insights: {}",
                render(data)
            ),
            "A detailed analysis of the data highlighting key insights, patterns and anomalies",
        );

        let analysis = self.run(task).await?;
        Ok(AnalysisResult { analysis })
    }

    /// Recommend something to a user
    pub async fn get_recommendation(&self, user_data: &Value) -> Result<RecommendationResult> {
        let task = TaskSpec::new(
            self.agents.recommender.clone(),
            format!(
                "Generate a personalized recommendation based on: {}",
                render(user_data)
            ),
            "A list of personalized recommendations with a short justification for each",
        );

        let recommendations = self.run(task).await?;
        Ok(RecommendationResult { recommendations })
    }

    /// Classify the sentiment of a piece of text
    pub async fn analyze_sentiment(&self, text: &str) -> Result<SentimentResult> {
        info!(
            "Analyzing sentiment for text: {}...",
            excerpt(text, LOG_EXCERPT_CHARS)
        );

        let task = TaskSpec::new(
            self.agents.sentiment_analyzer.clone(),
            format!("Analyze the sentiment of the following text: {}", text),
            "The overall sentiment (positive, negative or neutral), a confidence level and the phrases that drove it",
        );

        let sentiment_analysis = self.run(task).await?;
        Ok(SentimentResult { sentiment_analysis })
    }

    /// Write a piece of content of the given type about a topic
    pub async fn generate_content(&self, topic: &str, content_type: &str) -> Result<ContentResult> {
        let task = TaskSpec::new(
            self.agents.content_creator.clone(),
            format!("Create a {} about the following topic: {}", content_type, topic),
            format!("A polished {} ready to publish", content_type),
        );

        let generated_content = self.run(task).await?;
        Ok(ContentResult { generated_content })
    }

    /// Analysis, sentiment, recommendation and summary as one batch.
    ///
    /// Later tasks rely on the engine handing them the outputs of earlier
    /// ones; the output of the summary task is returned.
    pub async fn comprehensive_analysis(&self, data: &Value) -> Result<ComprehensiveResult> {
        let rendered = render(data);
        let tasks = vec![
            TaskSpec::new(
                self.agents.analyst.clone(),
                format!(
                    "Analyze the following data and provide insights: {}",
                    rendered
                ),
                "Key insights, patterns and anomalies found in the data",
            ),
            TaskSpec::new(
                self.agents.sentiment_analyzer.clone(),
                format!(
                    "Analyze the sentiment expressed in the following data and in the insights from the previous analysis: {}",
                    rendered
                ),
                "The overall sentiment and the evidence behind it",
            ),
            TaskSpec::new(
                self.agents.recommender.clone(),
                format!(
                    "Based on the analysis and sentiment findings, generate personalized recommendations for: {}",
                    rendered
                ),
                "Actionable recommendations grounded in the earlier findings",
            ),
            TaskSpec::new(
                self.agents.report_writer.clone(),
                "Summarize the analysis, sentiment and recommendations into a single comprehensive report",
                "A comprehensive report with sections for insights, sentiment and recommendations",
            ),
        ];

        debug!("Submitting batch of {} tasks", tasks.len());
        let comprehensive_analysis = self.engine.submit_sequence(&tasks).await?;
        Ok(ComprehensiveResult {
            comprehensive_analysis,
        })
    }

    async fn run(&self, task: TaskSpec) -> Result<String> {
        debug!("Submitting task {} to {}", task.id, task.agent.role);
        Ok(self.engine.submit(&task).await?)
    }
}

/// Payload text embedded in a task description
fn render(data: &Value) -> String {
    match data {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CrewError;
    use crewgate_core::{EngineError, MockEngine};
    use serde_json::json;

    fn service(engine: &Arc<MockEngine>) -> CrewService {
        CrewService::new(engine.clone())
    }

    #[tokio::test]
    async fn analyze_wraps_engine_output() {
        let engine = Arc::new(MockEngine::replying("Detailed analysis result"));
        let result = service(&engine)
            .analyze_data(&json!({"test": "data"}))
            .await
            .unwrap();

        assert_eq!(result.analysis, "Detailed analysis result");
        assert_eq!(engine.calls(), 1);

        let task = &engine.submissions()[0];
        assert_eq!(task.agent.role, "Data Analyst");
        assert!(task.description.contains(r#"{"test":"data"}"#));
    }

    #[tokio::test]
    async fn recommendation_uses_recommender() {
        let engine = Arc::new(MockEngine::replying("Read more Rust"));
        let result = service(&engine)
            .get_recommendation(&json!({"user": "test user"}))
            .await
            .unwrap();

        assert_eq!(result.recommendations, "Read more Rust");
        let task = &engine.submissions()[0];
        assert_eq!(task.agent.role, "Recommendation Specialist");
        assert!(task.description.contains("test user"));
    }

    #[tokio::test]
    async fn sentiment_sends_full_text() {
        let engine = Arc::new(MockEngine::replying("positive"));
        let text = "I love this product. ".repeat(10);
        let result = service(&engine).analyze_sentiment(&text).await.unwrap();

        assert_eq!(result.sentiment_analysis, "positive");
        assert!(engine.submissions()[0].description.ends_with(&text));
    }

    #[tokio::test]
    async fn content_embeds_topic_and_type() {
        let engine = Arc::new(MockEngine::replying("A blog post"));
        let result = service(&engine)
            .generate_content("Rust ownership", "blog post")
            .await
            .unwrap();

        assert_eq!(result.generated_content, "A blog post");
        let task = &engine.submissions()[0];
        assert_eq!(task.agent.role, "Content Creator");
        assert!(task.description.contains("Rust ownership"));
        assert!(task.expected_output.contains("blog post"));
    }

    #[tokio::test]
    async fn comprehensive_runs_four_chained_tasks() {
        let engine = Arc::new(MockEngine::scripted([
            "insights",
            "sentiment",
            "recommendations",
            "final report",
        ]));
        let result = service(&engine)
            .comprehensive_analysis(&json!({"sales": [1, 2, 3]}))
            .await
            .unwrap();

        assert_eq!(result.comprehensive_analysis, "final report");

        let roles: Vec<_> = engine
            .submissions()
            .into_iter()
            .map(|t| t.agent.role)
            .collect();
        assert_eq!(
            roles,
            vec![
                "Data Analyst",
                "Sentiment Analyst",
                "Recommendation Specialist",
                "Report Writer"
            ]
        );
        assert_eq!(engine.submissions()[3].context.len(), 3);
    }

    #[tokio::test]
    async fn engine_failure_propagates() {
        let engine = Arc::new(MockEngine::failing("quota exceeded"));
        let err = service(&engine)
            .analyze_data(&json!({"a": 1}))
            .await
            .unwrap_err();

        assert!(matches!(err, CrewError::Engine(EngineError::Backend(_))));
    }

    #[test]
    fn string_payloads_render_without_quotes() {
        assert_eq!(render(&json!("plain text")), "plain text");
        assert_eq!(render(&json!({"k": 1})), r#"{"k":1}"#);
    }
}
