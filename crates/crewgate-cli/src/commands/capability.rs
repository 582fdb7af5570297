//! Capability command handlers
//!
//! Runs the same checks as the HTTP gateway (feature flag, then payload
//! validation) and prints the result envelope.

use crate::error::CliError;
use crewgate::{Capability, CrewService, CrewgateConfig, Payload};
use serde::Serialize;
use serde_json::Value;

/// Runs capabilities against a crew service under a given configuration
pub struct CapabilityRunner {
    crew: CrewService,
    config: CrewgateConfig,
}

impl CapabilityRunner {
    pub fn new(crew: CrewService, config: CrewgateConfig) -> Self {
        Self { crew, config }
    }

    fn ensure_enabled(&self, capability: Capability) -> Result<(), CliError> {
        if self.config.features.is_enabled(capability) {
            Ok(())
        } else {
            Err(CliError::FeatureDisabled(capability))
        }
    }

    pub async fn analyze(&self, data: Value) -> Result<String, CliError> {
        let capability = Capability::Analyze;
        self.ensure_enabled(capability)?;
        let data = validated(Payload::from_value(data).into_data(capability))?;
        render(&self.crew.analyze_data(&data).await?)
    }

    pub async fn recommend(&self, data: Value) -> Result<String, CliError> {
        let capability = Capability::Recommend;
        self.ensure_enabled(capability)?;
        let data = validated(Payload::from_value(data).into_data(capability))?;
        render(&self.crew.get_recommendation(&data).await?)
    }

    pub async fn sentiment(&self, text: String) -> Result<String, CliError> {
        self.ensure_enabled(Capability::Sentiment)?;
        let text = validated(Payload::from_value(serde_json::json!({ "text": text })).text())?;
        render(&self.crew.analyze_sentiment(&text).await?)
    }

    pub async fn generate_content(
        &self,
        topic: String,
        content_type: String,
    ) -> Result<String, CliError> {
        self.ensure_enabled(Capability::GenerateContent)?;
        let request = validated(
            Payload::from_value(serde_json::json!({
                "topic": topic,
                "content_type": content_type,
            }))
            .content_request(),
        )?;
        render(
            &self
                .crew
                .generate_content(&request.topic, &request.content_type)
                .await?,
        )
    }

    pub async fn comprehensive(&self, data: Value) -> Result<String, CliError> {
        let capability = Capability::ComprehensiveAnalysis;
        self.ensure_enabled(capability)?;
        let data = validated(Payload::from_value(data).into_data(capability))?;
        render(&self.crew.comprehensive_analysis(&data).await?)
    }
}

/// Parse a `--data` argument; anything that is not JSON is taken as a string
pub fn parse_json_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn validated<T>(result: Result<T, crewgate::PayloadError>) -> Result<T, CliError> {
    result.map_err(|e| CliError::InvalidInput(e.to_string()))
}

fn render<T: Serialize>(envelope: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(envelope)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewgate::{FeatureFlags, MockEngine};
    use serde_json::json;
    use std::sync::Arc;

    fn runner(engine: MockEngine, features: FeatureFlags) -> CapabilityRunner {
        let config = CrewgateConfig {
            features,
            ..CrewgateConfig::default()
        };
        CapabilityRunner::new(CrewService::new(Arc::new(engine)), config)
    }

    #[tokio::test]
    async fn prints_envelope() {
        let runner = runner(
            MockEngine::replying("Detailed analysis result"),
            FeatureFlags::all_enabled(),
        );
        let output = runner.analyze(json!({"data": "test"})).await.unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value, json!({"analysis": "Detailed analysis result"}));
    }

    #[tokio::test]
    async fn honours_feature_flags() {
        let runner = runner(MockEngine::replying("ok"), FeatureFlags::all_disabled());
        let err = runner.sentiment("great".to_string()).await.unwrap_err();
        assert!(matches!(err, CliError::FeatureDisabled(Capability::Sentiment)));
    }

    #[tokio::test]
    async fn validates_input() {
        let runner = runner(MockEngine::replying("ok"), FeatureFlags::all_enabled());
        let err = runner
            .generate_content("Rust".to_string(), String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn plain_text_data_becomes_string() {
        assert_eq!(parse_json_arg("hello"), json!("hello"));
        assert_eq!(parse_json_arg(r#"{"a": 1}"#), json!({"a": 1}));
    }
}
