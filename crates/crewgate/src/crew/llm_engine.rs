//! Engine backed by an OpenAI-compatible chat completions API

use async_trait::async_trait;
use crewgate_core::{Engine, EngineError, EngineMetadata, Result, TaskSpec};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::LlmConfig;

/// Runs every task as one chat completion call
pub struct ChatCompletionEngine {
    client: reqwest::Client,
    config: LlmConfig,
    api_key: Option<String>,
}

impl ChatCompletionEngine {
    /// Create an engine with an explicit API key
    pub fn new(config: LlmConfig, api_key: Option<String>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| EngineError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Create an engine reading the API key from the environment
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        Self::new(config.clone(), config.api_key())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_request(&self, task: &TaskSpec) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt(task),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt(task),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

fn system_prompt(task: &TaskSpec) -> String {
    format!(
        "You are {}. {}\nYour personal goal is: {}",
        task.agent.role, task.agent.backstory, task.agent.goal
    )
}

fn user_prompt(task: &TaskSpec) -> String {
    let mut prompt = format!("Current task: {}\n", task.description);

    if !task.context.is_empty() {
        prompt.push_str("\nContext from previous tasks:\n");
        for (i, output) in task.context.iter().enumerate() {
            prompt.push_str(&format!("[{}] {}\n", i + 1, output));
        }
    }

    prompt.push_str(&format!(
        "\nThis is the expected criteria for your final answer: {}\nRespond with the final answer only.",
        task.expected_output
    ));
    prompt
}

fn parse_response(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| EngineError::InvalidResponse("completion has no message content".to_string()))
}

#[async_trait]
impl Engine for ChatCompletionEngine {
    async fn submit(&self, task: &TaskSpec) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            EngineError::Unavailable(format!(
                "API key not set (expected in ${})",
                self.config.api_key_env
            ))
        })?;

        debug!(
            "Calling {} with model {} for task {}",
            self.endpoint(),
            self.config.model,
            task.id
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&self.build_request(task))
            .send()
            .await
            .map_err(|e| EngineError::Unavailable(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Backend(format!("HTTP {}: {}", status, body)));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))?;

        parse_response(body)
    }

    fn metadata(&self) -> EngineMetadata {
        EngineMetadata {
            name: Some("ChatCompletionEngine".to_string()),
            model: Some(self.config.model.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
