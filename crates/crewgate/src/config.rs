use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::capability::Capability;
use crate::error::ConfigError;

/// Crewgate configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrewgateConfig {
    /// Which capabilities are switched on
    pub features: FeatureFlags,

    /// Settings handed to the engine
    pub llm: LlmConfig,

    /// Bearer token table
    pub auth: AuthConfig,
}

impl CrewgateConfig {
    /// Load from configuration file (TOML, or JSON when the extension is `.json`)
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = if is_json(path) {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Reject values serde cannot catch on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.features.validate()?;

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Invalid(format!(
                "llm.temperature must be between 0 and 2, got {}",
                self.llm.temperature
            )));
        }
        if self.llm.max_tokens == 0 {
            return Err(ConfigError::Invalid(
                "llm.max_tokens must be positive".to_string(),
            ));
        }
        if self.auth.tokens.keys().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "auth.tokens contains an empty token".to_string(),
            ));
        }

        Ok(())
    }
}

/// Whether a path names a JSON file
pub fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Capability name to enabled flag.
///
/// A capability missing from the table is disabled. When the whole table is
/// absent from the config file every capability is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags(BTreeMap<String, bool>);

impl FeatureFlags {
    /// Every capability switched on
    pub fn all_enabled() -> Self {
        Self(
            Capability::all()
                .into_iter()
                .map(|c| (c.to_string(), true))
                .collect(),
        )
    }

    /// Every capability switched off
    pub fn all_disabled() -> Self {
        Self(BTreeMap::new())
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        let name: &str = capability.as_ref();
        self.0.get(name).copied().unwrap_or(false)
    }

    pub fn set(&mut self, capability: Capability, enabled: bool) {
        self.0.insert(capability.to_string(), enabled);
    }

    pub fn with(mut self, capability: Capability, enabled: bool) -> Self {
        self.set(capability, enabled);
        self
    }

    /// Capabilities currently switched on
    pub fn enabled(&self) -> Vec<Capability> {
        Capability::all()
            .into_iter()
            .filter(|c| self.is_enabled(*c))
            .collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.0.keys().find(|name| Capability::from_str(name).is_err()) {
            Some(name) => Err(ConfigError::UnknownFeature(name.clone())),
            None => Ok(()),
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self::all_enabled()
    }
}

/// Engine (LLM) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,

    /// Model name
    pub model: String,

    /// Maximum tokens per completion
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f64,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Per-call timeout in seconds; unset means wait indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1500,
            temperature: 0.7,
            api_key_env: "OPENAI_API_KEY".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Authentication configuration
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Bearer token to user identifier
    pub tokens: BTreeMap<String, String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("tokens", &format_args!("<{} redacted>", self.tokens.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_features_table_enables_everything() {
        let config = CrewgateConfig::from_toml_str("").unwrap();
        for capability in Capability::all() {
            assert!(config.features.is_enabled(capability));
        }
    }

    #[test]
    fn capability_absent_from_table_is_disabled() {
        let config = CrewgateConfig::from_toml_str(
            r#"
            [features]
            analyze = true
            sentiment = false
            "#,
        )
        .unwrap();

        assert!(config.features.is_enabled(Capability::Analyze));
        assert!(!config.features.is_enabled(Capability::Sentiment));
        assert!(!config.features.is_enabled(Capability::Recommend));
        assert_eq!(config.features.enabled(), vec![Capability::Analyze]);
    }

    #[test]
    fn unknown_feature_is_rejected() {
        let config = CrewgateConfig::from_toml_str(
            r#"
            [features]
            telepathy = true
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownFeature(name)) if name == "telepathy"
        ));
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let config = CrewgateConfig::from_toml_str(
            r#"
            [llm]
            temperature = 3.5
            "#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn loads_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crewgate.json");
        std::fs::write(
            &path,
            r#"{"auth": {"tokens": {"secret-token-1": "user1"}}, "llm": {"model": "test_model", "max_tokens": 100}}"#,
        )
        .unwrap();

        let config = CrewgateConfig::load_from_file(&path).unwrap();
        assert_eq!(config.llm.model, "test_model");
        assert_eq!(config.llm.max_tokens, 100);
        assert_eq!(config.auth.tokens.get("secret-token-1").unwrap(), "user1");
    }

    #[test]
    fn toml_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crewgate.toml");

        let mut config = CrewgateConfig::default();
        config.features.set(Capability::Recommend, false);
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        let loaded = CrewgateConfig::load_from_file(&path).unwrap();
        assert!(!loaded.features.is_enabled(Capability::Recommend));
        assert!(loaded.features.is_enabled(Capability::Analyze));
    }

    #[test]
    fn debug_output_hides_tokens() {
        let mut auth = AuthConfig::default();
        auth.tokens.insert("very-secret".to_string(), "user1".to_string());
        let rendered = format!("{:?}", auth);
        assert!(!rendered.contains("very-secret"));
    }
}
