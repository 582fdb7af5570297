use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A user-facing operation the service can delegate to the crew
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    Analyze,
    Recommend,
    Sentiment,
    GenerateContent,
    ComprehensiveAnalysis,
}

impl Capability {
    /// All capabilities in declaration order
    pub fn all() -> Vec<Capability> {
        Capability::iter().collect()
    }

    /// Human label used in logs and error messages ("Sentiment analysis")
    pub fn label(&self) -> &'static str {
        match self {
            Capability::Analyze => "Data analysis",
            Capability::Recommend => "Recommendation",
            Capability::Sentiment => "Sentiment analysis",
            Capability::GenerateContent => "Content generation",
            Capability::ComprehensiveAnalysis => "Comprehensive analysis",
        }
    }

    /// Title reported when the delegation fails ("Sentiment Analysis Error")
    pub fn error_title(&self) -> &'static str {
        match self {
            Capability::Analyze => "Data Analysis Error",
            Capability::Recommend => "Recommendation Error",
            Capability::Sentiment => "Sentiment Analysis Error",
            Capability::GenerateContent => "Content Generation Error",
            Capability::ComprehensiveAnalysis => "Comprehensive Analysis Error",
        }
    }

    /// Key the engine output is wrapped under in the result envelope
    pub fn envelope_key(&self) -> &'static str {
        match self {
            Capability::Analyze => "analysis",
            Capability::Recommend => "recommendations",
            Capability::Sentiment => "sentiment_analysis",
            Capability::GenerateContent => "generated_content",
            Capability::ComprehensiveAnalysis => "comprehensive_analysis",
        }
    }

    /// HTTP path serving this capability
    pub fn path(&self) -> &'static str {
        match self {
            Capability::Analyze => "/analyze",
            Capability::Recommend => "/recommend",
            Capability::Sentiment => "/sentiment",
            Capability::GenerateContent => "/generate-content",
            Capability::ComprehensiveAnalysis => "/comprehensive-analysis",
        }
    }
}
