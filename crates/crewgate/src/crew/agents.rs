use crewgate_core::AgentProfile;

/// The agents the crew is staffed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRoster {
    pub analyst: AgentProfile,
    pub recommender: AgentProfile,
    pub sentiment_analyzer: AgentProfile,
    pub content_creator: AgentProfile,
    pub report_writer: AgentProfile,
}

impl Default for AgentRoster {
    fn default() -> Self {
        Self {
            analyst: AgentProfile::new(
                "Data Analyst",
                "Analyze data and provide insights",
                "Expert in data analysis with years of experience",
            ),
            recommender: AgentProfile::new(
                "Recommendation Specialist",
                "Provide personalized recommendations",
                "AI specialist in creating tailored suggestions",
            ),
            sentiment_analyzer: AgentProfile::new(
                "Sentiment Analyst",
                "Determine the sentiment and emotional tone of text",
                "Linguist who has spent a career reading between the lines of customer feedback",
            ),
            content_creator: AgentProfile::new(
                "Content Creator",
                "Write engaging content on any topic and in any format",
                "Versatile writer experienced in blogs, newsletters and marketing copy",
            ),
            report_writer: AgentProfile::new(
                "Report Writer",
                "Combine findings from other specialists into one clear report",
                "Analyst turned editor who turns scattered findings into concise summaries",
            ),
        }
    }
}
