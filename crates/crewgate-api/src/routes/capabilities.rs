//! Capability endpoints
//!
//! Every handler runs the same pipeline after the auth middleware has let the
//! request through: feature flag, payload validation, delegation, response.
//! The body is only read once the flag check has passed, so a disabled
//! capability answers 403 whatever was sent.

use axum::{
    Extension, Json,
    body::Bytes,
    extract::{FromRequest, Request, State},
};
use crewgate::{
    AnalysisResult, Capability, ComprehensiveResult, ContentResult, Payload,
    RecommendationResult, SentimentResult,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthenticatedUser;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResponse {
    pub analysis: String,
}

impl From<AnalysisResult> for AnalysisResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            analysis: result.analysis,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecommendationResponse {
    pub recommendations: String,
}

impl From<RecommendationResult> for RecommendationResponse {
    fn from(result: RecommendationResult) -> Self {
        Self {
            recommendations: result.recommendations,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SentimentResponse {
    pub sentiment_analysis: String,
}

impl From<SentimentResult> for SentimentResponse {
    fn from(result: SentimentResult) -> Self {
        Self {
            sentiment_analysis: result.sentiment_analysis,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentResponse {
    pub generated_content: String,
}

impl From<ContentResult> for ContentResponse {
    fn from(result: ContentResult) -> Self {
        Self {
            generated_content: result.generated_content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComprehensiveResponse {
    pub comprehensive_analysis: String,
}

impl From<ComprehensiveResult> for ComprehensiveResponse {
    fn from(result: ComprehensiveResult) -> Self {
        Self {
            comprehensive_analysis: result.comprehensive_analysis,
        }
    }
}

/// Request body of `/sentiment`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SentimentRequest {
    pub text: String,
}

/// Request body of `/generate-content`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentGenerationRequest {
    pub topic: String,
    pub content_type: String,
}

/// Payload of `capability`, read after the feature flag check
async fn enabled_payload(
    state: &AppState,
    capability: Capability,
    request: Request,
) -> ApiResult<Payload> {
    state.ensure_enabled(capability)?;
    let body = Bytes::from_request(request, state).await?;
    Ok(Payload::parse(&body)?)
}

/// Analyze arbitrary data
///
/// Accepts any non-empty JSON value.
#[utoipa::path(
    post,
    path = "/analyze",
    request_body(content = Object, content_type = "application/json", description = "Any non-empty JSON value"),
    responses(
        (status = 200, description = "Analysis result", body = AnalysisResponse),
        (status = 400, description = "No data provided", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
        (status = 403, description = "Feature disabled", body = crate::error::ErrorBody),
        (status = 500, description = "Delegation failed", body = crate::error::ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "capabilities"
)]
pub async fn analyze(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
) -> ApiResult<Json<AnalysisResponse>> {
    let capability = Capability::Analyze;
    let data = enabled_payload(&state, capability, request)
        .await?
        .into_data(capability)?;

    info!("Analyzing data for user {}", user.user_id);
    let result = state
        .crew
        .analyze_data(&data)
        .await
        .map_err(|e| ApiError::internal(capability, e))?;

    Ok(Json(result.into()))
}

/// Personalized recommendations for a user profile
#[utoipa::path(
    post,
    path = "/recommend",
    request_body(content = Object, content_type = "application/json", description = "User profile"),
    responses(
        (status = 200, description = "Recommendations", body = RecommendationResponse),
        (status = 400, description = "No user data provided", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
        (status = 403, description = "Feature disabled", body = crate::error::ErrorBody),
        (status = 500, description = "Delegation failed", body = crate::error::ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "capabilities"
)]
pub async fn recommend(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
) -> ApiResult<Json<RecommendationResponse>> {
    let capability = Capability::Recommend;
    let user_data = enabled_payload(&state, capability, request)
        .await?
        .into_data(capability)?;

    info!("Generating recommendations for user {}", user.user_id);
    let result = state
        .crew
        .get_recommendation(&user_data)
        .await
        .map_err(|e| ApiError::internal(capability, e))?;

    Ok(Json(result.into()))
}

/// Sentiment of a piece of text
///
/// Body: `{"text": "..."}`.
#[utoipa::path(
    post,
    path = "/sentiment",
    request_body(content = SentimentRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Sentiment analysis", body = SentimentResponse),
        (status = 400, description = "No text provided", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
        (status = 403, description = "Feature disabled", body = crate::error::ErrorBody),
        (status = 500, description = "Delegation failed", body = crate::error::ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "capabilities"
)]
pub async fn sentiment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
) -> ApiResult<Json<SentimentResponse>> {
    let capability = Capability::Sentiment;
    let text = enabled_payload(&state, capability, request)
        .await?
        .text()?;

    info!("Sentiment request from user {}", user.user_id);
    let result = state
        .crew
        .analyze_sentiment(&text)
        .await
        .map_err(|e| ApiError::internal(capability, e))?;

    Ok(Json(result.into()))
}

/// Generate content on a topic
///
/// Body: `{"topic": "...", "content_type": "..."}`.
#[utoipa::path(
    post,
    path = "/generate-content",
    request_body(content = ContentGenerationRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Generated content", body = ContentResponse),
        (status = 400, description = "Topic or content type missing", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
        (status = 403, description = "Feature disabled", body = crate::error::ErrorBody),
        (status = 500, description = "Delegation failed", body = crate::error::ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "capabilities"
)]
pub async fn generate_content(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
) -> ApiResult<Json<ContentResponse>> {
    let capability = Capability::GenerateContent;
    let content = enabled_payload(&state, capability, request)
        .await?
        .content_request()?;

    info!(
        "Generating {} about '{}' for user {}",
        content.content_type, content.topic, user.user_id
    );
    let result = state
        .crew
        .generate_content(&content.topic, &content.content_type)
        .await
        .map_err(|e| ApiError::internal(capability, e))?;

    Ok(Json(result.into()))
}

/// Analysis, sentiment, recommendations and a summary in one run
#[utoipa::path(
    post,
    path = "/comprehensive-analysis",
    request_body(content = Object, content_type = "application/json", description = "Any non-empty JSON value"),
    responses(
        (status = 200, description = "Comprehensive report", body = ComprehensiveResponse),
        (status = 400, description = "No data provided", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
        (status = 403, description = "Feature disabled", body = crate::error::ErrorBody),
        (status = 500, description = "Delegation failed", body = crate::error::ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "capabilities"
)]
pub async fn comprehensive_analysis(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
) -> ApiResult<Json<ComprehensiveResponse>> {
    let capability = Capability::ComprehensiveAnalysis;
    let data = enabled_payload(&state, capability, request)
        .await?
        .into_data(capability)?;

    info!("Running comprehensive analysis for user {}", user.user_id);
    let result = state
        .crew
        .comprehensive_analysis(&data)
        .await
        .map_err(|e| ApiError::internal(capability, e))?;

    Ok(Json(result.into()))
}

/// Routes for capability endpoints
pub fn routes() -> axum::Router<AppState> {
    use axum::routing::post;

    axum::Router::new()
        .route(Capability::Analyze.path(), post(analyze))
        .route(Capability::Recommend.path(), post(recommend))
        .route(Capability::Sentiment.path(), post(sentiment))
        .route(Capability::GenerateContent.path(), post(generate_content))
        .route(
            Capability::ComprehensiveAnalysis.path(),
            post(comprehensive_analysis),
        )
}
