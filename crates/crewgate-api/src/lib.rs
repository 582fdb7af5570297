use axum::{
    Json, Router,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use crewgate::{Capability, CrewService, CrewgateConfig, FeatureFlags, SharedEngine};
use std::any::Any;
use std::sync::{Arc, RwLock};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorBody};
pub use middleware::{AuthenticatedUser, TokenTable};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub crew: CrewService,
    pub tokens: Arc<TokenTable>,
    features: Arc<RwLock<FeatureFlags>>,
}

impl AppState {
    pub fn new(crew: CrewService, tokens: TokenTable, features: FeatureFlags) -> Self {
        Self {
            crew,
            tokens: Arc::new(tokens),
            features: Arc::new(RwLock::new(features)),
        }
    }

    pub fn from_config(engine: SharedEngine, config: &CrewgateConfig) -> Self {
        Self::new(
            CrewService::new(engine),
            TokenTable::from_config(&config.auth),
            config.features.clone(),
        )
    }

    /// Current feature flags
    pub fn features(&self) -> FeatureFlags {
        self.features
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.features
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_enabled(capability)
    }

    /// Fail with 403 unless `capability` is switched on right now
    pub fn ensure_enabled(&self, capability: Capability) -> ApiResult<()> {
        if self.is_enabled(capability) {
            Ok(())
        } else {
            Err(ApiError::FeatureDisabled(capability))
        }
    }

    pub fn set_feature(&self, capability: Capability, enabled: bool) {
        self.features
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .set(capability, enabled);
    }

    pub fn replace_features(&self, features: FeatureFlags) {
        *self
            .features
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = features;
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::home,
        crate::routes::health::health_check,
        crate::routes::capabilities::analyze,
        crate::routes::capabilities::recommend,
        crate::routes::capabilities::sentiment,
        crate::routes::capabilities::generate_content,
        crate::routes::capabilities::comprehensive_analysis,
    ),
    components(
        schemas(
            crate::routes::health::HealthResponse,
            crate::routes::capabilities::AnalysisResponse,
            crate::routes::capabilities::RecommendationResponse,
            crate::routes::capabilities::SentimentResponse,
            crate::routes::capabilities::ContentResponse,
            crate::routes::capabilities::ComprehensiveResponse,
            crate::routes::capabilities::SentimentRequest,
            crate::routes::capabilities::ContentGenerationRequest,
            crate::error::ErrorBody,
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "capabilities", description = "Work delegated to the agent crew")
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

/// Build API application
pub fn build_app(state: AppState, config: &ApiConfig) -> Router {
    let mut app = Router::new().merge(routes::routes(&state));

    if config.enable_swagger {
        app = app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    app.layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn cors_layer(config: &config::CorsConfig) -> CorsLayer {
    if config.allow_any_origin {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Panics inside a handler surface as an opaque 500
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(error::internal_body(None)),
    )
        .into_response()
}
