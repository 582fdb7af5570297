//! Error types for crewgate-api

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use crewgate::{Capability, PayloadError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    /// The body could not be read, e.g. it is over the size limit
    #[error("{message}")]
    Body { status: StatusCode, message: String },

    #[error("{} feature is currently disabled", .0.label())]
    FeatureDisabled(Capability),

    /// Detail is logged, never returned to the caller
    #[error("{} failed: {detail}", capability_label(.capability))]
    Internal {
        capability: Option<Capability>,
        detail: String,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Wrap a failure from the delegation call for `capability`
    pub fn internal(capability: Capability, err: impl std::fmt::Display) -> Self {
        Self::Internal {
            capability: Some(capability),
            detail: err.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Body { status, .. } => *status,
            ApiError::FeatureDisabled(_) => StatusCode::FORBIDDEN,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The body sent to the client
    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::BadRequest(message) => ErrorBody {
                error: "Invalid Data".to_string(),
                message: message.clone(),
            },
            ApiError::Unauthorized(message) => ErrorBody {
                error: "Unauthorized".to_string(),
                message: message.to_string(),
            },
            ApiError::Body { status, message } => ErrorBody {
                error: status
                    .canonical_reason()
                    .unwrap_or("Invalid Data")
                    .to_string(),
                message: message.clone(),
            },
            ApiError::FeatureDisabled(_) => ErrorBody {
                error: "Feature Disabled".to_string(),
                message: self.to_string(),
            },
            ApiError::Internal { capability, .. } => internal_body(*capability),
        }
    }
}

/// Generic body for unexpected failures
pub fn internal_body(capability: Option<Capability>) -> ErrorBody {
    match capability {
        Some(capability) => ErrorBody {
            error: capability.error_title().to_string(),
            message: format!(
                "An error occurred during {}",
                capability.label().to_lowercase()
            ),
        },
        None => ErrorBody {
            error: "Internal Server Error".to_string(),
            message: "An unexpected error occurred".to_string(),
        },
    }
}

fn capability_label(capability: &Option<Capability>) -> &'static str {
    capability.map(|c| c.label()).unwrap_or("Request")
}

impl From<PayloadError> for ApiError {
    fn from(err: PayloadError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Body {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal { .. } => tracing::error!("{}", self),
            ApiError::FeatureDisabled(_) => tracing::warn!("{}", self),
            ApiError::BadRequest(message) => tracing::warn!("Invalid request data: {}", message),
            ApiError::Unauthorized(message) => tracing::warn!("Rejected request: {}", message),
            ApiError::Body { message, .. } => tracing::warn!("Unreadable request body: {}", message),
        }

        (self.status(), Json(self.body())).into_response()
    }
}
