use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};
use crewgate::AuthConfig;
use std::collections::HashMap;

use crate::AppState;
use crate::error::ApiError;

/// Read-only mapping of bearer tokens to user identifiers
#[derive(Clone, Default)]
pub struct TokenTable {
    tokens: HashMap<String, String>,
}

impl TokenTable {
    pub fn new(tokens: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.tokens.clone())
    }

    /// User the token belongs to, if it is known
    pub fn user_for(&self, token: &str) -> Option<&str> {
        self.tokens.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// The caller, as established by the auth middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// Authentication middleware
///
/// Rejects the request with 401 unless it carries `Authorization: Bearer
/// <token>` with a token from the table. On success the caller is added to
/// the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.map_err(|rejection| {
        if rejection.is_missing() {
            ApiError::Unauthorized("Authorization header is missing")
        } else {
            ApiError::Unauthorized("Malformed authorization header")
        }
    })?;

    let user_id = state
        .tokens
        .user_for(bearer.token())
        .ok_or(ApiError::Unauthorized("Invalid token"))?
        .to_string();

    tracing::debug!("Authenticated request from user {}", user_id);
    request.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}
