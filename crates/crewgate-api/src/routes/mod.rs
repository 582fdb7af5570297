use crate::AppState;
use crate::middleware::auth_middleware;
use axum::{Router, middleware};

pub mod capabilities;
pub mod health;

/// Merge all routes
///
/// Only the capability routes sit behind the bearer-token check.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new().merge(health::routes()).merge(
        capabilities::routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
    )
}
