//! Route modules for TexSvg Server

pub mod health;
pub mod render;

use axum::{extract::DefaultBodyLimit, middleware, Router};

use crate::auth::require_api_key;
use crate::state::AppState;

/// Build the application router.
///
/// Everything under `/v1` sits behind the API key check; `/health` does not.
pub fn app(state: AppState) -> Router {
    let max_body_bytes = state.config().server.max_body_bytes;

    let v1 = render::router()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .merge(health::router())
        .merge(v1)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
