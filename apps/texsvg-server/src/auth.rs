//! API key authentication
//!
//! Requests carry `Authorization: <scheme> <token>`; the token must be in
//! the allow-list loaded at startup. The scheme itself is not checked.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Immutable allow-list of API keys
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    keys: Arc<HashSet<String>>,
}

impl ApiKeys {
    /// Build the allow-list. Empty keys are discarded.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = keys
            .into_iter()
            .map(Into::into)
            .filter(|key: &String| !key.is_empty())
            .collect::<HashSet<_>>();
        Self { keys: Arc::new(keys) }
    }

    /// Exact, case-sensitive membership
    pub fn contains(&self, token: &str) -> bool {
        !token.is_empty() && self.keys.contains(token)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Second whitespace-separated token of an `Authorization` value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.split_whitespace().nth(1)
}

/// Middleware rejecting requests without an allowed key
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .is_some_and(|token| state.api_keys().contains(token));

    if !authorized {
        tracing::debug!("Rejected unauthenticated request to {}", request.uri().path());
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
