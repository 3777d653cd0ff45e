//! Shared application state and the health probe.

use axum::{http::StatusCode, Json};
use chrono::Duration;
use serde_json::json;
use std::sync::Arc;

use crate::auth::{CookiePolicy, TokenSigner};
use crate::config::Config;
use crate::db::UserStore;
use crate::services::UserService;

/// Shared application state, built once per process and cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub tokens: TokenSigner,
    pub cookies: CookiePolicy,
}

impl AppState {
    /// Wire the auth components from configuration and a user store.
    pub fn new(config: &Config, store: Arc<dyn UserStore>) -> Self {
        Self {
            users: UserService::new(store),
            tokens: TokenSigner::new(
                &config.jwt_secret,
                Duration::seconds(config.token_ttl_secs),
            ),
            cookies: CookiePolicy::new(config.app_env.is_production(), config.token_ttl_secs),
        }
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }
    pub fn tokens(&self) -> &TokenSigner {
        &self.tokens
    }
    pub fn cookies(&self) -> &CookiePolicy {
        &self.cookies
    }
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "userauth" })),
    )
}
