//! Auth extractor for protected routes: identity from the `token` cookie.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::auth::Claims;
use crate::error::AppError;
use crate::handlers::http::AppState;

/// Extractor: verified claims of the caller.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = state
            .cookies()
            .read(&parts.headers)
            .ok_or_else(|| AppError::InvalidToken("missing token cookie".to_string()))?;
        let claims = state.tokens().verify(&token).map_err(|e| {
            debug!(error = %e, "rejected token");
            e
        })?;
        Ok(AuthUser(claims))
    }
}
