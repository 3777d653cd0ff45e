//! Auth HTTP handlers: signup, signin, signout, me.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::AuthUser;
use crate::models::{PublicUser, SigninRequest, SignupRequest, UserRole};
use crate::validation::ValidatedJson;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: crate::auth::Claims,
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users()
        .create_user(&body.name, &body.email, &body.password, UserRole::User)
        .await?;
    let token = state.tokens().sign(&user)?;
    let cookie = state.cookies().attach(&token)?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "User created successfully",
            user,
        }),
    ))
}

/// POST /signin
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SigninRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users()
        .authenticate_user(&body.email, &body.password)
        .await?;
    let token = state.tokens().sign(&user)?;
    let cookie = state.cookies().attach(&token)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "User signed in successfully",
            user,
        }),
    ))
}

/// POST /signout — always succeeds, with or without a cookie.
pub async fn signout(State(state): State<AppState>) -> impl IntoResponse {
    info!("user signed out");
    (
        StatusCode::OK,
        [(header::SET_COOKIE, state.cookies().clear())],
        Json(MessageResponse {
            message: "User signed out successfully",
        }),
    )
}

/// GET /me — claims of the caller's `token` cookie.
pub async fn me(AuthUser(claims): AuthUser) -> Json<MeResponse> {
    Json(MeResponse { user: claims })
}
