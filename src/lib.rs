//! Minimal user authentication API built with Rust.
//!
//! Signup, signin and signout over a PostgreSQL `users` table, issuing a
//! signed JWT in an HTTP-only `token` cookie.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validation;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;
pub use services::UserService;

use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Build the API router (auth endpoints and health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/signout", post(auth::signout))
        .route("/me", get(auth::me))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
