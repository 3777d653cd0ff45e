//! HTTP handlers not tied to a feature module.

pub mod http;

pub use http::{health, AppState};
