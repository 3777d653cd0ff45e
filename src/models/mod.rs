//! Data models: user role, public user view, request schemas.

pub mod request;
pub mod user;

pub use request::*;
pub use user::*;
