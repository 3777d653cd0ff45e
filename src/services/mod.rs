//! Business logic: user accounts.

pub mod user;

pub use user::UserService;
