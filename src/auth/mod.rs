//! Authentication: password hashing, JWT, session cookie, and HTTP handlers.

pub mod cookie;
mod handlers;
mod jwt;
mod password;

pub use cookie::{CookiePolicy, SameSite, TOKEN_COOKIE};
pub use handlers::{me, signin, signout, signup};
pub use jwt::{Claims, TokenSigner};
pub use password::PasswordHasher;
