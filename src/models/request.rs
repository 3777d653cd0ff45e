//! Request body schemas for the auth endpoints.

use serde::Deserialize;
use validator::Validate;

use crate::validation::{lenient_string, Normalize};

/// Body of `POST /signup`.
///
/// Missing or non-string fields become empty strings so they are reported
/// as field errors instead of a deserialization rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

impl Normalize for SignupRequest {
    fn normalize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password,
        }
    }
}

/// Body of `POST /signin`.
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl Normalize for SigninRequest {
    fn normalize(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            password: self.password,
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_normalizes_name_and_email() {
        let req = SignupRequest {
            name: "  Ada  ".to_string(),
            email: " Ada@Example.COM ".to_string(),
            password: " keep spaces ".to_string(),
        }
        .normalize();
        assert_eq!(req.name, "Ada");
        assert_eq!(req.email, "ada@example.com");
        assert_eq!(req.password, " keep spaces ");
    }

    #[test]
    fn signup_collects_every_field_error() {
        let req: SignupRequest = serde_json::from_str(r#"{"email":"nope"}"#).unwrap();
        let errors = req.normalize().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn signin_accepts_valid_body() {
        let req: SigninRequest =
            serde_json::from_str(r#"{"email":"a@b.co","password":"x"}"#).unwrap();
        assert!(req.normalize().validate().is_ok());
    }

    #[test]
    fn signin_requires_password() {
        let req: SigninRequest = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
