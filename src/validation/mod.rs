//! Request validation: JSON extraction, normalization, and schema checks.
//!
//! [`ValidatedJson`] is the first stage of every body-carrying handler. It
//! rejects with [`AppError::ValidationFailed`], listing every field violation
//! at once rather than stopping at the first.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, FieldError};

/// Canonicalize a request value before it is validated.
pub trait Normalize {
    fn normalize(self) -> Self;
}

/// Field deserializer that never fails: a non-string value (`null`, number,
/// object) becomes `""`, so the field's own rule reports it alongside the
/// other fields instead of rejecting the whole body.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

/// Extractor yielding a deserialized, normalized and validated body.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Normalize,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;
        validate(value).map(ValidatedJson)
    }
}

/// Normalize then validate a value, collecting all field errors.
pub fn validate<T>(value: T) -> Result<T, AppError>
where
    T: Validate + Normalize,
{
    let value = value.normalize();
    value
        .validate()
        .map_err(|e| AppError::ValidationFailed(field_errors(&e)))?;
    Ok(value)
}

/// Flatten `validator` errors into a stable, sorted list.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    out
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection, "rejected request body");
    AppError::ValidationFailed(vec![FieldError::new("body", rejection.body_text())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SigninRequest, SignupRequest};

    #[test]
    fn validate_reports_all_fields_sorted() {
        let req = SignupRequest {
            name: "   ".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let err = validate(req).unwrap_err();
        let AppError::ValidationFailed(details) = err else {
            panic!("expected validation failure");
        };
        let fields: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "name", "password"]);
        assert_eq!(details[0].message, "Invalid email");
    }

    #[test]
    fn wrongly_typed_fields_are_reported_per_field() {
        let req: SignupRequest =
            serde_json::from_str(r#"{"name":null,"email":"bad","password":12345678}"#).unwrap();
        let AppError::ValidationFailed(details) = validate(req).unwrap_err() else {
            panic!("expected validation failure");
        };
        let fields: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "name", "password"]);
    }

    #[test]
    fn validate_returns_normalized_value() {
        let req = SigninRequest {
            email: "  USER@Example.com".to_string(),
            password: "secret".to_string(),
        };
        let req = validate(req).unwrap();
        assert_eq!(req.email, "user@example.com");
    }
}
