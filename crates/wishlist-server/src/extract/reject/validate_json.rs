//! JSON body extractor that runs `validator` rules after deserialization.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::{Json, TRACING_TARGET};
use crate::handler::{Error, ErrorKind};

/// [`Json`] that also requires the body to pass [`Validate`].
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self::new(data))
    }
}

type Params = HashMap<Cow<'static, str>, serde_json::Value>;

fn bound(params: &Params, key: &str) -> Option<f64> {
    params.get(key).and_then(serde_json::Value::as_f64)
}

fn format_length_error(field: &str, params: &Params) -> String {
    match (bound(params, "min"), bound(params, "max")) {
        (Some(min), Some(max)) => {
            format!("Field '{field}' must be between {min} and {max} characters long")
        }
        (Some(min), None) => format!("Field '{field}' must be at least {min} characters long"),
        (None, Some(max)) => format!("Field '{field}' must be at most {max} characters long"),
        (None, None) => format!("Field '{field}' has invalid length"),
    }
}

fn format_range_error(field: &str, params: &Params) -> String {
    match (bound(params, "min"), bound(params, "max")) {
        (Some(min), Some(max)) => format!("Field '{field}' must be between {min} and {max}"),
        (Some(min), None) => format!("Field '{field}' must be at least {min}"),
        (None, Some(max)) => format!("Field '{field}' must be at most {max}"),
        (None, None) => format!("Field '{field}' is out of valid range"),
    }
}

fn format_validation_error(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("Field '{field}': {message}");
    }

    match error.code.as_ref() {
        "length" => format_length_error(field, &error.params),
        "range" => format_range_error(field, &error.params),
        "url" => format!("Field '{field}' must be a valid URL (e.g., https://example.com)"),
        "required" => format!("Field '{field}' is required"),
        code => format!("Field '{field}' failed validation: {code}"),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();
        messages.sort();

        tracing::debug!(
            target: TRACING_TARGET,
            errors = ?errors.field_errors(),
            "Request validation failed"
        );

        let message = match messages.as_slice() {
            [] => "Validation failed".to_owned(),
            messages => messages.join(". "),
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 5))]
        name: String,
        #[validate(range(min = 0.0))]
        cost: f64,
    }

    #[test]
    fn validation_errors_become_bad_request() {
        let sample = Sample {
            name: "too long name".into(),
            cost: -2.0,
        };
        let error = Error::from(sample.validate().unwrap_err());

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.resource(), Some("request"));

        let message = error.message().unwrap();
        assert!(message.contains("Field 'cost' must be at least 0"));
        assert!(message.contains("Field 'name' must be between 1 and 5 characters long"));
    }

    #[test]
    fn custom_message_wins() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Value cannot be blank".into());

        assert_eq!(
            format_validation_error("name", &error),
            "Field 'name': Value cannot be blank"
        );
    }
}
