//! Query string extractor.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::{TRACING_TARGET, sanitize_error_message};
use crate::handler::{Error, ErrorKind};

/// Drop-in replacement for [`axum::extract::Query`] with descriptive rejections.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T> Query<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumQuery::<T>::from_request_parts(parts, state).await {
            Ok(AxumQuery(query)) => Ok(Query(query)),
            Err(rejection) => Err(enhance_query_error(rejection)),
        }
    }
}

fn enhance_query_error(rejection: QueryRejection) -> Error<'static> {
    tracing::debug!(
        target: TRACING_TARGET,
        error = %rejection,
        "Query parameters rejected"
    );

    let error_message = rejection.body_text();
    let field_name = extract_field_name_from_error(&error_message).unwrap_or("unknown");

    let error = if error_message.contains("unknown variant") || error_message.contains("unknown filter value") {
        ErrorKind::BadRequest
            .with_message("Unsupported query parameter value")
            .with_context(sanitize_error_message(&error_message, 200))
    } else if error_message.contains("duplicate field") {
        ErrorKind::BadRequest
            .with_message("Duplicate query parameter")
            .with_context(format!(
                "The query parameter '{field_name}' was provided multiple times"
            ))
    } else {
        ErrorKind::BadRequest
            .with_message("Invalid query parameters")
            .with_context(sanitize_error_message(&error_message, 200))
    };

    error.with_resource("request")
}

/// Pulls the quoted field name out of a serde error message.
fn extract_field_name_from_error(error_message: &str) -> Option<&str> {
    let start = error_message.find('`')? + 1;
    let end = error_message[start..].find('`')?;
    Some(&error_message[start..start + end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_are_extracted() {
        assert_eq!(
            extract_field_name_from_error("duplicate field `sortBy`"),
            Some("sortBy")
        );
        assert_eq!(extract_field_name_from_error("some other error"), None);
    }

    #[test]
    fn query_wrapper_round_trips() {
        let query = Query::new("score".to_string());
        assert_eq!(query.into_inner(), "score");
    }
}
