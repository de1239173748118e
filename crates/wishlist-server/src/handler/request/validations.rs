//! Request validation utilities.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};
use validator::ValidationError;

/// Query value that disables a filter.
const ALL: &str = "all";

pub fn validation_error(code: &'static str, message: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.to_string().into());
    error
}

/// Rejects strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(validation_error("blank", "Value cannot be blank"));
    }

    Ok(())
}

/// Deserializes an optional filter where a missing value, an empty string
/// or `all` means no filter.
pub fn deserialize_filter<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = Option::<String>::deserialize(deserializer)?;
    let Some(value) = value else {
        return Ok(None);
    };

    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
        return Ok(None);
    }

    value
        .parse()
        .map(Some)
        .map_err(|_| de::Error::custom(format!("unknown filter value `{value}`")))
}

/// Trims an optional string, turning blank values into `None`.
pub fn normalized_option(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
