//! Request extractors whose rejections render as [`ErrorResponse`] bodies.
//!
//! Each wraps its axum counterpart and converts the rejection into a
//! [`handler::Error`] with a 400 status and a readable context.
//!
//! [`ErrorResponse`]: crate::handler::ErrorResponse
//! [`handler::Error`]: crate::handler::Error

mod json;
mod path;
mod query;
mod validate_json;

pub use self::json::Json;
pub use self::path::Path;
pub use self::query::Query;
pub use self::validate_json::ValidateJson;

/// Tracing target for rejected request extraction.
const TRACING_TARGET: &str = "wishlist_server::extract::reject";

/// Shortens a deserializer message to its first lines.
fn sanitize_error_message(message: &str, max_chars: usize) -> String {
    message
        .lines()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_truncates_lines_and_length() {
        let message = "first line\nsecond line\nthird line";
        assert_eq!(sanitize_error_message(message, 200), "first line second line");
        assert_eq!(sanitize_error_message(message, 5), "first");
    }
}
