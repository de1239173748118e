use std::borrow::Cow;

use wishlist_postgres::PgError;

/// Result type of wishlist and profile operations.
pub type WishlistResult<T, E = WishlistError> = Result<T, E>;

/// Failure of a wishlist or profile operation.
///
/// Every variant except [`WishlistError::Store`] is detected before anything
/// is written.
#[derive(Debug, thiserror::Error)]
pub enum WishlistError {
    /// The item, comment or profile does not exist.
    #[error("{0}")]
    NotFound(Cow<'static, str>),

    /// The caller does not own the record.
    #[error("{0}")]
    Forbidden(Cow<'static, str>),

    /// The input breaks a structural rule.
    #[error("{0}")]
    Validation(Cow<'static, str>),

    /// The record store failed.
    #[error("{message}")]
    Store {
        message: Cow<'static, str>,
        #[source]
        source: PgError,
    },
}

impl WishlistError {
    /// Wraps a store failure under a user-facing message.
    pub fn store(message: impl Into<Cow<'static, str>>, source: PgError) -> Self {
        Self::Store {
            message: message.into(),
            source,
        }
    }

    /// Returns the user-facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(message) | Self::Forbidden(message) | Self::Validation(message) => {
                message
            }
            Self::Store { message, .. } => message,
        }
    }
}
