//! Server startup and runtime errors.

use std::io;

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the configured address.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("Runtime error: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Returns a human-readable hint for resolving the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        let source = match self {
            Self::Bind { source, .. } | Self::Runtime(source) => source,
        };

        match source.kind() {
            io::ErrorKind::PermissionDenied => {
                Some("Try using a port above 1024 or run with appropriate privileges")
            }
            io::ErrorKind::AddrInUse => Some(
                "The port is already in use. Try a different port or stop the conflicting service",
            ),
            io::ErrorKind::AddrNotAvailable => {
                Some("The address is not available. Check network interface configuration")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_in_use_has_a_suggestion() {
        let error = ServerError::Bind {
            address: "127.0.0.1:3000".into(),
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };

        assert!(error.to_string().contains("127.0.0.1:3000"));
        assert!(error.suggestion().is_some_and(|s| s.contains("already in use")));
    }

    #[test]
    fn other_errors_have_none() {
        let error = ServerError::Runtime(io::Error::other("boom"));
        assert_eq!(error.suggestion(), None);
    }
}
