//! [`Error`], [`ErrorKind`] and [`Result`].

mod http_error;
mod wishlist_error;

pub use http_error::{Error, ErrorKind, Result};
pub use wishlist_error::{ActionFailure, VoteFailure};
