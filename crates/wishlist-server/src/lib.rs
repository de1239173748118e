#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};

// Tracing target constants for consistent logging.

/// Tracing target for bearer token verification.
pub const TRACING_TARGET_AUTHENTICATION: &str = "wishlist_server::extract::auth";

/// Tracing target for the wishlist service and its store.
pub const TRACING_TARGET_WISHLIST: &str = "wishlist_server::service::wishlist";

/// Tracing target for the profile service.
pub const TRACING_TARGET_PROFILE: &str = "wishlist_server::service::profile";
