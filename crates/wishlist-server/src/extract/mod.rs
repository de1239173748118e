//! Request extractors.
//!
//! - [`AuthState`] - the caller verified from an identity-provider bearer token
//! - [`Json`], [`ValidateJson`], [`Path`] and [`Query`] - axum extractors whose
//!   rejections render as the standard error envelope

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AuthClaims, AuthHeader, AuthState};
pub use crate::extract::reject::{Json, Path, Query, ValidateJson};
