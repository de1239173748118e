//! Bearer token authentication.
//!
//! - [`AuthHeader`] - verifies the `Authorization: Bearer` token
//! - [`AuthClaims`] - identity-provider claims carried by the token
//! - [`AuthState`] - the authenticated caller

mod auth_state;
mod jwt_header;

pub use self::auth_state::AuthState;
pub use self::jwt_header::{AuthClaims, AuthHeader};
