//! Response types for HTTP handlers.

mod actions;
mod comments;
mod error_response;
mod items;
mod monitors;
mod profiles;
mod stats;

pub use actions::*;
pub use comments::*;
pub use error_response::ErrorResponse;
pub use items::*;
pub use monitors::*;
pub use profiles::*;
pub use stats::*;
