//! Request types for HTTP handlers.

mod comments;
mod items;
mod paths;
mod profiles;
mod validations;
mod votes;

pub use comments::*;
pub use items::*;
pub use paths::*;
pub use profiles::*;
pub use validations::*;
pub use votes::*;
