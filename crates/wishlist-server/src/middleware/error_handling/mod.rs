//! Middleware errors and panics rendered as error responses.

mod handlers;
mod panic;

pub use handlers::handle_error;
pub use panic::catch_panic;
