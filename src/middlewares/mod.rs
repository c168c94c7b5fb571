pub mod auth;
pub mod cors;

pub use auth::{AuthMiddleware, current_operator};
pub use cors::create_cors;
