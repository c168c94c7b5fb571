pub mod admin_service;
pub mod auth_service;
pub mod draw_service;
pub mod history_service;
pub mod participant_service;
pub mod prize_service;

pub use admin_service::*;
pub use auth_service::*;
pub use draw_service::*;
pub use history_service::*;
pub use participant_service::*;
pub use prize_service::*;
