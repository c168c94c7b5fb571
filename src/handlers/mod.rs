pub mod admin;
pub mod auth;
pub mod draw;
pub mod history;
pub mod participant;
pub mod prize;
pub mod session;

pub use admin::admin_config;
pub use auth::auth_config;
pub use draw::draw_config;
pub use history::history_config;
pub use participant::participant_config;
pub use prize::prize_config;
pub use session::session_config;

use actix_web::web;

/// 挂在 /api/v1 下的全部路由
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(auth_config)
        .configure(participant_config)
        .configure(prize_config)
        .configure(draw_config)
        .configure(session_config)
        .configure(history_config)
        .configure(admin_config);
}
