pub mod draw_records;
pub mod draw_sessions;
pub mod participants;
pub mod prizes;
pub mod users;

pub use draw_records as draw_record_entity;
pub use draw_sessions as draw_session_entity;
pub use participants as participant_entity;
pub use prizes as prize_entity;
pub use users as user_entity;
