pub mod jwt;
pub mod password;
pub mod tabular;

pub use jwt::*;
pub use password::*;
pub use tabular::{ImportRow, format_timestamp, parse_participant_table, write_history_table};
