mod auth;
mod leaderboard;
mod student;

pub use auth::*;
pub use leaderboard::*;
pub use student::*;
