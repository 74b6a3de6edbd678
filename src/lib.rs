pub use auth::{sign_in, AuthError, LoginForm};
pub use client::ApiClient;
pub use config::{ClientConfig, Environment};
pub use error::{Error, Result};
pub use leaderboard::{LeaderboardState, LeaderboardView};
pub use model::*;
pub use navigation::NavigationIntent;
pub use ranking::{podium, rank_students};
pub use session::{FileSessionStore, Identity, MemorySessionStore, Session, SessionStore};

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod model;
pub mod navigation;
pub mod ranking;
pub mod session;
pub(crate) mod api;
