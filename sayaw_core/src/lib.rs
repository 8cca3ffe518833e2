pub mod config;
pub mod feedback;
pub mod gameplay;
pub mod input;
pub mod player;
pub mod session;
pub mod time;
pub mod wall;

pub use config::{ConfigError, ScoringConfig, SpawnerConfig};
pub use session::ScoreSession;
