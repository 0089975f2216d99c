//! Typing Balloon - pop falling word balloons by typing them
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (spawner, ticker, matcher)
//! - `session`: Screen lifecycle and leaderboard/settings wiring
//! - `words`: Word entries, bundled fallback list, word sources
//! - `persistence`: Key/value storage backends
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod words;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScores;
pub use session::{Screen, Session, Snapshot};
pub use settings::{Settings, Theme};
pub use tuning::Tuning;
pub use words::{Category, WordEntry};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation step (one balloon fall unit)
    pub const TICK_MS: u32 = 50;
    /// Maximum fixed steps per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area height; balloons spawn here and land at 0
    pub const PLAY_AREA_TOP: f32 = 100.0;
    pub const PLAY_AREA_GROUND: f32 = 0.0;

    /// Horizontal spawn band (percent of play area width)
    pub const SPAWN_X_MIN: f32 = 10.0;
    pub const SPAWN_X_MAX: f32 = 90.0;

    /// Lives at the start of each round
    pub const STARTING_LIVES: u32 = 3;
}

/// Normalize typed or stored text for comparison (trimmed, lowercase)
#[inline]
pub fn normalize_term(text: &str) -> String {
    text.trim().to_lowercase()
}
