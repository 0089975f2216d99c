//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by balloon ID)
//! - No rendering, storage or platform dependencies

pub mod autoplay;
pub mod clock;
pub mod matcher;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{FixedStep, IntervalTimer};
pub use matcher::{Hit, submit};
pub use spawn::{eligible_pool, spawn_balloon};
pub use state::{Balloon, Difficulty, GameEvent, GamePhase, GameState};
pub use tick::{fall, tick};
