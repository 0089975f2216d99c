//! Round state and core simulation types
//!
//! One `GameState` is one round: created when play starts, frozen at game
//! over, dropped on restart or return to the menu.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::IntervalTimer;
use super::spawn::eligible_pool;
use crate::consts::PLAY_AREA_GROUND;
use crate::tuning::Tuning;
use crate::words::{Category, WordEntry};

/// Difficulty tier: spawn cadence and word length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Longest term allowed, in characters (None = unrestricted)
    pub fn max_term_len(&self) -> Option<usize> {
        match self {
            Difficulty::Easy => Some(4),
            Difficulty::Normal => Some(6),
            Difficulty::Hard => None,
        }
    }

    /// Whether a word may spawn at this tier
    pub fn admits(&self, word: &WordEntry) -> bool {
        self.max_term_len().is_none_or(|max| word.term_len() <= max)
    }
}

/// Phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Balloons falling, input accepted
    Playing,
    /// Lives exhausted; the round is frozen
    GameOver,
}

/// A falling word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balloon {
    pub id: u32,
    pub term: String,
    pub translation: String,
    /// x: percent of width, y: percent of height above the ground
    pub pos: Vec2,
}

impl Balloon {
    pub fn height(&self) -> f32 {
        self.pos.y
    }

    /// Touching the ground (checked before the tick's fall step)
    pub fn landed(&self) -> bool {
        self.pos.y <= PLAY_AREA_GROUND
    }
}

/// Something that happened during a tick or a submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    Spawned { id: u32, term: String },
    Popped {
        id: u32,
        term: String,
        translation: String,
        points: u64,
        combo: u32,
    },
    Missed {
        id: u32,
        term: String,
        lives_left: u32,
    },
    GameOver { score: u64 },
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub category: Category,
    pub difficulty: Difficulty,
    /// Balance values fixed at round start
    pub tuning: Tuning,
    /// Words eligible to spawn (category and difficulty applied)
    pub pool: Vec<WordEntry>,
    pub lives: u32,
    pub score: u64,
    pub combo: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Text currently in the input field
    pub input: String,
    /// Active balloons, ascending id
    pub balloons: Vec<Balloon>,
    pub spawn_timer: IntervalTimer,
    /// Undrained events, oldest first
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Start a fresh round
    pub fn new(
        seed: u64,
        category: Category,
        difficulty: Difficulty,
        words: &[WordEntry],
        tuning: &Tuning,
    ) -> Self {
        let tuning = tuning.clone().sanitized();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            category,
            difficulty,
            pool: eligible_pool(words, category, difficulty),
            lives: tuning.starting_lives,
            score: 0,
            combo: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            input: String::new(),
            balloons: Vec::new(),
            spawn_timer: IntervalTimer::new(tuning.spawn_ms(difficulty)),
            tuning,
            events: Vec::new(),
            next_id: 0,
        }
    }

    /// Allocate a new balloon id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure balloons are sorted by id (spawn order)
    pub fn normalize_order(&mut self) {
        self.balloons.sort_by_key(|b| b.id);
    }
}
