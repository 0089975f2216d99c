//! Session lifecycle
//!
//! `Session` owns everything mutable: the screen, the current round, the
//! fixed-step driver, settings and the leaderboard. Hosts feed it elapsed
//! time and input text, render from `snapshot()`, and take events with
//! `drain_events()` (only the newest `MAX_PENDING_EVENTS` are kept).
//!
//! Screens: `NotStarted -> Selecting -> Playing -> GameOver`, with restart
//! (same choices) and main menu (choices cleared).

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SUBSTEPS;
use crate::highscores::{HighScoreEntry, HighScores};
use crate::persistence::Storage;
use crate::platform;
use crate::settings::{Settings, Theme};
use crate::sim::{self, Balloon, Difficulty, FixedStep, GameEvent, GameState, Hit, autoplay};
use crate::tuning::Tuning;
use crate::words::{Category, WordEntry};

/// Undrained events kept for the host; older ones are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Screen {
    NotStarted,
    Selecting {
        category: Option<Category>,
        difficulty: Option<Difficulty>,
    },
    Playing,
    GameOver,
}

/// Read-only view for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub lives: u32,
    pub score: u64,
    pub combo: u32,
    pub input: String,
    pub balloons: Vec<Balloon>,
    pub theme: Theme,
    pub show_translations: bool,
    pub paused: bool,
    pub top_score: Option<u64>,
    /// Leaderboard rank of the last finished round
    pub last_rank: Option<usize>,
}

pub struct Session {
    screen: Screen,
    words: Vec<WordEntry>,
    tuning: Tuning,
    round: Option<GameState>,
    driver: FixedStep,
    paused: bool,
    /// Demo typist reaction height, when enabled
    autoplay: Option<f32>,
    next_seed: u64,
    settings: Settings,
    highscores: HighScores,
    storage: Box<dyn Storage>,
    last_rank: Option<usize>,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create a session, loading settings and scores from `storage`
    pub fn new(
        words: Vec<WordEntry>,
        tuning: Tuning,
        storage: Box<dyn Storage>,
        seed: u64,
    ) -> Self {
        let tuning = tuning.sanitized();
        let settings = Settings::load(storage.as_ref());
        let highscores = HighScores::load(storage.as_ref());
        let driver = FixedStep::new(tuning.tick_ms, MAX_SUBSTEPS);
        Self {
            screen: Screen::NotStarted,
            words,
            tuning,
            round: None,
            driver,
            paused: false,
            autoplay: None,
            next_seed: seed,
            settings,
            highscores,
            storage,
            last_rank: None,
            events: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The current round (Playing or GameOver)
    pub fn round(&self) -> Option<&GameState> {
        self.round.as_ref()
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Replace the word list; takes effect from the next round
    pub fn set_words(&mut self, words: Vec<WordEntry>) {
        log::info!("Word list replaced ({} words)", words.len());
        self.words = words;
    }

    pub fn category(&self) -> Option<Category> {
        match self.screen {
            Screen::Selecting { category, .. } => category,
            Screen::Playing | Screen::GameOver => self.round.as_ref().map(|r| r.category),
            Screen::NotStarted => None,
        }
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        match self.screen {
            Screen::Selecting { difficulty, .. } => difficulty,
            Screen::Playing | Screen::GameOver => self.round.as_ref().map(|r| r.difficulty),
            Screen::NotStarted => None,
        }
    }

    /// Choose a category (only before play)
    pub fn select_category(&mut self, choice: Category) -> bool {
        let difficulty = match self.screen {
            Screen::NotStarted => None,
            Screen::Selecting { difficulty, .. } => difficulty,
            Screen::Playing | Screen::GameOver => return false,
        };
        self.screen = Screen::Selecting {
            category: Some(choice),
            difficulty,
        };
        true
    }

    /// Choose a difficulty (only before play)
    pub fn select_difficulty(&mut self, choice: Difficulty) -> bool {
        let category = match self.screen {
            Screen::NotStarted => None,
            Screen::Selecting { category, .. } => category,
            Screen::Playing | Screen::GameOver => return false,
        };
        self.screen = Screen::Selecting {
            category,
            difficulty: Some(choice),
        };
        true
    }

    /// Enter Playing; needs both a category and a difficulty
    pub fn start(&mut self) -> bool {
        let Screen::Selecting {
            category: Some(category),
            difficulty: Some(difficulty),
        } = self.screen
        else {
            log::debug!("Start ignored on {:?}", self.screen);
            return false;
        };
        self.begin_round(category, difficulty);
        true
    }

    /// Fresh round with the same category and difficulty
    pub fn restart(&mut self) -> bool {
        let Some((category, difficulty)) = self.round.as_ref().map(|r| (r.category, r.difficulty))
        else {
            return false;
        };
        self.begin_round(category, difficulty);
        true
    }

    /// Back to selection with both choices cleared
    pub fn main_menu(&mut self) {
        self.round = None;
        self.driver.reset();
        self.paused = false;
        self.screen = Screen::Selecting {
            category: None,
            difficulty: None,
        };
        log::info!("Back to main menu");
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::info!("{}", if paused { "Paused" } else { "Resumed" });
        }
        self.paused = paused;
        self.driver.reset();
    }

    /// Enable the demo typist, which types a balloon once it falls below
    /// `reaction_height`
    pub fn set_autoplay(&mut self, reaction_height: Option<f32>) {
        self.autoplay = reaction_height;
    }

    /// Feed elapsed wall time; returns the number of fixed steps run
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if self.screen != Screen::Playing || self.paused {
            return 0;
        }
        let steps = self.driver.accumulate(elapsed_ms);
        let mut ran = 0;
        for _ in 0..steps {
            if self.screen != Screen::Playing {
                break;
            }
            self.step();
            ran += 1;
        }
        ran
    }

    /// Run exactly one fixed step, ignoring pause
    pub fn step(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if self.screen != Screen::Playing {
            return;
        }
        sim::tick(round);

        if let Some(reaction) = self.autoplay {
            if let Some(term) = autoplay::pick_target(round, reaction) {
                sim::submit(round, &term);
            }
        }

        self.collect();
    }

    /// The input field changed
    pub fn input(&mut self, text: &str) -> Option<Hit> {
        let round = self.round.as_mut()?;
        if self.screen != Screen::Playing {
            return None;
        }
        let hit = sim::submit(round, text);
        self.collect();
        hit
    }

    /// Flip the theme and persist it
    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.theme = self.settings.theme.toggled();
        if let Err(e) = self.settings.save(self.storage.as_mut()) {
            log::warn!("Could not save settings: {}", e);
        }
        self.settings.theme
    }

    pub fn set_show_translations(&mut self, show: bool) {
        self.settings.show_translations = show;
        if let Err(e) = self.settings.save(self.storage.as_mut()) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    /// Take all events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        let round = self.round.as_ref();
        Snapshot {
            screen: self.screen,
            category: self.category(),
            difficulty: self.difficulty(),
            lives: round.map_or(self.tuning.starting_lives, |r| r.lives),
            score: round.map_or(0, |r| r.score),
            combo: round.map_or(0, |r| r.combo),
            input: round.map(|r| r.input.clone()).unwrap_or_default(),
            balloons: round.map(|r| r.balloons.clone()).unwrap_or_default(),
            theme: self.settings.theme,
            show_translations: self.settings.show_translations,
            paused: self.paused,
            top_score: self.highscores.top_score(),
            last_rank: self.last_rank,
        }
    }

    fn begin_round(&mut self, category: Category, difficulty: Difficulty) {
        let seed = self.next_seed;
        self.next_seed = self
            .next_seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);

        let round = GameState::new(seed, category, difficulty, &self.words, &self.tuning);
        if round.pool.is_empty() {
            log::warn!(
                "No {} words for {}, nothing will spawn",
                difficulty.as_str(),
                category.as_str()
            );
        }
        log::info!(
            "Round started: {} / {} (seed {}, {} words)",
            category.as_str(),
            difficulty.as_str(),
            seed,
            round.pool.len()
        );

        self.round = Some(round);
        self.driver.reset();
        self.paused = false;
        self.last_rank = None;
        self.events.clear();
        self.screen = Screen::Playing;
    }

    /// Move round events out and react to game over
    fn collect(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        self.events.append(&mut round.events);
        if self.events.len() > MAX_PENDING_EVENTS {
            let excess = self.events.len() - MAX_PENDING_EVENTS;
            self.events.drain(..excess);
        }

        if self.screen == Screen::Playing && round.is_over() {
            self.screen = Screen::GameOver;
            let entry = HighScoreEntry {
                score: round.score,
                timestamp: platform::now_ms(),
                category: Some(round.category),
                difficulty: Some(round.difficulty),
            };
            self.last_rank = self.highscores.add(entry);
            if let Some(rank) = self.last_rank {
                log::info!("New high score #{}: {}", rank, round.score);
            }
            if let Err(e) = self.highscores.save(self.storage.as_mut()) {
                log::warn!("Could not save high scores: {}", e);
            }
        }
    }
}
