//! Browser host bindings
//!
//! The page owns markup and the animation-frame loop; it calls `advance`
//! with frame time, forwards input-field changes, drains events each frame,
//! and renders from the JSON snapshot. The round's timers live inside the
//! session, so nothing keeps ticking once the page drops the `WebGame`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::platform;
use crate::session::Session;
use crate::sim::Difficulty;
use crate::tuning::Tuning;
use crate::words::{self, Category, WordEntry, WordSourceError};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
    }
    log::info!("Typing Balloon starting...");
}

fn js_error(e: JsValue) -> WordSourceError {
    WordSourceError::Request(format!("{:?}", e))
}

/// Fetch the word list over HTTP
pub async fn fetch_words(url: &str) -> Result<Vec<WordEntry>, WordSourceError> {
    let window =
        web_sys::window().ok_or_else(|| WordSourceError::Request("no window".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    if !response.ok() {
        return Err(WordSourceError::Status(response.status()));
    }
    let body = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .ok_or_else(|| WordSourceError::Request("body is not text".to_string()))?;
    words::parse_words(&body)
}

/// Create a game, fetching words from `words_url` (bundled list on failure)
#[wasm_bindgen]
pub async fn create_game(words_url: Option<String>) -> WebGame {
    let words = match words_url {
        Some(url) => words::or_bundled(fetch_words(&url).await),
        None => words::bundled(),
    };
    WebGame::with_words(words)
}

/// Game instance handed to the page
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
}

impl WebGame {
    fn with_words(words: Vec<WordEntry>) -> Self {
        let seed = platform::now_ms() as u64;
        log::info!("Game initialized with seed: {}", seed);
        Self {
            session: Session::new(words, Tuning::default(), platform::default_storage(), seed),
        }
    }
}

#[wasm_bindgen]
impl WebGame {
    /// Game with the bundled word list
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        Self::with_words(words::bundled())
    }

    pub fn select_category(&mut self, name: &str) -> bool {
        match Category::from_str(name) {
            Some(category) => self.session.select_category(category),
            None => {
                log::warn!("Unknown category '{}'", name);
                false
            }
        }
    }

    pub fn select_difficulty(&mut self, name: &str) -> bool {
        match Difficulty::from_str(name) {
            Some(difficulty) => self.session.select_difficulty(difficulty),
            None => {
                log::warn!("Unknown difficulty '{}'", name);
                false
            }
        }
    }

    pub fn start(&mut self) -> bool {
        self.session.start()
    }

    pub fn restart(&mut self) -> bool {
        self.session.restart()
    }

    pub fn main_menu(&mut self) {
        self.session.main_menu();
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.session.set_paused(paused);
    }

    /// Feed frame time (ms); returns the number of steps run
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        self.session.advance(elapsed_ms.max(0.0) as u32)
    }

    /// Input field changed; returns the hit as JSON when a balloon popped
    pub fn input(&mut self, text: &str) -> Option<String> {
        let hit = self.session.input(text)?;
        serde_json::to_string(&hit).ok()
    }

    /// Flip day/night; returns the new theme name
    pub fn toggle_theme(&mut self) -> String {
        self.session.toggle_theme().as_str().to_string()
    }

    pub fn set_show_translations(&mut self, show: bool) {
        self.session.set_show_translations(show);
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_default()
    }

    pub fn drain_events_json(&mut self) -> String {
        serde_json::to_string(&self.session.drain_events()).unwrap_or_default()
    }

    pub fn highscores_json(&self) -> String {
        serde_json::to_string(self.session.highscores()).unwrap_or_default()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
