//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (leaderboard timestamps, round seeds)
//! - Default storage backend

use crate::persistence::Storage;

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// The platform's persistent storage, or memory if it can't be opened
#[cfg(target_arch = "wasm32")]
pub fn default_storage() -> Box<dyn Storage> {
    match crate::persistence::LocalStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("{}, scores will not persist", e);
            Box::new(crate::persistence::MemoryStorage::new())
        }
    }
}

/// The platform's persistent storage, or memory if it can't be opened
///
/// Native data lives in `$TYPING_BALLOON_DATA`, else `./.typing-balloon`.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_storage() -> Box<dyn Storage> {
    let dir = std::env::var_os("TYPING_BALLOON_DATA")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from(".typing-balloon"));
    match crate::persistence::FileStorage::new(&dir) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("{} ({}), scores will not persist", e, dir.display());
            Box::new(crate::persistence::MemoryStorage::new())
        }
    }
}
