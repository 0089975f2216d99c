//! High score leaderboard system
//!
//! Persisted under a single storage key, tracks top 10 scores.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Storage, StorageError};
use crate::sim::Difficulty;
use crate::words::Category;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the round
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "typing_balloon_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new entry to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Sorted descending by score; ties keep the older entry first
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Add a bare score
    pub fn add_score(&mut self, score: u64, timestamp: f64) -> Option<usize> {
        self.add(HighScoreEntry {
            score,
            timestamp,
            category: None,
            difficulty: None,
        })
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores, starting fresh if missing or unreadable
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json::<HighScores>(storage, Self::STORAGE_KEY) {
            Ok(Some(mut scores)) => {
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Discarding unreadable high scores: {}", e);
                Self::new()
            }
        }
    }

    /// Save high scores
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        persistence::save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Format a timestamp as a relative date string
pub fn format_date(timestamp: f64, now: f64) -> String {
    let diff_secs = (now - timestamp) / 1000.0;
    let diff_mins = diff_secs / 60.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        match days {
            1 => "Yesterday".to_string(),
            2..=6 => format!("{} days ago", days),
            7..=13 => "Last week".to_string(),
            _ => format!("{} weeks ago", days / 7),
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_sorted_and_capped() {
        let mut scores = HighScores::new();
        for (i, score) in [30, 10, 50, 20, 40, 60, 70, 80, 90, 100, 110, 5].iter().enumerate() {
            scores.add_score(*score, i as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        let values: Vec<_> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(values, vec![110, 100, 90, 80, 70, 60, 50, 40, 30, 20]);
        assert_eq!(scores.top_score(), Some(110));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, 0.0), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_rank() {
        let mut scores = HighScores::new();
        scores.add_score(100, 0.0);
        scores.add_score(50, 0.0);
        assert_eq!(scores.potential_rank(75), Some(2));
        assert_eq!(scores.add_score(75, 1.0), Some(2));
        // Ties rank below the existing entry
        assert_eq!(scores.add_score(100, 2.0), Some(2));
    }

    #[test]
    fn test_full_board_rejects_low_score() {
        let mut scores = HighScores::new();
        for i in 1..=10 {
            scores.add_score(i * 10, 0.0);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add_score(5, 0.0), None);
        assert_eq!(scores.add_score(15, 0.0), Some(10));
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        let mut scores = HighScores::new();
        scores.add(HighScoreEntry {
            score: 42,
            timestamp: 1000.0,
            category: Some(Category::Fruits),
            difficulty: Some(Difficulty::Hard),
        });
        scores.save(&mut storage).unwrap();
        assert_eq!(HighScores::load(&storage), scores);
    }

    #[test]
    fn test_load_corrupt_starts_fresh() {
        let mut storage = MemoryStorage::new();
        storage.set(HighScores::STORAGE_KEY, "not json").unwrap();
        assert!(HighScores::load(&storage).is_empty());
    }

    #[test]
    fn test_load_bare_entries() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                HighScores::STORAGE_KEY,
                r#"{"entries":[{"score":5,"timestamp":1.0},{"score":9,"timestamp":2.0}]}"#,
            )
            .unwrap();
        let scores = HighScores::load(&storage);
        assert_eq!(scores.top_score(), Some(9));
        assert_eq!(scores.entries[1].category, None);
    }

    #[test]
    fn test_format_date() {
        let now = 10.0 * 24.0 * 3_600_000.0;
        assert_eq!(format_date(now - 5_000.0, now), "Just now");
        assert_eq!(format_date(now - 60_000.0, now), "1 min ago");
        assert_eq!(format_date(now - 3.0 * 3_600_000.0, now), "3 hours ago");
        assert_eq!(format_date(now - 24.0 * 3_600_000.0, now), "Yesterday");
        assert_eq!(format_date(now - 8.0 * 24.0 * 3_600_000.0, now), "Last week");
    }
}
