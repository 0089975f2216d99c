//! Data-driven game balance
//!
//! Everything a designer might want to tweak without touching the sim.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Difficulty;

/// Longest accepted tick period (ms)
pub const MAX_TICK_MS: u32 = 1000;

/// Balance values for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at round start
    pub starting_lives: u32,
    /// Points for any hit
    pub score_base: u64,
    /// Extra points per combo step already built
    pub combo_bonus: u64,
    /// Ticker period (ms)
    pub tick_ms: u32,
    /// Spawner period per difficulty (ms)
    pub spawn_ms_easy: u32,
    pub spawn_ms_normal: u32,
    pub spawn_ms_hard: u32,
    /// Height lost per tick
    pub fall_step: f32,
    /// Horizontal spawn band
    pub spawn_x_min: f32,
    pub spawn_x_max: f32,
    /// Starting height of a new balloon
    pub spawn_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            score_base: 10,
            combo_bonus: 2,
            tick_ms: TICK_MS,
            spawn_ms_easy: 5000,
            spawn_ms_normal: 3000,
            spawn_ms_hard: 1200,
            fall_step: 1.0,
            spawn_x_min: SPAWN_X_MIN,
            spawn_x_max: SPAWN_X_MAX,
            spawn_height: PLAY_AREA_TOP,
        }
    }
}

impl Tuning {
    /// Spawner period for a difficulty tier
    pub fn spawn_ms(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.spawn_ms_easy,
            Difficulty::Normal => self.spawn_ms_normal,
            Difficulty::Hard => self.spawn_ms_hard,
        }
    }

    /// Points for a hit made with `combo` hits already chained
    pub fn hit_points(&self, combo: u32) -> u64 {
        self.score_base + combo as u64 * self.combo_bonus
    }

    /// Parse from JSON, missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Bring every value into a range the sim can run with
    ///
    /// Non-finite floats fall back to defaults, the spawn band is ordered
    /// and kept inside the play area, periods are at least 1 ms.
    pub fn sanitized(self) -> Self {
        let defaults = Tuning::default();
        let finite_or = |v: f32, default: f32| if v.is_finite() { v } else { default };

        let a = finite_or(self.spawn_x_min, defaults.spawn_x_min).clamp(0.0, 100.0);
        let b = finite_or(self.spawn_x_max, defaults.spawn_x_max).clamp(0.0, 100.0);
        let spawn_height = finite_or(self.spawn_height, defaults.spawn_height)
            .clamp(PLAY_AREA_GROUND, PLAY_AREA_TOP);

        let sanitized = Self {
            starting_lives: self.starting_lives.max(1),
            tick_ms: self.tick_ms.clamp(1, MAX_TICK_MS),
            spawn_ms_easy: self.spawn_ms_easy.max(1),
            spawn_ms_normal: self.spawn_ms_normal.max(1),
            spawn_ms_hard: self.spawn_ms_hard.max(1),
            fall_step: finite_or(self.fall_step, defaults.fall_step).max(0.0),
            spawn_x_min: a.min(b),
            spawn_x_max: a.max(b),
            spawn_height,
            ..self
        };
        if sanitized != self {
            log::warn!("Tuning adjusted to playable values: {:?}", sanitized);
        }
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_points() {
        let tuning = Tuning::default();
        assert_eq!(tuning.hit_points(0), 10);
        assert_eq!(tuning.hit_points(3), 16);
    }

    #[test]
    fn test_spawn_cadence_by_difficulty() {
        let tuning = Tuning::default();
        assert_eq!(tuning.spawn_ms(Difficulty::Easy), 5000);
        assert_eq!(tuning.spawn_ms(Difficulty::Normal), 3000);
        assert_eq!(tuning.spawn_ms(Difficulty::Hard), 1200);
    }

    #[test]
    fn test_partial_json() {
        let tuning = Tuning::from_json(r#"{"combo_bonus": 5}"#).unwrap();
        assert_eq!(tuning.combo_bonus, 5);
        assert_eq!(tuning.score_base, 10);
        assert_eq!(tuning.starting_lives, 3);
    }

    #[test]
    fn test_defaults_untouched_by_sanitize() {
        assert_eq!(Tuning::default().sanitized(), Tuning::default());
    }

    #[test]
    fn test_inverted_spawn_band_is_ordered() {
        let tuning = Tuning::from_json(r#"{"spawn_x_min": 90.0, "spawn_x_max": 10.0}"#).unwrap();
        assert_eq!(tuning.spawn_x_min, 10.0);
        assert_eq!(tuning.spawn_x_max, 90.0);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let tuning = Tuning::from_json(
            r#"{"tick_ms": 4294967295, "fall_step": -2.0, "spawn_ms_hard": 0,
                "starting_lives": 0, "spawn_x_min": -50.0, "spawn_height": 500.0}"#,
        )
        .unwrap();
        assert_eq!(tuning.tick_ms, MAX_TICK_MS);
        assert_eq!(tuning.fall_step, 0.0);
        assert_eq!(tuning.spawn_ms_hard, 1);
        assert_eq!(tuning.starting_lives, 1);
        assert_eq!(tuning.spawn_x_min, 0.0);
        assert_eq!(tuning.spawn_height, PLAY_AREA_TOP);
    }

    #[test]
    fn test_non_finite_floats_use_defaults() {
        let tuning = Tuning {
            fall_step: f32::NAN,
            spawn_x_max: f32::INFINITY,
            ..Tuning::default()
        }
        .sanitized();
        assert_eq!(tuning.fall_step, 1.0);
        assert_eq!(tuning.spawn_x_max, SPAWN_X_MAX);
    }
}
