//! Matcher
//!
//! Runs on every change of the input field. A typed word that equals a
//! balloon's term (trimmed, case-insensitive) pops that balloon.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};
use crate::normalize_term;

/// A resolved hit, handed back to the host for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub id: u32,
    pub term: String,
    pub translation: String,
    pub points: u64,
    /// Combo after this hit
    pub combo: u32,
}

/// Replace the input buffer with `text` and resolve a hit if it matches
pub fn submit(state: &mut GameState, text: &str) -> Option<Hit> {
    state.input.clear();
    state.input.push_str(text);

    if state.phase != GamePhase::Playing {
        return None;
    }

    let typed = normalize_term(text);
    if typed.is_empty() {
        return None;
    }

    // Balloons are kept in id order, so the first match is the oldest
    let index = state
        .balloons
        .iter()
        .position(|b| normalize_term(&b.term) == typed)?;
    let balloon = state.balloons.remove(index);

    let points = state.tuning.hit_points(state.combo);
    state.score += points;
    state.combo += 1;
    state.input.clear();

    log::debug!(
        "Popped '{}' (+{}, combo {}, score {})",
        balloon.term,
        points,
        state.combo,
        state.score
    );

    let hit = Hit {
        id: balloon.id,
        term: balloon.term,
        translation: balloon.translation,
        points,
        combo: state.combo,
    };
    state.events.push(GameEvent::Popped {
        id: hit.id,
        term: hit.term.clone(),
        translation: hit.translation.clone(),
        points,
        combo: hit.combo,
    });
    Some(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::spawn_balloon;
    use crate::sim::state::Difficulty;
    use crate::tuning::Tuning;
    use crate::words::{Category, WordEntry};
    use proptest::prelude::*;

    fn state_with(words: &[(&str, &str)], spawns: usize) -> GameState {
        let words: Vec<_> = words
            .iter()
            .map(|(t, tr)| WordEntry::new(*t, *tr))
            .collect();
        let mut state = GameState::new(
            3,
            Category::Animals,
            Difficulty::Hard,
            &words,
            &Tuning::default(),
        );
        for _ in 0..spawns {
            spawn_balloon(&mut state);
        }
        state
    }

    #[test]
    fn test_hit_cat() {
        let mut state = state_with(&[("cat", "แมว")], 1);
        let hit = submit(&mut state, "cat").expect("should pop");
        assert_eq!(hit.translation, "แมว");
        assert_eq!(state.score, 10);
        assert_eq!(state.combo, 1);
        assert!(state.balloons.is_empty());
        assert!(state.input.is_empty());
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::Popped { translation, .. }) if translation == "แมว"
        ));
    }

    #[test]
    fn test_trimmed_case_insensitive() {
        let mut state = state_with(&[("cat", "แมว")], 1);
        assert!(submit(&mut state, " Cat ").is_some());

        let mut state = state_with(&[("Cat", "แมว")], 1);
        assert!(submit(&mut state, "CAT").is_some());
    }

    #[test]
    fn test_partial_input_only_updates_buffer() {
        let mut state = state_with(&[("cat", "แมว")], 1);
        assert_eq!(submit(&mut state, "ca"), None);
        assert_eq!(state.input, "ca");
        assert_eq!(state.balloons.len(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn test_blank_input_is_noop() {
        let mut state = state_with(&[("cat", "แมว")], 1);
        assert_eq!(submit(&mut state, "   "), None);
        assert_eq!(state.input, "   ");
        assert_eq!(state.balloons.len(), 1);
    }

    #[test]
    fn test_duplicate_terms_pop_oldest() {
        let mut state = state_with(&[("cat", "แมว")], 3);
        let hit = submit(&mut state, "cat").unwrap();
        assert_eq!(hit.id, 0);
        let remaining: Vec<_> = state.balloons.iter().map(|b| b.id).collect();
        assert_eq!(remaining, vec![1, 2]);
    }

    #[test]
    fn test_combo_bonus() {
        let mut state = state_with(&[("cat", "แมว")], 5);
        let points: Vec<_> = (0..5)
            .map(|_| submit(&mut state, "cat").unwrap().points)
            .collect();
        assert_eq!(points, vec![10, 12, 14, 16, 18]);
        assert_eq!(state.score, 70);
        assert_eq!(state.combo, 5);
    }

    #[test]
    fn test_game_over_ignores_input() {
        let mut state = state_with(&[("cat", "แมว")], 1);
        state.phase = GamePhase::GameOver;
        assert_eq!(submit(&mut state, "cat"), None);
        assert_eq!(state.balloons.len(), 1);
        assert_eq!(state.input, "cat");
    }

    proptest! {
        #[test]
        fn prop_score_formula(prior_combo in 0u32..50, prior_score in 0u64..10_000) {
            let mut state = state_with(&[("cat", "แมว")], 1);
            state.combo = prior_combo;
            state.score = prior_score;
            submit(&mut state, "cat").unwrap();
            prop_assert_eq!(state.score, prior_score + 10 + prior_combo as u64 * 2);
            prop_assert_eq!(state.combo, prior_combo + 1);
        }
    }
}
