//! Spawner
//!
//! Picks a word from the round's pool and drops a new balloon at the top of
//! the play area.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Balloon, Difficulty, GameEvent, GamePhase, GameState};
use crate::words::{Category, WordEntry};

/// Words that may spawn for a category and difficulty
pub fn eligible_pool(
    words: &[WordEntry],
    category: Category,
    difficulty: Difficulty,
) -> Vec<WordEntry> {
    words
        .iter()
        .filter(|w| w.in_category(category) && difficulty.admits(w))
        .cloned()
        .collect()
}

/// Spawn one balloon, returning its id
///
/// No-op when the round is over or the pool is empty.
pub fn spawn_balloon(state: &mut GameState) -> Option<u32> {
    if state.phase != GamePhase::Playing {
        return None;
    }

    let word = state.pool.choose(&mut state.rng)?.clone();
    let x = state
        .rng
        .random_range(state.tuning.spawn_x_min..=state.tuning.spawn_x_max);

    let id = state.next_entity_id();
    log::debug!("Spawned balloon {} '{}' at x={:.1}", id, word.term, x);
    state.events.push(GameEvent::Spawned {
        id,
        term: word.term.clone(),
    });
    state.balloons.push(Balloon {
        id,
        term: word.term,
        translation: word.translation,
        pos: Vec2::new(x, state.tuning.spawn_height),
    });
    Some(id)
}
