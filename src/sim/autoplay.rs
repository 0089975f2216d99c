//! Idle/demo mode typist
//!
//! Types the term of the lowest balloon once it has fallen past a reaction
//! height. Used by the native demo and for soak testing.

use super::state::GameState;

/// Term the demo typist would type now, if any
pub fn pick_target(state: &GameState, reaction_height: f32) -> Option<String> {
    state
        .balloons
        .iter()
        .filter(|b| b.height() <= reaction_height)
        .min_by(|a, b| {
            a.height()
                .partial_cmp(&b.height())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.cmp(&b.id))
        })
        .map(|b| b.term.clone())
}
