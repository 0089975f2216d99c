//! Fixed timestep simulation tick
//!
//! One step is one `Tuning::tick_ms`: balloons fall, landed balloons cost a
//! life, and the spawn timer advances.

use super::spawn::spawn_balloon;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::PLAY_AREA_GROUND;

/// Ticker: drop landed balloons, then move the rest down
///
/// The ground check runs before the fall step, and the fall stops at the
/// ground, so a balloon is never seen below it. Each landed balloon costs
/// exactly one life; once lives hit zero the round is over and further
/// landings are free.
pub fn fall(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let (landed, falling): (Vec<_>, Vec<_>) = std::mem::take(&mut state.balloons)
        .into_iter()
        .partition(|b| b.landed());
    state.balloons = falling;

    for balloon in landed {
        if state.phase != GamePhase::Playing {
            break;
        }
        state.lives = state.lives.saturating_sub(1);
        state.combo = 0;
        log::debug!("Missed '{}', {} lives left", balloon.term, state.lives);
        state.events.push(GameEvent::Missed {
            id: balloon.id,
            term: balloon.term,
            lives_left: state.lives,
        });
        if state.lives == 0 {
            end_round(state);
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    let step = state.tuning.fall_step;
    for balloon in &mut state.balloons {
        balloon.pos.y = (balloon.pos.y - step).max(PLAY_AREA_GROUND);
    }
}

/// Advance the round by one fixed step
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    fall(state);

    let fires = state.spawn_timer.advance(state.tuning.tick_ms);
    for _ in 0..fires {
        spawn_balloon(state);
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

fn end_round(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    log::info!("Game over: score {}", state.score);
    state.events.push(GameEvent::GameOver { score: state.score });
}
