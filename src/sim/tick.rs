//! Per-frame simulation tick
//!
//! Core game loop that advances a run by one frame in a fixed order.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::phase::GamePhase;
use super::physics::step_player;
use super::score::RunSummary;
use super::spawn::spawn_tick;
use super::state::GameState;
use crate::input::TickInput;

/// Notifications for the rendering/platform layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// Score moved this tick
    ScoreChanged { score: u64 },
    /// Emitted once, on the transition into game over
    RunEnded(RunSummary),
}

/// Validate a caller-supplied frame delta
///
/// Negative or non-finite deltas yield `None` and the frame must be skipped.
pub fn sanitize_dt(elapsed_ms: f64) -> Option<f32> {
    (elapsed_ms.is_finite() && elapsed_ms >= 0.0).then_some(elapsed_ms as f32)
}

/// Advance the run by one frame
///
/// Does nothing unless the run is playing.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: f32,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    if !state.phase.is_running() {
        return;
    }

    state.frame += 1;
    let score_before = state.score.score();

    step_player(&mut state.player, input, &state.effects, &state.tuning, dt_ms);

    spawn_tick(state, rng);

    if resolve_collisions(state) {
        end_run(state, score_before, events);
        return;
    }

    state.effects.decay(dt_ms);
    state.particles.update();
    state
        .score
        .advance(state.tuning.speed_step, state.tuning.speed_interval);

    if state.score.score() != score_before {
        events.push(GameEvent::ScoreChanged {
            score: state.score.score(),
        });
    }
}

fn end_run(state: &mut GameState, score_before: u64, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;

    if state.score.score() != score_before {
        events.push(GameEvent::ScoreChanged {
            score: state.score.score(),
        });
    }

    let summary = state.score.summary();
    log::info!(
        "Run over: score {}, distance {}, max speed {}",
        summary.score,
        summary.distance,
        summary.max_speed
    );
    events.push(GameEvent::RunEnded(summary));
}
