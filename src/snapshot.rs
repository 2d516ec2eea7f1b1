//! Read-only render view of the world
//!
//! Built fresh each frame from the engine state. The renderer only ever sees
//! this borrowed view, so it cannot mutate the simulation.

use serde::Serialize;

use crate::sim::{
    Collectible, GamePhase, GameState, Obstacle, Particle, Pickup, Player, PowerUpKind,
};

/// Ticks per flicker half-cycle while invulnerable (~100 ms at 60 Hz)
pub const FLICKER_TICKS: u64 = 6;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot<'a> {
    pub phase: GamePhase,
    pub frame: u64,
    pub score: u64,
    pub lives: u8,
    pub distance: f32,
    pub speed: f32,
    pub player: &'a Player,
    /// Whether to draw the player this frame (blinks while invulnerable)
    pub player_visible: bool,
    pub obstacles: &'a [Obstacle],
    pub collectibles: &'a [Collectible],
    pub pickups: &'a [Pickup],
    pub particles: &'a [Particle],
    /// Active effects with remaining ms, in stable order
    pub effects: Vec<(PowerUpKind, f32)>,
}

impl<'a> RenderSnapshot<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        let player_visible =
            !state.player.invulnerable || (state.frame / FLICKER_TICKS) % 2 == 0;

        Self {
            phase: state.phase,
            frame: state.frame,
            score: state.score.score(),
            lives: state.lives,
            distance: state.score.distance(),
            speed: state.score.speed(),
            player: &state.player,
            player_visible,
            obstacles: &state.obstacles,
            collectibles: &state.collectibles,
            pickups: &state.pickups,
            particles: state.particles.as_slice(),
            effects: state.effects.iter().collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
