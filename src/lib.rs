//! Lane Runner - A three-lane endless runner simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, run state)
//! - `engine`: Public engine API (commands, intents, events)
//! - `snapshot`: Read-only render view of the world
//! - `tuning`: Data-driven game balance

pub mod engine;
pub mod input;
pub mod sim;
pub mod snapshot;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use engine::Engine;
pub use input::{Intent, TickInput};
pub use snapshot::RenderSnapshot;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal frame length (60 Hz) used by the headless driver
    pub const FRAME_MS: f32 = 16.0;

    /// Horizontal centre of each lane (left, centre, right)
    pub const LANES: [f32; 3] = [120.0, 200.0, 280.0];
    /// Lane the player starts in
    pub const START_LANE: usize = 1;

    /// Playfield horizontal bounds (outer lane lines)
    pub const PLAYFIELD_LEFT: f32 = 80.0;
    pub const PLAYFIELD_RIGHT: f32 = 320.0;

    /// Player hitbox top while running
    pub const GROUND_Y: f32 = 300.0;
    /// Player hitbox top while sliding
    pub const SLIDE_Y: f32 = 320.0;

    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;

    /// Entities at or past this y have scrolled off the bottom
    pub const DESPAWN_Y: f32 = 650.0;

    pub const COLLECTIBLE_SIZE: f32 = 30.0;
    pub const PICKUP_SIZE: f32 = 40.0;

    /// Maximum lives (and the default starting count)
    pub const MAX_LIVES: u8 = 3;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negatives
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Lane stop for a lane index (clamped to the outer lanes)
#[inline]
pub fn lane_x(lane: usize) -> f32 {
    consts::LANES[lane.min(consts::LANES.len() - 1)]
}
