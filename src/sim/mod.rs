//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick countdowns only, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod particles;
pub mod phase;
pub mod physics;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, ObstacleHit, classify_obstacle_hit, resolve_collisions};
pub use effects::PowerUpLedger;
pub use particles::{Particle, ParticleSystem};
pub use phase::{GamePhase, RunCommand};
pub use score::{RunSummary, ScoreAccumulator};
pub use state::{
    Collectible, GameState, Obstacle, ObstacleKind, Pickup, Player, PowerUpKind, Rarity,
};
pub use tick::{GameEvent, sanitize_dt, tick};
