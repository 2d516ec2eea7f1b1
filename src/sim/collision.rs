//! Collision detection and response
//!
//! Every entity scrolls, then is tested against the player hitbox. Categories
//! are resolved obstacles first, then collectibles, then power-ups, each in
//! creation order.

use glam::Vec2;

use super::particles::{BURST_IMPACT, BURST_REWARD, COLOR_DAMAGE, COLOR_GOLD};
use super::state::{GameState, PowerUpKind};
use crate::consts::{DESPAWN_Y, PLAYFIELD_LEFT, PLAYFIELD_RIGHT};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap; boxes that only touch along an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// How an obstacle overlap was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleHit {
    /// Spin attack broke a destructible obstacle
    Smashed,
    /// Invincibility brushed it aside
    Deflected,
    /// Player lost a life
    Damaged,
    /// Player is invulnerable; obstacle stays
    Ignored,
}

/// Decide the outcome of an obstacle overlap, highest priority first
pub fn classify_obstacle_hit(
    spinning: bool,
    destructible: bool,
    invincible: bool,
    invulnerable: bool,
) -> ObstacleHit {
    if spinning && destructible {
        ObstacleHit::Smashed
    } else if invincible {
        ObstacleHit::Deflected
    } else if invulnerable {
        ObstacleHit::Ignored
    } else {
        ObstacleHit::Damaged
    }
}

/// Move `pos` a `pull` fraction of the way toward `target` if within `radius`
pub fn magnet_pull(pos: Vec2, target: Vec2, radius: f32, pull: f32) -> Option<Vec2> {
    let separation = target - pos;
    if separation.length() < radius {
        Some(separation * pull)
    } else {
        None
    }
}

/// Scroll and resolve every entity category for this tick
///
/// Returns `true` when the player lost their last life. Resolution stops at
/// that point; entities after the fatal obstacle are left untouched.
pub fn resolve_collisions(state: &mut GameState) -> bool {
    if resolve_obstacles(state) {
        return true;
    }
    resolve_collectibles(state);
    resolve_pickups(state);
    false
}

fn resolve_obstacles(state: &mut GameState) -> bool {
    let tuning = &state.tuning;
    let boost = if state.effects.is_active(PowerUpKind::SpeedBoost) {
        tuning.boost_scroll_factor
    } else {
        1.0
    };
    let scroll = state.score.speed() * boost;
    let drift = tuning.drift_speed;
    let invincible = state.effects.is_active(PowerUpKind::Invincibility);

    let mut iter = std::mem::take(&mut state.obstacles).into_iter();
    let mut kept = Vec::with_capacity(iter.len());
    let mut run_over = false;

    for mut obstacle in iter.by_ref() {
        obstacle.pos.y += scroll;
        if obstacle.moving {
            obstacle.pos.x += drift * obstacle.direction;
            if obstacle.pos.x <= PLAYFIELD_LEFT {
                obstacle.pos.x = PLAYFIELD_LEFT;
                obstacle.direction = 1.0;
            } else if obstacle.pos.x + obstacle.size.x >= PLAYFIELD_RIGHT {
                obstacle.pos.x = PLAYFIELD_RIGHT - obstacle.size.x;
                obstacle.direction = -1.0;
            }
        }

        if obstacle.aabb().overlaps(&state.player.aabb()) {
            let hit = classify_obstacle_hit(
                state.player.spinning,
                obstacle.destructible,
                invincible,
                state.player.invulnerable,
            );
            match hit {
                ObstacleHit::Smashed => {
                    state.score.add(state.tuning.spin_bonus);
                    state
                        .particles
                        .burst(obstacle.pos, obstacle.kind.color(), BURST_IMPACT);
                    continue;
                }
                ObstacleHit::Deflected => {
                    state.particles.burst(obstacle.pos, COLOR_GOLD, BURST_IMPACT);
                    continue;
                }
                ObstacleHit::Damaged => {
                    state.lives = state.lives.saturating_sub(1);
                    state.player.invulnerable = true;
                    state.player.invulnerable_ms = state.tuning.invulnerability_ms;
                    state
                        .particles
                        .burst(state.player.center(), COLOR_DAMAGE, BURST_IMPACT);
                    log::debug!(
                        "Hit by {:?}, {} lives left",
                        obstacle.kind,
                        state.lives
                    );
                    if state.lives == 0 {
                        run_over = true;
                        break;
                    }
                    continue;
                }
                ObstacleHit::Ignored => {}
            }
        }

        if obstacle.pos.y < DESPAWN_Y {
            kept.push(obstacle);
        }
    }

    // Obstacles not reached this tick stay as they were
    kept.extend(iter);
    state.obstacles = kept;
    run_over
}

fn resolve_collectibles(state: &mut GameState) {
    let speed = state.score.speed();
    let magnet = state.effects.is_active(PowerUpKind::CoinMagnet);
    let multiplier = if state.effects.is_active(PowerUpKind::ScoreMultiplier) {
        2
    } else {
        1
    };
    let player_box = state.player.aabb();
    let player_center = state.player.center();
    let (radius, pull) = (state.tuning.magnet_radius, state.tuning.magnet_pull);

    let mut collectibles = std::mem::take(&mut state.collectibles);
    collectibles.retain_mut(|coin| {
        coin.pos.y += speed;
        coin.rotation = crate::wrap_degrees(coin.rotation + 5.0);

        if magnet {
            if let Some(delta) = magnet_pull(coin.center(), player_center, radius, pull) {
                coin.pos += delta;
            }
        }

        if coin.aabb().overlaps(&player_box) {
            state.score.add(coin.rarity.value() * multiplier);
            state
                .particles
                .burst(coin.pos, coin.rarity.glow(), BURST_REWARD);
            return false;
        }

        coin.pos.y < DESPAWN_Y
    });
    state.collectibles = collectibles;
}

fn resolve_pickups(state: &mut GameState) {
    let speed = state.score.speed();
    let player_box = state.player.aabb();

    let mut pickups = std::mem::take(&mut state.pickups);
    pickups.retain_mut(|pickup| {
        pickup.pos.y += speed;
        pickup.rotation = crate::wrap_degrees(pickup.rotation + 3.0);

        if pickup.aabb().overlaps(&player_box) {
            let duration = state.tuning.effect_duration(pickup.kind);
            state.effects.activate(pickup.kind, duration);
            state
                .particles
                .burst(pickup.pos, pickup.kind.color(), BURST_REWARD);
            log::debug!("Power-up {:?} active for {} ms", pickup.kind, duration);
            return false;
        }

        pickup.pos.y < DESPAWN_Y
    });
    state.pickups = pickups;
}
