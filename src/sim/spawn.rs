//! Procedural spawning
//!
//! Three independent draws per tick, always in the same order (obstacle,
//! collectible, power-up) so a seed reproduces the same stream.

use glam::Vec2;
use rand::Rng;

use super::state::{
    Collectible, GameState, Obstacle, ObstacleKind, Pickup, PowerUpKind, Rarity,
};
use crate::consts::{COLLECTIBLE_SIZE, LANES, PICKUP_SIZE};
use crate::lane_x;

/// Run the per-tick spawn draws against the current speed
pub fn spawn_tick<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let speed = state.score.speed();

    if rng.random::<f32>() < state.tuning.obstacle_chance(speed) {
        spawn_obstacle(state, rng);
    }

    if rng.random::<f32>() < state.tuning.collectible_chance {
        spawn_collectible(state, rng);
    }

    if rng.random::<f32>() < state.tuning.power_up_chance {
        spawn_pickup(state, rng);
    }
}

fn random_lane<R: Rng + ?Sized>(rng: &mut R) -> usize {
    rng.random_range(0..LANES.len())
}

/// Top-left corner that centres an entity of `size` on `lane`, just above the
/// top boundary
fn entry_pos(lane: usize, size: Vec2) -> Vec2 {
    Vec2::new(lane_x(lane) - size.x / 2.0, -size.y)
}

pub fn spawn_obstacle<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
    let lane = random_lane(rng);
    let direction = if kind.moving() && rng.random_bool(0.5) {
        -1.0
    } else {
        1.0
    };
    let size = kind.size();

    let obstacle = Obstacle {
        id: state.next_entity_id(),
        kind,
        pos: entry_pos(lane, size),
        size,
        destructible: kind.destructible(),
        moving: kind.moving(),
        direction,
    };
    log::trace!("Spawn obstacle {:?} in lane {}", kind, lane);
    state.obstacles.push(obstacle);
}

pub fn spawn_collectible<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let lane = random_lane(rng);
    let rarity = Rarity::from_roll(rng.random::<f32>());

    let collectible = Collectible {
        id: state.next_entity_id(),
        rarity,
        pos: entry_pos(lane, Vec2::splat(COLLECTIBLE_SIZE)),
        size: COLLECTIBLE_SIZE,
        rotation: 0.0,
    };
    log::trace!("Spawn {:?} coin in lane {}", rarity, lane);
    state.collectibles.push(collectible);
}

pub fn spawn_pickup<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let lane = random_lane(rng);
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];

    let pickup = Pickup {
        id: state.next_entity_id(),
        kind,
        pos: entry_pos(lane, Vec2::splat(PICKUP_SIZE)),
        size: PICKUP_SIZE,
        rotation: 0.0,
    };
    log::trace!("Spawn {:?} power-up in lane {}", kind, lane);
    state.pickups.push(pickup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn fresh(seed: u64) -> (GameState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(Tuning::default(), &mut rng);
        (state, rng)
    }

    #[test]
    fn test_spawned_entities_enter_above_view_on_a_lane() {
        let (mut state, mut rng) = fresh(3);
        for _ in 0..50 {
            spawn_obstacle(&mut state, &mut rng);
            spawn_collectible(&mut state, &mut rng);
            spawn_pickup(&mut state, &mut rng);
        }

        for o in &state.obstacles {
            assert!(o.pos.y + o.size.y <= 0.0);
            let centre = o.pos.x + o.size.x / 2.0;
            assert!(LANES.contains(&centre));
            assert_eq!(o.destructible, o.kind.destructible());
            assert!(o.direction == 1.0 || o.direction == -1.0);
        }
        for c in &state.collectibles {
            assert!(c.pos.y + c.size <= 0.0);
            assert!(LANES.contains(&c.center().x));
        }
        for p in &state.pickups {
            assert!(p.pos.y + p.size <= 0.0);
        }
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let (mut state, mut rng) = fresh(5);
        spawn_obstacle(&mut state, &mut rng);
        spawn_obstacle(&mut state, &mut rng);
        spawn_collectible(&mut state, &mut rng);
        assert!(state.obstacles[0].id < state.obstacles[1].id);
        assert!(state.obstacles[1].id < state.collectibles[0].id);
    }

    #[test]
    fn test_certain_and_impossible_draws() {
        let (mut state, mut rng) = fresh(9);
        state.tuning.obstacle_base_chance = 0.0;
        state.tuning.obstacle_speed_divisor = f32::INFINITY;
        state.tuning.collectible_chance = 1.0;
        state.tuning.power_up_chance = 0.0;

        for _ in 0..20 {
            spawn_tick(&mut state, &mut rng);
        }
        assert!(state.obstacles.is_empty());
        assert!(state.pickups.is_empty());
        assert_eq!(state.collectibles.len(), 20);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let (mut a, mut rng_a) = fresh(42);
        let (mut b, mut rng_b) = fresh(42);
        for _ in 0..500 {
            spawn_tick(&mut a, &mut rng_a);
            spawn_tick(&mut b, &mut rng_b);
        }
        assert_eq!(a.entity_count(), b.entity_count());
        let kinds_a: Vec<_> = a.obstacles.iter().map(|o| (o.kind, o.pos)).collect();
        let kinds_b: Vec<_> = b.obstacles.iter().map(|o| (o.kind, o.pos)).collect();
        assert_eq!(kinds_a, kinds_b);
    }
}
