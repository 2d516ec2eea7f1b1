//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]; it is rebuilt from scratch
//! on every start/restart.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::effects::PowerUpLedger;
use super::particles::ParticleSystem;
use super::phase::GamePhase;
use super::score::ScoreAccumulator;
use crate::consts::*;
use crate::lane_x;
use crate::tuning::Tuning;

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Lane index (0 = left, 2 = right)
    pub lane: usize,
    /// Current horizontal centre
    pub x: f32,
    /// Lane stop the player is easing toward
    pub target_x: f32,
    /// Top of the hitbox
    pub y: f32,
    pub vel_y: f32,
    pub jumping: bool,
    pub sliding: bool,
    pub spinning: bool,
    pub invulnerable: bool,
    /// Remaining slide time (ms)
    pub slide_ms: f32,
    /// Remaining spin time (ms)
    pub spin_ms: f32,
    /// Spin rotation in degrees, [0, 360)
    pub spin_angle: f32,
    /// Remaining invulnerability (ms)
    pub invulnerable_ms: f32,
}

impl Default for Player {
    fn default() -> Self {
        let x = lane_x(START_LANE);
        Self {
            lane: START_LANE,
            x,
            target_x: x,
            y: GROUND_Y,
            vel_y: 0.0,
            jumping: false,
            sliding: false,
            spinning: false,
            invulnerable: false,
            slide_ms: 0.0,
            spin_ms: 0.0,
            spin_angle: 0.0,
            invulnerable_ms: 0.0,
        }
    }
}

impl Player {
    /// Hitbox, horizontally centred on `x`
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(
            Vec2::new(self.x - PLAYER_WIDTH / 2.0, self.y),
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        )
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y + PLAYER_HEIGHT / 2.0)
    }
}

/// Fixed obstacle templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Squat block
    Crate,
    /// Wide, low, breakable
    Barrier,
    /// Tall and solid
    Pillar,
    /// Breakable and drifts sideways
    Drone,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Crate,
        ObstacleKind::Barrier,
        ObstacleKind::Pillar,
        ObstacleKind::Drone,
    ];

    pub fn size(self) -> Vec2 {
        match self {
            ObstacleKind::Crate => Vec2::new(40.0, 40.0),
            ObstacleKind::Barrier => Vec2::new(60.0, 30.0),
            ObstacleKind::Pillar => Vec2::new(35.0, 80.0),
            ObstacleKind::Drone => Vec2::new(50.0, 25.0),
        }
    }

    pub fn destructible(self) -> bool {
        matches!(self, ObstacleKind::Barrier | ObstacleKind::Drone)
    }

    pub fn moving(self) -> bool {
        self == ObstacleKind::Drone
    }

    /// RGB colour for rendering and debris
    pub fn color(self) -> u32 {
        match self {
            ObstacleKind::Crate => 0x8B0000,
            ObstacleKind::Barrier => 0x4B0082,
            ObstacleKind::Pillar => 0x006400,
            ObstacleKind::Drone => 0xFF4500,
        }
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub destructible: bool,
    pub moving: bool,
    /// Lateral drift direction (+1 right, -1 left); unused unless `moving`
    pub direction: f32,
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// Collectible rarity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Basic,
    Silver,
    Gold,
    Diamond,
    Legendary,
}

impl Rarity {
    /// Tiers with their draw weights, in table order (weights sum to 1.0)
    pub const TABLE: [(Rarity, f32); 5] = [
        (Rarity::Basic, 0.50),
        (Rarity::Silver, 0.25),
        (Rarity::Gold, 0.15),
        (Rarity::Diamond, 0.08),
        (Rarity::Legendary, 0.02),
    ];

    /// Pick the first tier whose cumulative weight reaches `roll` (in [0, 1))
    pub fn from_roll(roll: f32) -> Rarity {
        let mut cumulative = 0.0;
        for (rarity, weight) in Self::TABLE {
            cumulative += weight;
            if roll <= cumulative {
                return rarity;
            }
        }
        Rarity::Basic
    }

    pub fn value(self) -> u64 {
        match self {
            Rarity::Basic => 10,
            Rarity::Silver => 25,
            Rarity::Gold => 50,
            Rarity::Diamond => 100,
            Rarity::Legendary => 250,
        }
    }

    pub fn color(self) -> u32 {
        match self {
            Rarity::Basic => 0x8B4513,
            Rarity::Silver => 0xC0C0C0,
            Rarity::Gold => 0xFFD700,
            Rarity::Diamond => 0xB9F2FF,
            Rarity::Legendary => 0xFF69B4,
        }
    }

    /// Glow colour, also used for the collect burst
    pub fn glow(self) -> u32 {
        match self {
            Rarity::Basic => 0xD2691E,
            Rarity::Silver => 0xE6E6FA,
            Rarity::Gold => 0xFFFF00,
            Rarity::Diamond => 0x00FFFF,
            Rarity::Legendary => 0xFF1493,
        }
    }
}

/// A coin worth points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub rarity: Rarity,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Degrees
    pub rotation: f32,
}

impl Collectible {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, Vec2::splat(self.size))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Power-up effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    SpeedBoost,
    CoinMagnet,
    ScoreMultiplier,
    Invincibility,
    DoubleJump,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::CoinMagnet,
        PowerUpKind::ScoreMultiplier,
        PowerUpKind::Invincibility,
        PowerUpKind::DoubleJump,
    ];

    pub fn color(self) -> u32 {
        match self {
            PowerUpKind::SpeedBoost => 0xFF4500,
            PowerUpKind::CoinMagnet => 0x32CD32,
            PowerUpKind::ScoreMultiplier => 0x9370DB,
            PowerUpKind::Invincibility => 0xFFD700,
            PowerUpKind::DoubleJump => 0x00CED1,
        }
    }
}

/// A power-up waiting to be picked up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Degrees
    pub rotation: f32,
}

impl Pickup {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, Vec2::splat(self.size))
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance parameters, fixed for the run
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    pub lives: u8,
    /// Score, distance and speed
    pub score: ScoreAccumulator,
    /// Simulation tick counter
    pub frame: u64,
    pub player: Player,
    /// Live obstacles (creation order)
    pub obstacles: Vec<Obstacle>,
    /// Live collectibles (creation order)
    pub collectibles: Vec<Collectible>,
    /// Live power-up pickups (creation order)
    pub pickups: Vec<Pickup>,
    /// Active power-up effects
    pub effects: PowerUpLedger,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh state sitting in the menu
    ///
    /// The particle stream is seeded from `rng` so cosmetic draws never shift
    /// the gameplay sequence.
    pub fn new<R: Rng + ?Sized>(tuning: Tuning, rng: &mut R) -> Self {
        let fx_rng = Pcg32::new(rng.random(), rng.random());
        Self {
            phase: GamePhase::Menu,
            lives: tuning.starting_lives,
            score: ScoreAccumulator::new(tuning.base_speed, tuning.max_speed),
            frame: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            pickups: Vec::new(),
            effects: PowerUpLedger::default(),
            particles: ParticleSystem::new(fx_rng, tuning.max_particles),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Total live gameplay entities (particles excluded)
    pub fn entity_count(&self) -> usize {
        self.obstacles.len() + self.collectibles.len() + self.pickups.len()
    }
}
