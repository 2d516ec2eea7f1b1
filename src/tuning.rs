//! Data-driven game balance
//!
//! Every knob the simulation reads lives here so a run can be re-balanced from
//! JSON without touching code. Geometry that the renderer also depends on stays
//! in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_LIVES;
use crate::sim::PowerUpKind;

/// Errors from loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a probability in [0, 1], got {value}")]
    Probability { field: &'static str, value: f32 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("jump_impulse must point up (negative), got {0}")]
    JumpImpulse(f32),
    #[error("starting_lives must be in 1..={max}, got {value}")]
    Lives { value: u8, max: u8 },
    #[error("max_speed ({max}) is below base_speed ({base})")]
    SpeedRange { base: f32, max: f32 },
}

/// Full duration of each power-up effect in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectDurations {
    pub speed_boost: f32,
    pub coin_magnet: f32,
    pub score_multiplier: f32,
    pub invincibility: f32,
    pub double_jump: f32,
}

impl Default for EffectDurations {
    fn default() -> Self {
        Self {
            speed_boost: 5000.0,
            coin_magnet: 8000.0,
            score_multiplier: 10000.0,
            invincibility: 6000.0,
            double_jump: 15000.0,
        }
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player motion (per tick) ===
    /// Fraction of the remaining lane distance covered each tick
    pub lane_ease: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_impulse: f32,
    /// Second jump strength relative to the first
    pub double_jump_factor: f32,
    /// Second jump only while vel_y is above this (still near the apex)
    pub double_jump_window: f32,
    /// Spin rotation per tick in degrees
    pub spin_step_deg: f32,

    // === Timers (ms) ===
    pub slide_ms: f32,
    pub spin_ms: f32,
    pub invulnerability_ms: f32,
    pub effects: EffectDurations,

    // === Run ===
    pub starting_lives: u8,
    pub base_speed: f32,
    /// Speed gained per completed distance interval
    pub speed_step: f32,
    pub speed_interval: f32,
    pub max_speed: f32,

    // === Spawning (per tick probabilities) ===
    pub obstacle_base_chance: f32,
    /// Speed is divided by this and added to the obstacle chance
    pub obstacle_speed_divisor: f32,
    pub obstacle_chance_cap: f32,
    pub collectible_chance: f32,
    pub power_up_chance: f32,

    // === Collision ===
    /// Obstacle scroll multiplier while speed boost is active
    pub boost_scroll_factor: f32,
    /// Lateral drift of moving obstacles per tick
    pub drift_speed: f32,
    pub spin_bonus: u64,
    pub magnet_radius: f32,
    /// Fraction of the separation a magnetised collectible closes per tick
    pub magnet_pull: f32,

    // === Particles ===
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_ease: 0.15,
            gravity: 0.8,
            jump_impulse: -15.0,
            double_jump_factor: 0.8,
            double_jump_window: -5.0,
            spin_step_deg: 20.0,

            slide_ms: 600.0,
            spin_ms: 500.0,
            invulnerability_ms: 2000.0,
            effects: EffectDurations::default(),

            starting_lives: MAX_LIVES,
            base_speed: 4.0,
            speed_step: 0.5,
            speed_interval: 1000.0,
            max_speed: 12.0,

            obstacle_base_chance: 0.02,
            obstacle_speed_divisor: 200.0,
            obstacle_chance_cap: 0.1,
            collectible_chance: 0.05,
            power_up_chance: 0.008,

            boost_scroll_factor: 1.5,
            drift_speed: 2.0,
            spin_bonus: 25,
            magnet_radius: 100.0,
            magnet_pull: 0.1,

            max_particles: 512,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let probabilities = [
            ("lane_ease", self.lane_ease),
            ("double_jump_factor", self.double_jump_factor),
            ("obstacle_base_chance", self.obstacle_base_chance),
            ("obstacle_chance_cap", self.obstacle_chance_cap),
            ("collectible_chance", self.collectible_chance),
            ("power_up_chance", self.power_up_chance),
            ("magnet_pull", self.magnet_pull),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Probability { field, value });
            }
        }

        let positives = [
            ("slide_ms", self.slide_ms),
            ("spin_ms", self.spin_ms),
            ("invulnerability_ms", self.invulnerability_ms),
            ("speed_interval", self.speed_interval),
            ("base_speed", self.base_speed),
            ("obstacle_speed_divisor", self.obstacle_speed_divisor),
            ("gravity", self.gravity),
            ("spin_step_deg", self.spin_step_deg),
            ("boost_scroll_factor", self.boost_scroll_factor),
            ("magnet_radius", self.magnet_radius),
            ("effects.speed_boost", self.effects.speed_boost),
            ("effects.coin_magnet", self.effects.coin_magnet),
            ("effects.score_multiplier", self.effects.score_multiplier),
            ("effects.invincibility", self.effects.invincibility),
            ("effects.double_jump", self.effects.double_jump),
        ];
        for (field, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        let non_negatives = [
            ("speed_step", self.speed_step),
            ("drift_speed", self.drift_speed),
        ];
        for (field, value) in non_negatives {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }

        if !self.jump_impulse.is_finite() || self.jump_impulse >= 0.0 {
            return Err(TuningError::JumpImpulse(self.jump_impulse));
        }

        if self.starting_lives == 0 || self.starting_lives > MAX_LIVES {
            return Err(TuningError::Lives {
                value: self.starting_lives,
                max: MAX_LIVES,
            });
        }

        if !self.max_speed.is_finite() || self.max_speed < self.base_speed {
            return Err(TuningError::SpeedRange {
                base: self.base_speed,
                max: self.max_speed,
            });
        }

        Ok(())
    }

    /// Full duration of an effect when picked up
    pub fn effect_duration(&self, kind: PowerUpKind) -> f32 {
        match kind {
            PowerUpKind::SpeedBoost => self.effects.speed_boost,
            PowerUpKind::CoinMagnet => self.effects.coin_magnet,
            PowerUpKind::ScoreMultiplier => self.effects.score_multiplier,
            PowerUpKind::Invincibility => self.effects.invincibility,
            PowerUpKind::DoubleJump => self.effects.double_jump,
        }
    }

    /// Per-tick obstacle spawn chance at the given speed
    pub fn obstacle_chance(&self, speed: f32) -> f32 {
        (self.obstacle_base_chance + speed / self.obstacle_speed_divisor)
            .min(self.obstacle_chance_cap)
    }
}
