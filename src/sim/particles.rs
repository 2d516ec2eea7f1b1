//! Cosmetic particle bursts
//!
//! Particles never affect gameplay. They draw from their own PCG stream so a
//! burst of any size leaves the spawn sequence untouched.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Particle lifetime in ticks
pub const PARTICLE_LIFE: f32 = 60.0;
/// Downward pull on particles per tick
const PARTICLE_GRAVITY: f32 = 0.2;

/// Burst size for hits and destroyed obstacles
pub const BURST_IMPACT: usize = 12;
/// Burst size for collected coins and power-ups
pub const BURST_REWARD: usize = 8;

pub const COLOR_GOLD: u32 = 0xFFD700;
pub const COLOR_DAMAGE: u32 = 0xFF0000;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// RGB
    pub color: u32,
    /// Remaining life in ticks
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    /// Opacity for fading, 1 at spawn down to 0
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
    max: usize,
}

impl ParticleSystem {
    pub fn new(rng: Pcg32, max: usize) -> Self {
        Self {
            particles: Vec::new(),
            rng,
            max,
        }
    }

    /// Spawn up to `count` particles at `pos`; anything past the cap is dropped
    pub fn burst(&mut self, pos: Vec2, color: u32, count: usize) {
        let room = self.max.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let vel = Vec2::new(
                self.rng.random_range(-5.0..5.0),
                self.rng.random_range(-10.0..-2.0),
            );
            let size = self.rng.random_range(2.0..6.0);
            self.particles.push(Particle {
                pos,
                vel,
                color,
                life: PARTICLE_LIFE,
                max_life: PARTICLE_LIFE,
                size,
            });
        }
    }

    /// Advance one tick: integrate, apply gravity, age, cull
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
            p.life -= 1.0;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn system(max: usize) -> ParticleSystem {
        ParticleSystem::new(Pcg32::seed_from_u64(1), max)
    }

    #[test]
    fn test_burst_ranges() {
        let mut fx = system(64);
        fx.burst(Vec2::new(10.0, 20.0), COLOR_GOLD, BURST_IMPACT);
        assert_eq!(fx.len(), BURST_IMPACT);
        for p in fx.as_slice() {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert!((-5.0..5.0).contains(&p.vel.x));
            assert!((-10.0..-2.0).contains(&p.vel.y));
            assert!((2.0..6.0).contains(&p.size));
            assert_eq!(p.alpha(), 1.0);
        }
    }

    #[test]
    fn test_particles_fade_and_die() {
        let mut fx = system(64);
        fx.burst(Vec2::ZERO, COLOR_DAMAGE, BURST_REWARD);
        let start_vy = fx.as_slice()[0].vel.y;

        fx.update();
        let p = &fx.as_slice()[0];
        assert!((p.vel.y - (start_vy + PARTICLE_GRAVITY)).abs() < 1e-5);
        assert!((p.alpha() - 59.0 / 60.0).abs() < 1e-5);

        for _ in 0..59 {
            fx.update();
        }
        assert!(fx.is_empty());
    }

    #[test]
    fn test_cap() {
        let mut fx = system(10);
        fx.burst(Vec2::ZERO, COLOR_GOLD, BURST_IMPACT);
        assert_eq!(fx.len(), 10);
        fx.burst(Vec2::ZERO, COLOR_GOLD, BURST_REWARD);
        assert_eq!(fx.len(), 10);
    }
}
