//! Score, distance and difficulty ramp

use serde::{Deserialize, Serialize};

/// End-of-run summary handed to the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub score: u64,
    /// Whole distance units travelled
    pub distance: u64,
    pub max_speed: f32,
}

#[derive(Debug, Clone)]
pub struct ScoreAccumulator {
    score: u64,
    distance: f32,
    speed: f32,
    max_speed: f32,
    base_speed: f32,
    speed_cap: f32,
}

impl ScoreAccumulator {
    pub fn new(base_speed: f32, speed_cap: f32) -> Self {
        Self {
            score: 0,
            distance: 0.0,
            speed: base_speed,
            max_speed: base_speed,
            base_speed,
            speed_cap,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Award points (score only ever goes up)
    pub fn add(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Travel one tick at the current speed, then re-derive speed from the
    /// new distance: `base + floor(distance / interval) * step`, capped
    pub fn advance(&mut self, step: f32, interval: f32) {
        self.distance += self.speed;
        let ramp = (self.distance / interval).floor() * step;
        self.speed = (self.base_speed + ramp).min(self.speed_cap);
        self.max_speed = self.max_speed.max(self.speed);
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.score,
            distance: self.distance.floor() as u64,
            max_speed: self.max_speed,
        }
    }
}
