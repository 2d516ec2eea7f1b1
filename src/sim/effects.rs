//! Active power-up ledger

use std::collections::BTreeMap;

use super::state::PowerUpKind;

/// Remaining duration (ms) per active effect
///
/// At most one entry per effect; activating a present effect resets its
/// duration instead of stacking. Backed by a `BTreeMap` so iteration order is
/// stable.
#[derive(Debug, Clone, Default)]
pub struct PowerUpLedger {
    remaining: BTreeMap<PowerUpKind, f32>,
}

impl PowerUpLedger {
    /// Activate or refresh an effect to `duration_ms`
    pub fn activate(&mut self, kind: PowerUpKind, duration_ms: f32) {
        self.remaining.insert(kind, duration_ms);
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining.contains_key(&kind)
    }

    pub fn remaining(&self, kind: PowerUpKind) -> Option<f32> {
        self.remaining.get(&kind).copied()
    }

    /// Count down every effect and drop the expired ones
    pub fn decay(&mut self, dt_ms: f32) {
        self.remaining.retain(|kind, ms| {
            *ms -= dt_ms;
            if *ms <= 0.0 {
                log::debug!("Power-up {:?} expired", kind);
                false
            } else {
                true
            }
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = (PowerUpKind, f32)> + '_ {
        self.remaining.iter().map(|(k, ms)| (*k, *ms))
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
