//! Player kinematics: lane easing, jump/slide/spin and timed flags
//!
//! Motion coefficients are per tick; durations count down in milliseconds.

use super::effects::PowerUpLedger;
use super::state::{PowerUpKind, Player};
use crate::consts::{GROUND_Y, LANES, SLIDE_Y};
use crate::input::TickInput;
use crate::tuning::Tuning;
use crate::{lane_x, wrap_degrees};

/// Apply buffered intents, then advance the player by one tick
pub fn step_player(
    player: &mut Player,
    input: &TickInput,
    effects: &PowerUpLedger,
    tuning: &Tuning,
    dt_ms: f32,
) {
    apply_intents(player, input, effects, tuning);

    // Smooth lane transition
    player.x += (player.target_x - player.x) * tuning.lane_ease;

    if player.jumping {
        player.vel_y += tuning.gravity;
        player.y += player.vel_y;

        let floor = if player.sliding { SLIDE_Y } else { GROUND_Y };
        if player.y >= floor {
            player.y = floor;
            player.jumping = false;
            player.vel_y = 0.0;
        }
    }

    if player.sliding {
        player.slide_ms -= dt_ms;
        if player.slide_ms <= 0.0 {
            player.slide_ms = 0.0;
            player.sliding = false;
            // Mid-air the landing check picks the floor
            if !player.jumping {
                player.y = GROUND_Y;
            }
        }
    }

    if player.spinning {
        player.spin_angle = wrap_degrees(player.spin_angle + tuning.spin_step_deg);
        player.spin_ms -= dt_ms;
        if player.spin_ms <= 0.0 {
            player.spin_ms = 0.0;
            player.spinning = false;
        }
    }

    if player.invulnerable {
        player.invulnerable_ms -= dt_ms;
        if player.invulnerable_ms <= 0.0 {
            player.invulnerable_ms = 0.0;
            player.invulnerable = false;
        }
    }
}

fn apply_intents(player: &mut Player, input: &TickInput, effects: &PowerUpLedger, tuning: &Tuning) {
    if input.lane_left && player.lane > 0 {
        player.lane -= 1;
        player.target_x = lane_x(player.lane);
    }
    if input.lane_right && player.lane < LANES.len() - 1 {
        player.lane += 1;
        player.target_x = lane_x(player.lane);
    }

    if input.jump {
        if !player.jumping && !player.sliding {
            player.jumping = true;
            player.vel_y = tuning.jump_impulse;
        } else if player.jumping
            && player.vel_y > tuning.double_jump_window
            && effects.is_active(PowerUpKind::DoubleJump)
        {
            // Weaker second jump
            player.vel_y = tuning.jump_impulse * tuning.double_jump_factor;
        }
    }

    if input.slide && !player.jumping {
        player.sliding = true;
        player.y = SLIDE_Y;
        player.slide_ms = tuning.slide_ms;
    }

    if input.spin {
        player.spinning = true;
        player.spin_ms = tuning.spin_ms;
    }
}
