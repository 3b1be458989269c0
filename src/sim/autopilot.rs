//! Idle/demo mode - synthesizes player input from the current world state
//!
//! Turns toward the nearest enemy, fires once lined up, keeps a working
//! distance and weaves side to side to dodge return fire.

use std::cmp::Ordering;

use super::state::{GameState, angle_to};
use super::tick::TickInput;
use crate::normalize_angle;

/// Largest mouse delta the autopilot will produce in one tick
const MAX_TURN_PER_TICK: f32 = 80.0;
/// Radians of aim error tolerated before pulling the trigger
const AIM_TOLERANCE: f32 = 0.08;
const ENGAGE_RANGE: f32 = 450.0;
const KEEP_AWAY: f32 = 160.0;
const CLOSE_IN: f32 = 320.0;
/// Ticks spent strafing in each direction
const WEAVE_PERIOD: u64 = 45;

/// Build the input the autopilot would give this tick
pub fn drive(state: &GameState) -> TickInput {
    let player = &state.player;
    let mut input = TickInput {
        reload: player.ammo == 0,
        ..Default::default()
    };

    let nearest = state
        .enemies
        .iter()
        .filter(|e| e.is_alive())
        .min_by(|a, b| {
            a.pos
                .distance_squared(player.pos)
                .partial_cmp(&b.pos.distance_squared(player.pos))
                .unwrap_or(Ordering::Equal)
        });

    let Some(target) = nearest else {
        // Nothing to shoot: slow scan
        input.mouse_dx = MAX_TURN_PER_TICK / 4.0;
        return input;
    };

    let sensitivity = state.tuning.mouse_sensitivity;
    let error = normalize_angle(angle_to(player.pos, target.pos) - player.angle);
    if sensitivity > 0.0 {
        input.mouse_dx = (error / sensitivity).clamp(-MAX_TURN_PER_TICK, MAX_TURN_PER_TICK);
    }
    // Aim error left after this tick's turn is applied
    let residual = error - input.mouse_dx * sensitivity;

    let dist = target.pos.distance(player.pos);
    input.fire = player.ammo > 0 && dist < ENGAGE_RANGE && residual.abs() < AIM_TOLERANCE;

    if dist < KEEP_AWAY {
        input.back = true;
    } else if dist > CLOSE_IN {
        input.forward = true;
    }

    let weave_left = (state.time_ticks / WEAVE_PERIOD) % 2 == 0;
    input.strafe_left = weave_left;
    input.strafe_right = !weave_left;

    input
}
