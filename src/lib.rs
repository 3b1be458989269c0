//! Gridfire - a top-down tile arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, combat, spawning, world state)
//! - `platform`: Host frame pacing (fixed-step accumulator)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{DirectorTuning, EnemyTuning, Tuning, TuningError, VictoryCondition};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate. Timers are counted in ticks, never seconds.
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Map grid dimensions (fixed layout)
    pub const TILE_SIZE: f32 = 64.0;
    pub const MAP_COLS: usize = 16;
    pub const MAP_ROWS: usize = 12;

    /// Play-field bounds, matching the rendered map extent
    pub const SCREEN_WIDTH: f32 = 1024.0;
    pub const SCREEN_HEIGHT: f32 = 768.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const MAX_AMMO: u32 = 30;
    pub const MOUSE_SENSITIVITY: f32 = 0.006;
    /// 200ms at 60 Hz
    pub const FIRE_INTERVAL_TICKS: u32 = 12;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 15.0;
    pub const ENEMY_PROJECTILE_DAMAGE: u32 = 10;

    /// Enemy defaults
    pub const ENEMY_HEALTH: u32 = 50;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_SIZE: f32 = 20.0;
    pub const ENEMY_FIRE_COOLDOWN_TICKS: u32 = 60;
    pub const ENEMY_FIRE_RANGE: f32 = 300.0;
    pub const ENEMY_FIRE_CHANCE: f32 = 0.02;

    /// Director defaults
    pub const MAX_ENEMIES: usize = 10;
    /// 2 seconds at 60 Hz
    pub const SPAWN_DELAY_TICKS: u32 = 120;
    pub const SPAWN_ATTEMPTS: u32 = 50;
    pub const SPAWN_MIN_PLAYER_DISTANCE: f32 = 200.0;

    /// Points per enemy killed
    pub const KILL_SCORE: u64 = 100;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    // Facing angles accumulate without bound
    angle %= TAU;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector pointing along `angle` (radians, screen coordinates with y down)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
