//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, timers counted in ticks
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, input-device or platform dependencies

pub mod autopilot;
pub mod character;
pub mod collision;
pub mod director;
pub mod map;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use character::{CharacterClass, CharacterStats, Color};
pub use collision::{CombatRules, Resolution, resolve_projectiles, within_footprint};
pub use director::{EnemyDirector, SpawnPoint, pick_spawn_point};
pub use map::{Cell, GridMap};
pub use snapshot::{EnemyView, PlayerView, ProjectileView, WorldSnapshot};
pub use state::{
    Enemy, GameEvent, GamePhase, GameState, Outcome, Owner, Player, Projectile, angle_to,
};
pub use tick::{TickInput, tick};
