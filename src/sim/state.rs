//! Game state and core simulation types
//!
//! The simulation loop owns everything here exclusively; nothing is shared
//! across threads and no entity reads live input mid-tick.

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::character::{CharacterClass, CharacterStats};
use super::director::EnemyDirector;
use super::map::GridMap;
use super::tick::TickInput;
use crate::heading;
use crate::tuning::{EnemyTuning, Tuning};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Player health reached zero
    Loss,
    /// Host requested quit/escape
    Quit,
    /// Configured victory condition met
    Victory,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Terminal; further ticks are ignored
    Over(Outcome),
}

/// Who fired a projectile. Fixed for the projectile's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// Things that happened during the last tick, for audio/HUD hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerFired { projectile_id: u32 },
    EnemyFired { enemy_id: u32, projectile_id: u32 },
    Reloaded,
    PlayerHit { damage: u32, health: u32 },
    EnemyHit { enemy_id: u32, damage: u32 },
    EnemyKilled { enemy_id: u32, score: u64 },
    EnemySpawned { enemy_id: u32, pos: Vec2, fallback: bool },
    GameOver(Outcome),
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Facing (radians). Accumulates without wrapping.
    pub angle: f32,
    pub class: CharacterClass,
    pub stats: CharacterStats,
    pub health: u32,
    pub ammo: u32,
    pub max_ammo: u32,
}

impl Player {
    pub fn new(pos: Vec2, class: CharacterClass, max_ammo: u32) -> Self {
        let stats = class.stats();
        Self {
            pos,
            angle: 0.0,
            class,
            stats,
            health: stats.max_health,
            ammo: max_ammo,
            max_ammo,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply held movement keys relative to facing.
    ///
    /// All directional contributions are summed first; if the resulting
    /// position lands on a wall tile the whole move is dropped. Otherwise the
    /// position is clamped to `bounds` shrunk by `margin`, even when no key is
    /// held.
    pub fn walk(&mut self, input: &TickInput, map: &GridMap, bounds: Vec2, margin: f32) {
        let speed = self.stats.speed;
        let mut step = Vec2::ZERO;
        if input.forward {
            step += heading(self.angle) * speed;
        }
        if input.back {
            step -= heading(self.angle) * speed;
        }
        if input.strafe_left {
            step += heading(self.angle - FRAC_PI_2) * speed;
        }
        if input.strafe_right {
            step += heading(self.angle + FRAC_PI_2) * speed;
        }
        let candidate = self.pos + step;
        if map.is_wall_at(candidate) {
            return;
        }
        self.pos = candidate.clamp(Vec2::splat(margin), bounds - Vec2::splat(margin));
    }

    /// Turn by a relative mouse movement
    pub fn rotate(&mut self, mouse_dx: f32, sensitivity: f32) {
        self.angle += mouse_dx * sensitivity;
    }

    /// Spend one round. Returns false (and does nothing) when empty.
    pub fn shoot(&mut self) -> bool {
        if self.ammo > 0 {
            self.ammo -= 1;
            true
        } else {
            false
        }
    }

    /// Refill the magazine
    pub fn reload(&mut self) {
        self.ammo = self.max_ammo;
    }

    /// Returns true if this hit took the player from alive to dead
    pub fn take_damage(&mut self, damage: u32) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(damage);
        was_alive && !self.is_alive()
    }
}

/// A chasing, shooting enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub angle: f32,
    pub health: u32,
    pub speed: f32,
    /// Ticks until the next shot is allowed
    pub cooldown_ticks: u32,
    pub cooldown_period: u32,
    /// Distance to the player as of this tick's `update`
    pub distance_to_player: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, tuning: &EnemyTuning) -> Self {
        Self {
            id,
            pos,
            angle: 0.0,
            health: tuning.health,
            speed: tuning.speed,
            cooldown_ticks: 0,
            cooldown_period: tuning.fire_cooldown_ticks,
            distance_to_player: 0.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Step toward the target and face it
    pub fn update(&mut self, target: Vec2) {
        let delta = target - self.pos;
        let dist_sq = delta.length_squared();
        self.distance_to_player = if dist_sq > 0.0 { dist_sq.sqrt() } else { 1.0 };

        self.pos += delta / self.distance_to_player * self.speed;
        self.angle = delta.y.atan2(delta.x);

        if self.cooldown_ticks > 0 {
            self.cooldown_ticks -= 1;
        }
    }

    #[inline]
    pub fn can_shoot(&self) -> bool {
        self.cooldown_ticks == 0
    }

    /// Off cooldown and the player is inside `range`
    pub fn ready_to_fire(&self, range: f32) -> bool {
        self.can_shoot() && self.distance_to_player < range
    }

    /// Attempt a shot with a uniform roll in [0, 1).
    ///
    /// Succeeds when ready and `roll < chance`, restarting the cooldown.
    pub fn try_shoot(&mut self, roll: f32, range: f32, chance: f32) -> bool {
        if !self.ready_to_fire(range) || roll >= chance {
            return false;
        }
        self.cooldown_ticks = self.cooldown_period;
        true
    }

    /// Returns true if this hit killed the enemy
    pub fn take_damage(&mut self, damage: u32) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(damage);
        was_alive && !self.is_alive()
    }
}

/// A bullet in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub owner: Owner,
    pub damage: u32,
}

impl Projectile {
    pub fn advance(&mut self) {
        self.pos += heading(self.angle) * self.speed;
    }

    /// Outside the `[0, bounds]` rectangle
    pub fn is_out_of_bounds(&self, bounds: Vec2) -> bool {
        self.pos.x < 0.0 || self.pos.x > bounds.x || self.pos.y < 0.0 || self.pos.y > bounds.y
    }
}

/// Complete world state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) tuning: Tuning,
    pub(crate) map: Arc<GridMap>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub player: Player,
    /// Living enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    /// Active projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
    pub director: EnemyDirector,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
    /// Ticks since the player's last accepted shot
    pub(crate) ticks_since_shot: u32,
    next_id: u32,
}

impl GameState {
    /// Create a new run for the chosen class
    pub fn new(class: CharacterClass, tuning: Tuning, seed: u64) -> Self {
        if let Err(err) = tuning.validate() {
            log::warn!("Starting with unvalidated tuning: {err}");
        }
        let player = Player::new(tuning.player_start, class, tuning.max_ammo);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            map: Arc::new(GridMap::arena()),
            time_ticks: 0,
            phase: GamePhase::Playing,
            score: 0,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            director: EnemyDirector::default(),
            events: Vec::new(),
            ticks_since_shot: tuning.fire_interval_ticks,
            next_id: 1,
            tuning,
        };

        let starts = state.tuning.initial_enemies.clone();
        for pos in starts {
            state.spawn_enemy(pos);
        }
        state.events.clear();

        log::info!(
            "Run started: class={} seed={} enemies={}",
            class.name(),
            seed,
            state.enemies.len()
        );
        state
    }

    /// Start from a character-selection result. `None` aborts startup.
    pub fn from_selection(
        selection: Option<CharacterClass>,
        tuning: Tuning,
        seed: u64,
    ) -> Option<Self> {
        selection.map(|class| Self::new(class, tuning, seed))
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub(crate) fn shared_map(&self) -> Arc<GridMap> {
        Arc::clone(&self.map)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Over(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Over(outcome) => Some(outcome),
            GamePhase::Playing => None,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an enemy with default stats
    pub fn spawn_enemy(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, pos, &self.tuning.enemy));
        id
    }

    /// Launch a projectile; damage is fixed by owner
    pub fn spawn_projectile(&mut self, pos: Vec2, angle: f32, owner: Owner) -> u32 {
        let id = self.next_entity_id();
        let damage = match owner {
            Owner::Player => self.player.stats.damage,
            Owner::Enemy => self.tuning.enemy.projectile_damage,
        };
        self.projectiles.push(Projectile {
            id,
            pos,
            angle,
            speed: self.tuning.projectile_speed,
            owner,
            damage,
        });
        id
    }

    /// Ensure lists are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.projectiles.sort_by_key(|p| p.id);
    }

    /// Living enemy count
    pub fn enemies_alive(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }
}

/// Direction from `from` to `to` as a facing angle
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    if d == Vec2::ZERO { 0.0 } else { d.y.atan2(d.x) }
}
