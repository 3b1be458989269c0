//! Data-driven game balance
//!
//! Every gameplay constant lives in one immutable `Tuning` value handed to the
//! simulation at construction. Defaults reproduce the classic arena; a JSON
//! file may override any subset of fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl TuningError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Optional win condition. The classic arena never ends in victory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryCondition {
    #[default]
    None,
    /// Win once the score reaches this many points
    Score(u64),
    /// Win after surviving this many ticks
    SurviveTicks(u64),
}

impl VictoryCondition {
    /// Whether the condition is met for the given score and elapsed ticks
    pub fn is_met(&self, score: u64, time_ticks: u64) -> bool {
        match *self {
            VictoryCondition::None => false,
            VictoryCondition::Score(target) => score >= target,
            VictoryCondition::SurviveTicks(target) => time_ticks >= target,
        }
    }
}

/// Enemy stat block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub health: u32,
    /// Units per tick
    pub speed: f32,
    /// Collision radius for hit tests
    pub size: f32,
    pub fire_cooldown_ticks: u32,
    /// Enemies only shoot when the player is closer than this
    pub fire_range: f32,
    /// Per-tick chance to shoot while ready and in range
    pub fire_chance: f32,
    pub projectile_damage: u32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            health: ENEMY_HEALTH,
            speed: ENEMY_SPEED,
            size: ENEMY_SIZE,
            fire_cooldown_ticks: ENEMY_FIRE_COOLDOWN_TICKS,
            fire_range: ENEMY_FIRE_RANGE,
            fire_chance: ENEMY_FIRE_CHANCE,
            projectile_damage: ENEMY_PROJECTILE_DAMAGE,
        }
    }
}

/// Spawn policy parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorTuning {
    /// Population cap
    pub max_enemies: usize,
    pub spawn_delay_ticks: u32,
    pub spawn_attempts: u32,
    pub min_player_distance: f32,
    /// Distance kept from the arena corners along each edge
    pub edge_inset: f32,
    /// Used when every placement attempt is rejected
    pub fallback_spawn: Vec2,
}

impl Default for DirectorTuning {
    fn default() -> Self {
        Self {
            max_enemies: MAX_ENEMIES,
            spawn_delay_ticks: SPAWN_DELAY_TICKS,
            spawn_attempts: SPAWN_ATTEMPTS,
            min_player_distance: SPAWN_MIN_PLAYER_DISTANCE,
            edge_inset: TILE_SIZE,
            fallback_spawn: Vec2::new(50.0, 50.0),
        }
    }
}

/// Complete gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,
    pub mouse_sensitivity: f32,
    pub max_ammo: u32,
    /// Minimum ticks between accepted player shots
    pub fire_interval_ticks: u32,
    /// Player collision radius, also the margin kept from the arena edge
    pub player_size: f32,
    pub player_start: Vec2,
    pub projectile_speed: f32,
    pub kill_score: u64,
    pub enemy: EnemyTuning,
    pub director: DirectorTuning,
    /// Enemies present when the run begins
    pub initial_enemies: Vec<Vec2>,
    pub victory: VictoryCondition,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: SCREEN_WIDTH,
            arena_height: SCREEN_HEIGHT,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            max_ammo: MAX_AMMO,
            fire_interval_ticks: FIRE_INTERVAL_TICKS,
            player_size: PLAYER_SIZE,
            player_start: Vec2::new(200.0, 200.0),
            projectile_speed: PROJECTILE_SPEED,
            kill_score: KILL_SCORE,
            enemy: EnemyTuning::default(),
            director: DirectorTuning::default(),
            initial_enemies: vec![
                Vec2::new(600.0, 300.0),
                Vec2::new(700.0, 500.0),
                Vec2::new(800.0, 200.0),
            ],
            victory: VictoryCondition::None,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields take their defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Arena extent as a vector
    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(TuningError::invalid("arena_width", "arena must have positive size"));
        }
        if !(self.player_size >= 0.0) {
            return Err(TuningError::invalid("player_size", "must be non-negative"));
        }
        if self.arena_width < self.player_size * 2.0 || self.arena_height < self.player_size * 2.0
        {
            return Err(TuningError::invalid(
                "player_size",
                "arena must be at least twice the player size",
            ));
        }
        if !(self.projectile_speed > 0.0) {
            return Err(TuningError::invalid("projectile_speed", "must be positive"));
        }
        if self.max_ammo == 0 {
            return Err(TuningError::invalid("max_ammo", "must be at least 1"));
        }
        if self.enemy.health == 0 {
            return Err(TuningError::invalid("enemy.health", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.enemy.fire_chance) {
            return Err(TuningError::invalid(
                "enemy.fire_chance",
                format!("{} is not a probability", self.enemy.fire_chance),
            ));
        }
        if self.director.spawn_attempts == 0 {
            return Err(TuningError::invalid("director.spawn_attempts", "must be at least 1"));
        }
        let inset = self.director.edge_inset;
        if !(inset >= 0.0) || inset * 2.0 > self.arena_width || inset * 2.0 > self.arena_height {
            return Err(TuningError::invalid(
                "director.edge_inset",
                "must fit twice inside the arena",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.max_ammo, 30);
        assert_eq!(tuning.fire_interval_ticks, 12);
        assert_eq!(tuning.director.max_enemies, 10);
        assert_eq!(tuning.initial_enemies.len(), 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(
            r#"{ "kill_score": 250, "enemy": { "health": 80 }, "victory": { "score": 1000 } }"#,
        )
        .unwrap();
        assert_eq!(tuning.kill_score, 250);
        assert_eq!(tuning.enemy.health, 80);
        assert_eq!(tuning.enemy.speed, ENEMY_SPEED);
        assert_eq!(tuning.victory, VictoryCondition::Score(1000));
        assert_eq!(tuning.player_start, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_invalid_fire_chance_rejected() {
        let err = Tuning::from_json(r#"{ "enemy": { "fire_chance": 1.5 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "enemy.fire_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_victory_conditions() {
        assert!(!VictoryCondition::None.is_met(u64::MAX, u64::MAX));
        assert!(VictoryCondition::Score(500).is_met(500, 0));
        assert!(!VictoryCondition::Score(500).is_met(400, 10_000));
        assert!(VictoryCondition::SurviveTicks(60).is_met(0, 60));
    }
}
