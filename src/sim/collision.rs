//! Projectile collision and combat resolution
//!
//! Runs once per tick after every entity has moved. Projectiles are resolved
//! in ascending id order and enemies are tested in ascending id order, so the
//! outcome never depends on how the lists happen to be stored.

use glam::Vec2;

use super::map::GridMap;
use super::state::{Enemy, GameEvent, Owner, Player, Projectile};

/// Combat parameters the resolver needs
#[derive(Debug, Clone, Copy)]
pub struct CombatRules {
    /// Play-field rectangle `[0, bounds]`
    pub bounds: Vec2,
    pub player_size: f32,
    pub enemy_size: f32,
    pub kill_score: u64,
}

/// Result of one resolver pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub score: u64,
    /// Killed enemy ids, in resolution order
    pub kills: Vec<u32>,
    /// The player's health reached zero this pass
    pub player_down: bool,
}

/// Squared-distance hit test against a footprint radius
#[inline]
pub fn within_footprint(point: Vec2, center: Vec2, footprint: f32) -> bool {
    point.distance_squared(center) < footprint * footprint
}

/// Resolve every projectile against walls, bounds, the player and enemies.
///
/// Removed projectiles are dropped from `projectiles`; dead enemies are
/// removed from `enemies` before returning.
pub fn resolve_projectiles(
    projectiles: &mut Vec<Projectile>,
    player: &mut Player,
    enemies: &mut Vec<Enemy>,
    map: &GridMap,
    rules: &CombatRules,
    events: &mut Vec<GameEvent>,
) -> Resolution {
    projectiles.sort_by_key(|p| p.id);
    enemies.sort_by_key(|e| e.id);

    let mut resolution = Resolution::default();

    projectiles.retain(|projectile| {
        if projectile.is_out_of_bounds(rules.bounds) {
            return false;
        }
        if map.is_wall_at(projectile.pos) {
            return false;
        }

        match projectile.owner {
            Owner::Enemy => {
                if within_footprint(projectile.pos, player.pos, rules.player_size) {
                    if player.take_damage(projectile.damage) {
                        resolution.player_down = true;
                    }
                    events.push(GameEvent::PlayerHit {
                        damage: projectile.damage,
                        health: player.health,
                    });
                    return false;
                }
            }
            Owner::Player => {
                let target = enemies.iter_mut().find(|e| {
                    e.is_alive() && within_footprint(projectile.pos, e.pos, rules.enemy_size)
                });
                if let Some(enemy) = target {
                    events.push(GameEvent::EnemyHit {
                        enemy_id: enemy.id,
                        damage: projectile.damage,
                    });
                    if enemy.take_damage(projectile.damage) {
                        resolution.score += rules.kill_score;
                        resolution.kills.push(enemy.id);
                        events.push(GameEvent::EnemyKilled {
                            enemy_id: enemy.id,
                            score: rules.kill_score,
                        });
                        log::debug!("Enemy {} killed", enemy.id);
                    }
                    return false;
                }
            }
        }

        true
    });

    enemies.retain(|e| e.is_alive());
    resolution
}
