//! Read-only world projection handed to the renderer/HUD each tick

use std::sync::Arc;

use glam::Vec2;
use serde::{Serialize, Serializer};

use super::character::{CharacterClass, Color};
use super::map::GridMap;
use super::state::{GameState, Outcome, Owner};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub angle: f32,
    pub class: CharacterClass,
    pub color: Color,
    pub health: u32,
    pub max_health: u32,
    pub ammo: u32,
    pub max_ammo: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub angle: f32,
    pub health: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub owner: Owner,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub score: u64,
    pub enemies_alive: usize,
    /// `None` while the run is still going
    pub terminal: Option<Outcome>,
    /// Static layout, shared with the simulation
    #[serde(serialize_with = "serialize_map")]
    pub map: Arc<GridMap>,
}

fn serialize_map<S: Serializer>(map: &Arc<GridMap>, serializer: S) -> Result<S::Ok, S::Error> {
    map.as_ref().serialize(serializer)
}

impl GameState {
    pub fn snapshot(&self) -> WorldSnapshot {
        let player = &self.player;
        WorldSnapshot {
            tick: self.time_ticks,
            player: PlayerView {
                pos: player.pos,
                angle: player.angle,
                class: player.class,
                color: player.stats.color,
                health: player.health,
                max_health: player.stats.max_health,
                ammo: player.ammo,
                max_ammo: player.max_ammo,
            },
            enemies: self
                .enemies
                .iter()
                .filter(|e| e.is_alive())
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    angle: e.angle,
                    health: e.health,
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    pos: p.pos,
                    owner: p.owner,
                })
                .collect(),
            score: self.score,
            enemies_alive: self.enemies_alive(),
            terminal: self.outcome(),
            map: self.shared_map(),
        }
    }
}
