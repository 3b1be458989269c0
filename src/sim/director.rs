//! Enemy spawn policy: timing, placement and population cap

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::map::GridMap;
use crate::tuning::DirectorTuning;

/// A chosen spawn location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub pos: Vec2,
    /// Every attempt was rejected and the fixed fallback was used
    pub fallback: bool,
}

/// Tracks the spawn timer between ticks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyDirector {
    /// Ticks accumulated while below the population cap
    pub spawn_timer: u32,
}

impl EnemyDirector {
    /// Advance the timer for this tick. Returns true when a spawn is due.
    ///
    /// The timer only runs while `alive < max_enemies`; reaching the cap
    /// resets it.
    pub fn update(&mut self, alive: usize, tuning: &DirectorTuning) -> bool {
        if alive >= tuning.max_enemies {
            self.spawn_timer = 0;
            return false;
        }
        self.spawn_timer += 1;
        if self.spawn_timer >= tuning.spawn_delay_ticks {
            self.spawn_timer = 0;
            return true;
        }
        false
    }
}

/// Pick a spawn point on a random arena edge, away from walls and the player
pub fn pick_spawn_point<R: Rng>(
    rng: &mut R,
    map: &GridMap,
    arena: Vec2,
    player_pos: Vec2,
    tuning: &DirectorTuning,
) -> SpawnPoint {
    for _ in 0..tuning.spawn_attempts {
        let pos = edge_candidate(rng, arena, tuning.edge_inset);
        if is_valid_spawn(map, pos, player_pos, tuning.min_player_distance) {
            return SpawnPoint {
                pos,
                fallback: false,
            };
        }
    }

    SpawnPoint {
        pos: tuning.fallback_spawn,
        fallback: true,
    }
}

/// Integer point along one of the four edges, kept `inset` from the corners.
///
/// An inset wider than half the arena collapses the range to `inset`.
fn edge_candidate<R: Rng>(rng: &mut R, arena: Vec2, inset: f32) -> Vec2 {
    let lo = inset as i32;
    let max_x = ((arena.x - inset) as i32).max(lo);
    let max_y = ((arena.y - inset) as i32).max(lo);

    match rng.random_range(0..4u8) {
        // Top
        0 => Vec2::new(rng.random_range(lo..=max_x) as f32, inset),
        // Bottom
        1 => Vec2::new(rng.random_range(lo..=max_x) as f32, arena.y - inset),
        // Left
        2 => Vec2::new(inset, rng.random_range(lo..=max_y) as f32),
        // Right
        _ => Vec2::new(arena.x - inset, rng.random_range(lo..=max_y) as f32),
    }
}

fn is_valid_spawn(map: &GridMap, pos: Vec2, player_pos: Vec2, min_distance: f32) -> bool {
    let (tx, ty) = GridMap::tile_of(pos);
    map.in_bounds(tx, ty) && !map.is_wall(tx, ty) && pos.distance(player_pos) > min_distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> Vec2 {
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    #[test]
    fn test_timer_fires_after_delay() {
        let tuning = DirectorTuning::default();
        let mut director = EnemyDirector::default();
        for _ in 0..SPAWN_DELAY_TICKS - 1 {
            assert!(!director.update(3, &tuning));
        }
        assert!(director.update(3, &tuning));
        assert_eq!(director.spawn_timer, 0);
    }

    #[test]
    fn test_timer_resets_at_cap() {
        let tuning = DirectorTuning::default();
        let mut director = EnemyDirector::default();
        for _ in 0..100 {
            director.update(5, &tuning);
        }
        assert_eq!(director.spawn_timer, 100);
        assert!(!director.update(MAX_ENEMIES, &tuning));
        assert_eq!(director.spawn_timer, 0);
    }

    #[test]
    fn test_spawn_points_are_valid() {
        let map = GridMap::arena();
        let tuning = DirectorTuning::default();
        let player = Vec2::new(200.0, 200.0);
        let mut rng = Pcg32::seed_from_u64(42);

        for _ in 0..200 {
            let spawn = pick_spawn_point(&mut rng, &map, arena(), player, &tuning);
            assert!(!spawn.fallback);
            assert!(!map.is_wall_at(spawn.pos));
            assert!(spawn.pos.distance(player) > SPAWN_MIN_PLAYER_DISTANCE);
            assert_eq!(spawn.pos.x.fract(), 0.0);
            assert_eq!(spawn.pos.y.fract(), 0.0);
        }
    }

    #[test]
    fn test_edge_candidates_stay_on_edges() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let p = edge_candidate(&mut rng, arena(), TILE_SIZE);
            let on_vertical = p.x == TILE_SIZE || p.x == SCREEN_WIDTH - TILE_SIZE;
            let on_horizontal = p.y == TILE_SIZE || p.y == SCREEN_HEIGHT - TILE_SIZE;
            assert!(on_vertical || on_horizontal);
            assert!(p.x >= TILE_SIZE && p.x <= SCREEN_WIDTH - TILE_SIZE);
            assert!(p.y >= TILE_SIZE && p.y <= SCREEN_HEIGHT - TILE_SIZE);
        }
    }

    #[test]
    fn test_oversized_inset_does_not_panic() {
        let map = GridMap::arena();
        let tuning = DirectorTuning {
            edge_inset: 600.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..50 {
            let p = edge_candidate(&mut rng, arena(), tuning.edge_inset);
            assert!(p.x == 600.0 || p.y == 600.0);
        }
        let spawn = pick_spawn_point(&mut rng, &map, arena(), Vec2::new(200.0, 200.0), &tuning);
        assert!(spawn.pos.is_finite());
    }

    #[test]
    fn test_fallback_when_every_attempt_rejected() {
        let map = GridMap::arena();
        let tuning = DirectorTuning {
            min_player_distance: 10_000.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(9);
        let spawn = pick_spawn_point(&mut rng, &map, arena(), Vec2::new(500.0, 400.0), &tuning);
        assert!(spawn.fallback);
        assert_eq!(spawn.pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let map = GridMap::arena();
        let tuning = DirectorTuning::default();
        let player = Vec2::new(500.0, 400.0);
        let mut a = Pcg32::seed_from_u64(1234);
        let mut b = Pcg32::seed_from_u64(1234);
        for _ in 0..20 {
            let pa = pick_spawn_point(&mut a, &map, arena(), player, &tuning);
            let pb = pick_spawn_point(&mut b, &map, arena(), player, &tuning);
            assert_eq!(pa, pb);
        }
    }
}
