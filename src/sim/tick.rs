//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. All timers are
//! counted in ticks so variable host frame times never change behavior.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::autopilot;
use super::collision::{CombatRules, resolve_projectiles};
use super::director::pick_spawn_point;
use super::snapshot::WorldSnapshot;
use super::state::{GameEvent, GamePhase, GameState, Outcome, Owner};

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    /// Refill ammo while held
    pub reload: bool,
    /// Fire button held
    pub fire: bool,
    /// Relative horizontal mouse movement since the previous tick
    pub mouse_dx: f32,
    /// Window close request (one-shot)
    pub quit: bool,
    /// Escape key pressed (one-shot)
    pub escape: bool,
    /// Demo mode - the autopilot drives the player
    pub autopilot: bool,
}

impl TickInput {
    /// Clear fields that must only apply to one tick
    pub fn consume_one_shots(&mut self) {
        self.mouse_dx = 0.0;
        self.quit = false;
        self.escape = false;
    }

    #[inline]
    pub fn wants_exit(&self) -> bool {
        self.quit || self.escape
    }
}

impl GameState {
    /// Run one tick and project the result for rendering
    pub fn advance_one_tick(&mut self, input: &TickInput) -> WorldSnapshot {
        tick(self, input);
        self.snapshot()
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_over() {
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        let driven = autopilot::drive(state);
        input = TickInput {
            quit: input.quit,
            escape: input.escape,
            ..driven
        };
    }
    let input = &input;

    state.events.clear();
    state.time_ticks += 1;
    state.ticks_since_shot = state.ticks_since_shot.saturating_add(1);

    update_player(state, input);
    update_enemies(state);
    run_director(state);

    for projectile in &mut state.projectiles {
        projectile.advance();
    }

    let rules = CombatRules {
        bounds: state.tuning.arena_size(),
        player_size: state.tuning.player_size,
        enemy_size: state.tuning.enemy.size,
        kill_score: state.tuning.kill_score,
    };
    let resolution = resolve_projectiles(
        &mut state.projectiles,
        &mut state.player,
        &mut state.enemies,
        &state.map,
        &rules,
        &mut state.events,
    );
    state.score += resolution.score;

    // Loss wins over everything; quit only takes effect once the tick is done
    let outcome = if resolution.player_down || !state.player.is_alive() {
        Some(Outcome::Loss)
    } else if state.tuning.victory.is_met(state.score, state.time_ticks) {
        Some(Outcome::Victory)
    } else if input.wants_exit() {
        Some(Outcome::Quit)
    } else {
        None
    };

    if let Some(outcome) = outcome {
        state.phase = GamePhase::Over(outcome);
        state.events.push(GameEvent::GameOver(outcome));
        log::info!(
            "Game over ({:?}) at tick {} with score {}",
            outcome,
            state.time_ticks,
            state.score
        );
    }
}

/// Move, turn, fire and reload from the input snapshot
fn update_player(state: &mut GameState, input: &TickInput) {
    let bounds = state.tuning.arena_size();
    let margin = state.tuning.player_size;
    state.player.walk(input, &state.map, bounds, margin);
    state.player.rotate(input.mouse_dx, state.tuning.mouse_sensitivity);

    if input.fire
        && state.ticks_since_shot >= state.tuning.fire_interval_ticks
        && state.player.shoot()
    {
        let (pos, angle) = (state.player.pos, state.player.angle);
        let projectile_id = state.spawn_projectile(pos, angle, Owner::Player);
        state.ticks_since_shot = 0;
        state.events.push(GameEvent::PlayerFired { projectile_id });
    }

    if input.reload && state.player.ammo < state.player.max_ammo {
        state.player.reload();
        state.events.push(GameEvent::Reloaded);
    }
}

/// Chase the player, then roll fire decisions
fn update_enemies(state: &mut GameState) {
    let target = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.update(target);
    }

    let range = state.tuning.enemy.fire_range;
    let chance = state.tuning.enemy.fire_chance;
    let mut shots = Vec::new();
    for enemy in &mut state.enemies {
        // Only draw from the RNG when the shot is actually possible
        if !enemy.ready_to_fire(range) {
            continue;
        }
        let roll: f32 = state.rng.random();
        if enemy.try_shoot(roll, range, chance) {
            shots.push((enemy.id, enemy.pos, enemy.angle));
        }
    }

    for (enemy_id, pos, angle) in shots {
        let projectile_id = state.spawn_projectile(pos, angle, Owner::Enemy);
        state.events.push(GameEvent::EnemyFired {
            enemy_id,
            projectile_id,
        });
    }
}

/// Spawn at most one enemy when the director's timer comes due
fn run_director(state: &mut GameState) {
    let alive = state.enemies_alive();
    if !state.director.update(alive, &state.tuning.director) {
        return;
    }

    let spawn = pick_spawn_point(
        &mut state.rng,
        &state.map,
        state.tuning.arena_size(),
        state.player.pos,
        &state.tuning.director,
    );
    if spawn.fallback {
        log::warn!("No valid spawn point found, using fallback {:?}", spawn.pos);
    }
    let enemy_id = state.spawn_enemy(spawn.pos);
    log::debug!("Spawned enemy {} at {:?}", enemy_id, spawn.pos);
    state.events.push(GameEvent::EnemySpawned {
        enemy_id,
        pos: spawn.pos,
        fallback: spawn.fallback,
    });
}
