//! Property tests for simulation invariants

use glam::Vec2;
use proptest::prelude::*;

use gridfire::Tuning;
use gridfire::consts::*;
use gridfire::heading;
use gridfire::sim::{
    CharacterClass, GameEvent, GameState, GridMap, Owner, Player, Projectile, TickInput, tick,
};

fn class_strategy() -> impl Strategy<Value = CharacterClass> {
    prop::sample::select(CharacterClass::ALL.to_vec())
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop::bool::weighted(0.1),
        any::<bool>(),
        -60.0f32..60.0,
        prop::bool::weighted(0.2),
    )
        .prop_map(
            |(forward, back, strafe_left, strafe_right, reload, fire, mouse_dx, autopilot)| {
                TickInput {
                    forward,
                    back,
                    strafe_left,
                    strafe_right,
                    reload,
                    fire,
                    mouse_dx,
                    autopilot,
                    ..Default::default()
                }
            },
        )
}

fn aggressive_tuning() -> Tuning {
    let mut tuning = Tuning::default();
    tuning.director.spawn_delay_ticks = 5;
    tuning.enemy.fire_chance = 0.2;
    tuning
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_world_invariants_hold_every_tick(
        seed in any::<u64>(),
        class in class_strategy(),
        inputs in prop::collection::vec(input_strategy(), 1..400),
    ) {
        let mut state = GameState::new(class, aggressive_tuning(), seed);
        let mut awarded = 0u64;

        for input in &inputs {
            tick(&mut state, input);

            prop_assert!(state.player.health <= state.player.stats.max_health);
            prop_assert!(state.player.ammo <= MAX_AMMO);
            prop_assert!(state.enemies_alive() <= MAX_ENEMIES);
            prop_assert!(state.enemies.iter().all(|e| e.health > 0));

            for event in &state.events {
                if let GameEvent::EnemyKilled { score, .. } = event {
                    awarded += score;
                }
            }
            prop_assert_eq!(awarded, state.score);
            prop_assert_eq!(state.score % KILL_SCORE, 0);

            if state.is_over() {
                prop_assert_eq!(state.player.health, 0);
                break;
            }
        }
    }

    #[test]
    fn prop_same_seed_same_run(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..200),
    ) {
        let mut a = GameState::new(CharacterClass::Soldier, aggressive_tuning(), seed);
        let mut b = GameState::new(CharacterClass::Soldier, aggressive_tuning(), seed);
        for input in &inputs {
            let sa = a.advance_one_tick(input);
            let sb = b.advance_one_tick(input);
            prop_assert_eq!(sa.player, sb.player);
            prop_assert_eq!(sa.enemies, sb.enemies);
            prop_assert_eq!(sa.projectiles, sb.projectiles);
            prop_assert_eq!(sa.score, sb.score);
        }
    }

    #[test]
    fn prop_projectile_travels_in_straight_line(
        angle in -10.0f32..10.0,
        x in 100.0f32..900.0,
        y in 100.0f32..700.0,
        n in 0u32..60,
    ) {
        let start = Vec2::new(x, y);
        let mut p = Projectile {
            id: 1,
            pos: start,
            angle,
            speed: PROJECTILE_SPEED,
            owner: Owner::Player,
            damage: 25,
        };
        for _ in 0..n {
            p.advance();
        }
        let expected = start + heading(angle) * (n as f32 * PROJECTILE_SPEED);
        prop_assert!((p.pos - expected).length() < 1e-2);
    }

    #[test]
    fn prop_move_into_wall_is_rejected(
        x in 20.0f32..1004.0,
        y in 20.0f32..748.0,
        angle in -7.0f32..7.0,
        class in class_strategy(),
    ) {
        let map = GridMap::arena();
        let mut player = Player::new(Vec2::new(x, y), class, MAX_AMMO);
        player.angle = angle;
        let before = player.pos;
        let candidate = before + heading(angle) * player.stats.speed;

        let input = TickInput { forward: true, ..Default::default() };
        player.walk(&input, &map, Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT), PLAYER_SIZE);

        if map.is_wall_at(candidate) {
            prop_assert_eq!(player.pos, before);
        } else {
            prop_assert!(player.pos.x >= PLAYER_SIZE && player.pos.x <= SCREEN_WIDTH - PLAYER_SIZE);
            prop_assert!(player.pos.y >= PLAYER_SIZE && player.pos.y <= SCREEN_HEIGHT - PLAYER_SIZE);
        }
    }

    #[test]
    fn prop_reload_is_idempotent(ammo in 0u32..=MAX_AMMO, presses in 1usize..10) {
        let mut player = Player::new(Vec2::new(200.0, 200.0), CharacterClass::Soldier, MAX_AMMO);
        player.ammo = ammo;
        for _ in 0..presses {
            player.reload();
            prop_assert_eq!(player.ammo, MAX_AMMO);
        }
    }
}
