//! Property tests over the simulation core

use std::collections::BTreeMap;

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use tank_arena::sim::movement::move_hostiles;
use tank_arena::sim::{
    GameEvent, GamePhase, GameState, HostileController, HostileUnit, MoveIntent, Owner,
    Projectile, Rect, TickInput, WaveScheduler, WorldBounds, tick,
};
use tank_arena::{LevelLayout, Tuning};

const DT: f32 = 1.0 / 60.0;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn hostiles_only_move_along_their_facing(
        seed in any::<u64>(),
        starts in prop::collection::vec((100.0f32..1100.0, 100.0f32..1900.0), 1..6),
        frames in 1usize..400,
    ) {
        let bounds = WorldBounds::new(1200.0, 2000.0);
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut controller = HostileController::default();
        let mut hostiles: Vec<HostileUnit> = starts
            .iter()
            .map(|&(x, y)| HostileUnit::new(Vec2::new(x, y), Vec2::new(40.0, 40.0), 100.0, 2.0))
            .collect();
        let player = Rect::new(Vec2::new(-500.0, -500.0), Vec2::new(50.0, 53.0));

        for _ in 0..frames {
            controller.update(&mut hostiles, 1000.0, DT, 600.0, &mut rng);
            let before: Vec<Vec2> = hostiles.iter().map(|h| h.pos).collect();
            move_hostiles(&mut hostiles, &[], &player, bounds, DT);

            for (unit, old) in hostiles.iter().zip(before) {
                let step = unit.pos - old;
                if step != Vec2::ZERO {
                    let expected = unit.facing.vector() * unit.speed * DT;
                    prop_assert!((step - expected).length() < 1e-3);
                }
            }
        }
    }

    #[test]
    fn shells_never_pass_their_range(
        origin in (0.0f32..2000.0, 0.0f32..2000.0),
        angle in 0.0f32..360.0,
        range in 0.0f32..1500.0,
        dts in prop::collection::vec(0.0f32..0.2, 1..120),
    ) {
        let start = Vec2::new(origin.0, origin.1);
        let mut shell = Projectile::with_range(start, angle, range, Owner::Hostile);
        for dt in dts {
            shell.advance(dt);
            prop_assert!(shell.traveled() <= shell.max_range());
            prop_assert!(start.distance(shell.pos()) <= range + 1e-2);
        }
    }

    #[test]
    fn waves_grow_while_interval_tightens(seed in any::<u64>(), waves in 1usize..80) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut scheduler = WaveScheduler::new();
        let mut spawn_points = BTreeMap::new();
        spawn_points.insert(0, (0..4).map(|i| Vec2::new(100.0 * i as f32, 50.0)).collect());
        let tuning = Tuning::default();
        let mut events = Vec::new();

        let mut last = *scheduler.level(0).unwrap();
        for _ in 0..waves {
            let due = last.interval;
            scheduler.level_mut(0).elapsed = due;
            scheduler.update(0.0, &spawn_points, &tuning, &mut rng, &mut events);

            let now = *scheduler.level(0).unwrap();
            prop_assert_eq!(now.wave_size, last.wave_size + 1);
            prop_assert!(now.interval <= last.interval);
            prop_assert!(now.interval >= 10.0);
            prop_assert_eq!(now.elapsed, 0.0);
            last = now;
        }
    }

    #[test]
    fn player_health_drops_in_shell_sized_steps(seed in any::<u64>(), frames in 60usize..900) {
        let mut state = GameState::new(&LevelLayout::demo(), Tuning::default(), seed).unwrap();
        for level in 0..3 {
            state.waves.level_mut(level).elapsed = 59.0;
        }

        let mut health = state.player.health;
        for frame in 0..frames {
            let input = TickInput {
                keys: MoveIntent { up: frame % 240 < 120, ..Default::default() },
                ..Default::default()
            };
            tick(&mut state, &input, DT);

            let hits = state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::PlayerDamaged { .. }))
                .count() as i32;
            prop_assert_eq!(health - state.player.health, hits * 5);
            health = state.player.health;
            if state.phase == GamePhase::GameOver {
                prop_assert!(health <= 0);
                break;
            }
        }
    }
}
