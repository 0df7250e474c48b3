//! Mech integration test
//!
//! Полный SimulationPlugin headless (ground plane, без Rapier)
//!
//! Проверяем:
//! - Energy инварианты (0 ≤ current ≤ max) на длинном прогоне
//! - Boost drain → depleted → fallback на walk
//! - FCS: soft → hard lock на манекене, потеря цели вне range
//! - Нет паники/крашей, мехи не проваливаются под пол

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use mech_simulation::*;

/// Helper: headless App с ручным временем (ровно 1/60 с на update)
fn create_mech_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )));
    app
}

/// Helper: мех + дополнительные компоненты (commands применяются сразу)
fn spawn_mech_with(
    app: &mut App,
    position: Vec3,
    config: &MechConfig,
    extra: impl Bundle,
) -> Entity {
    let entity = {
        let mut commands = app.world_mut().commands();
        let entity = spawn_mech(&mut commands, position, config);
        commands.entity(entity).insert(extra);
        entity
    };
    app.world_mut().flush();
    entity
}

/// Helper: неподвижный мех, смотрит по +Z
fn spawn_sentry(app: &mut App, position: Vec3, config: &MechConfig) -> Entity {
    spawn_mech_with(
        app,
        position,
        config,
        (
            MechInput {
                facing: Some(Vec3::Z),
                ..default()
            },
            AimMaster {
                rotation: Some(Quat::IDENTITY),
            },
        ),
    )
}

fn spawn_dummy(app: &mut App, position: Vec3) -> Entity {
    let entity = spawn_target_dummy(&mut app.world_mut().commands(), position);
    app.world_mut().flush();
    entity
}

fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

/// Test: несколько wander мехов 1200 тиков, инварианты энергии и пола
#[test]
fn test_wandering_mechs_keep_invariants() {
    let mut app = create_mech_app(42);
    let config = MechConfig::default();

    for i in 0..4 {
        let seed = 100 + i as u64;
        spawn_mech_with(
            &mut app,
            Vec3::new(i as f32 * 10.0, 0.0, 0.0),
            &config,
            WanderBrain::new(seed),
        );
    }

    for tick in 0..1200 {
        app.update();

        let mut query = app
            .world_mut()
            .query_filtered::<(&EnergyPool, &Transform, &KinematicState), With<Mech>>();
        for (energy, transform, state) in query.iter(app.world()) {
            assert!(
                energy.current >= 0.0 && energy.current <= energy.max,
                "tick {}: energy out of bounds {}",
                tick,
                energy.current
            );
            assert!(transform.translation.is_finite());
            assert!(transform.translation.y >= 0.0, "tick {}: fell through floor", tick);
            assert!(state.horizontal_velocity.length() <= config.locomotion.boost_horizontal_speed + 1e-3);
            assert!(state.vertical_velocity <= config.locomotion.boost_vertical_speed.max(config.locomotion.jump_force));
        }
    }
}

/// Test: непрерывный boost истощает пул, мех падает до walk скорости
#[test]
fn test_boost_depletes_energy_and_falls_back_to_walk() {
    let mut app = create_mech_app(42);
    let mut config = MechConfig::default();
    config.energy.regen_rate = 50.0;

    let mech = spawn_mech_with(
        &mut app,
        Vec3::ZERO,
        &config,
        MechInput {
            move_intent: Vec2::Y,
            facing: Some(Vec3::Z),
            boost: true,
            jump: false,
        },
    );

    // Разгон на бусте
    run_ticks(&mut app, 120);
    let energy = *app.world().get::<EnergyPool>(mech).unwrap();
    let state = *app.world().get::<KinematicState>(mech).unwrap();
    assert!(energy.current < energy.max, "boost must drain energy");
    assert!(state.horizontal_velocity.y > config.locomotion.walk_speed);

    // Net drain 150/s → истощение примерно за 7 секунд
    let mut saw_depleted = false;
    for _ in 0..600 {
        app.update();
        saw_depleted |= app.world().get::<EnergyPool>(mech).unwrap().is_depleted();
    }
    assert!(saw_depleted, "pool never depleted under constant boost");

    // Depleted держится до полного восстановления (50/s × 20s), скорость = walk
    let energy = *app.world().get::<EnergyPool>(mech).unwrap();
    let state = *app.world().get::<KinematicState>(mech).unwrap();
    assert!(energy.is_depleted());
    assert!(
        (state.horizontal_velocity.length() - config.locomotion.walk_speed).abs() < 1e-3,
        "expected walk speed, got {}",
        state.horizontal_velocity.length()
    );

    let transform = app.world().get::<Transform>(mech).unwrap();
    assert!(transform.translation.z > 0.0);
}

/// Test: манекен прямо по курсу → soft lock, через lock_speed → hard lock
#[test]
fn test_sentry_hard_locks_dummy() {
    let mut app = create_mech_app(42);
    let config = MechConfig::default();

    let sentry = spawn_sentry(&mut app, Vec3::ZERO, &config);
    let dummy = spawn_dummy(&mut app, Vec3::new(0.0, 1.5, 60.0));

    run_ticks(&mut app, 10);
    let fire_control = *app.world().get::<FireControl>(sentry).unwrap();
    assert_eq!(fire_control.lock.current_target, Some(dummy));
    assert!(fire_control.lock.soft_locked);
    assert!(!fire_control.lock.hard_locked);

    // lock_speed 1.5s = 90 тиков, с запасом
    run_ticks(&mut app, 200);
    let fire_control = *app.world().get::<FireControl>(sentry).unwrap();
    assert_eq!(fire_control.lock.phase(), LockPhase::HardLock);
    assert_eq!(fire_control.lock.target_position, Vec3::new(0.0, 1.5, 60.0));
    assert_eq!(fire_control.origin, Vec3::new(0.0, 1.5, 0.0));

    // Hard lock → aim point = позиция цели
    assert_eq!(
        fire_control.aim_position(&config.fcs, 500.0),
        Vec3::new(0.0, 1.5, 60.0)
    );
}

/// Test: цель вне range / позади → захвата нет, aim по умолчанию вперёд
#[test]
fn test_sentry_ignores_out_of_range_and_behind() {
    let mut app = create_mech_app(42);
    let config = MechConfig::default();

    let sentry = spawn_sentry(&mut app, Vec3::ZERO, &config);
    spawn_dummy(&mut app, Vec3::new(0.0, 1.5, 400.0));
    spawn_dummy(&mut app, Vec3::new(0.0, 1.5, -50.0));

    run_ticks(&mut app, 60);
    let fire_control = *app.world().get::<FireControl>(sentry).unwrap();
    assert_eq!(fire_control.lock.phase(), LockPhase::NoTarget);

    let aim = fire_control.aim_position(&config.fcs, 500.0);
    assert!(aim.abs_diff_eq(Vec3::new(0.0, 1.5, 100.0), 1e-3));
}

/// Test: цель уехала из frustum → lock потерян, LockEvent::Lost
#[test]
fn test_lock_lost_when_target_leaves_frustum() {
    let mut app = create_mech_app(42);
    let config = MechConfig::default();

    let sentry = spawn_sentry(&mut app, Vec3::ZERO, &config);
    let dummy = spawn_dummy(&mut app, Vec3::new(0.0, 1.5, 60.0));

    run_ticks(&mut app, 10);
    assert!(app.world().get::<FireControl>(sentry).unwrap().lock.has_target());

    // Уносим манекен вбок (90° от взгляда)
    app.world_mut()
        .get_mut::<Transform>(dummy)
        .unwrap()
        .translation = Vec3::new(60.0, 1.5, 0.0);
    run_ticks(&mut app, 1);

    let fire_control = *app.world().get::<FireControl>(sentry).unwrap();
    assert_eq!(fire_control.lock, TargetLockState::default());

    let events = app.world().resource::<Events<LockEvent>>();
    let mut cursor = events.get_cursor();
    let lost = cursor
        .read(events)
        .any(|event| event.observer == sentry && event.transition == LockTransition::Lost(dummy));
    assert!(lost, "expected LockEvent::Lost");
}

/// Test: мехи не захватывают сами себя и не-Targetable мехов
#[test]
fn test_mechs_without_targetable_are_invisible() {
    let mut app = create_mech_app(42);
    let config = MechConfig::default();

    let sentry = spawn_sentry(&mut app, Vec3::ZERO, &config);
    spawn_sentry(&mut app, Vec3::new(0.0, 0.0, 30.0), &config);

    run_ticks(&mut app, 30);
    let fire_control = *app.world().get::<FireControl>(sentry).unwrap();
    assert_eq!(fire_control.lock.phase(), LockPhase::NoTarget);
}

/// Test: корпус поворачивается к facing, root Transform не вращается
#[test]
fn test_body_turns_towards_facing() {
    let mut app = create_mech_app(42);
    let config = MechConfig::default();

    let mech = spawn_mech_with(
        &mut app,
        Vec3::ZERO,
        &config,
        MechInput {
            facing: Some(Vec3::X),
            ..default()
        },
    );

    run_ticks(&mut app, 300);

    let body = app.world().get::<BodyOrientation>(mech).unwrap();
    assert!((body.rotation * Vec3::Z).abs_diff_eq(Vec3::X, 1e-3));

    let transform = app.world().get::<Transform>(mech).unwrap();
    assert_eq!(transform.rotation, Quat::IDENTITY);
}
