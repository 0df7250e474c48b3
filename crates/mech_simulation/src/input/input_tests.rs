//! Tests для input sources (player look, wander determinism)

use bevy::prelude::*;

use super::*;
use crate::components::AimMaster;

fn controls(move_axes: Vec2, look_delta: Vec2) -> PlayerControls {
    PlayerControls {
        move_axes,
        look_delta,
        ..default()
    }
}

#[test]
fn test_player_move_intent_normalized() {
    let mut brain = PlayerBrain::default();
    let mut raw = controls(Vec2::new(1.0, 1.0), Vec2::ZERO);

    brain.feed(&mut raw);
    let input = brain.sample(1.0 / 60.0);

    assert!((input.move_intent.length() - 1.0).abs() < 1e-5);
    assert!(input.facing.is_some());
}

#[test]
fn test_player_idle_has_zero_intent() {
    let mut brain = PlayerBrain::default();
    let mut raw = PlayerControls::default();

    brain.feed(&mut raw);
    let input = brain.sample(1.0 / 60.0);

    assert_eq!(input.move_intent, Vec2::ZERO);
    assert!(!input.boost && !input.jump);
}

#[test]
fn test_player_yaw_turns_facing() {
    let mut brain = PlayerBrain::default();
    // 45 × sensitivity 2 = 90° вправо
    let mut raw = controls(Vec2::ZERO, Vec2::new(45.0, 0.0));

    brain.feed(&mut raw);
    let input = brain.sample(1.0 / 60.0);

    assert_eq!(brain.yaw, 90.0);
    let facing = input.facing.unwrap_or(Vec3::ZERO);
    assert!(facing.abs_diff_eq(Vec3::X, 1e-5), "facing = {facing:?}");
}

#[test]
fn test_player_pitch_clamped() {
    let mut brain = PlayerBrain::default();

    // Мышь вверх → pitch отрицательный (смотрим вверх), но не дальше лимита
    let mut raw = controls(Vec2::ZERO, Vec2::new(0.0, 100.0));
    brain.feed(&mut raw);
    brain.sample(1.0 / 60.0);
    assert_eq!(brain.pitch, -60.0);

    let mut raw = controls(Vec2::ZERO, Vec2::new(0.0, -500.0));
    brain.feed(&mut raw);
    brain.sample(1.0 / 60.0);
    assert_eq!(brain.pitch, 60.0);
}

#[test]
fn test_player_pitch_does_not_tilt_facing() {
    let mut brain = PlayerBrain::default();
    let mut raw = controls(Vec2::ZERO, Vec2::new(0.0, 30.0));

    brain.feed(&mut raw);
    let input = brain.sample(1.0 / 60.0);

    assert_eq!(input.facing, Some(Vec3::Z));

    // Aim master смотрит вверх
    let aim = brain.aim_master().unwrap_or(Quat::IDENTITY);
    assert!((aim * Vec3::Z).y > 0.5);
}

#[test]
fn test_look_delta_consumed_once() {
    let mut brain = PlayerBrain::default();
    let mut raw = controls(Vec2::ZERO, Vec2::new(5.0, 0.0));

    brain.feed(&mut raw);
    assert_eq!(raw.look_delta, Vec2::ZERO);
    brain.sample(1.0 / 60.0);

    // Второй FixedUpdate в том же кадре: delta уже потрачена
    brain.feed(&mut raw);
    brain.sample(1.0 / 60.0);

    assert_eq!(brain.yaw, 10.0);
}

#[test]
fn test_apply_input_source_writes_aim_master() {
    let mut brain = PlayerBrain::with_yaw(-90.0);
    let mut input = MechInput::default();
    let mut aim = AimMaster::default();

    apply_input_source(&mut brain, &mut input, Some(&mut aim), 1.0 / 60.0);

    let forward = aim.rotation.map(|rotation| rotation * Vec3::Z);
    assert!(forward.is_some_and(|f| f.abs_diff_eq(Vec3::NEG_X, 1e-5)));
    assert!(input.facing.is_some_and(|f| f.abs_diff_eq(Vec3::NEG_X, 1e-5)));
}

#[test]
fn test_wander_is_deterministic_per_seed() {
    let mut a = WanderBrain::new(7);
    let mut b = WanderBrain::new(7);

    for _ in 0..600 {
        assert_eq!(a.sample(1.0 / 60.0), b.sample(1.0 / 60.0));
    }
}

#[test]
fn test_wander_changes_heading_on_interval() {
    let mut brain = WanderBrain::new(3);
    brain.decision_interval = 0.5;

    let first = brain.sample(0.25);
    let heading = brain.heading();
    assert_eq!(first.facing, Some(heading));
    assert!((heading.length() - 1.0).abs() < 1e-5);
    assert_eq!(heading.y, 0.0);

    // Внутри интервала решение не меняется
    let second = brain.sample(0.25 - 1e-3);
    assert_eq!(second, first);

    // Интервал истёк → новое решение (heading почти наверняка другой)
    let mut changed = false;
    for _ in 0..8 {
        brain.sample(0.5);
        changed |= brain.heading() != heading;
    }
    assert!(changed);
}

#[test]
fn test_wander_aim_follows_heading() {
    let mut brain = WanderBrain::new(11);
    brain.sample(1.0 / 60.0);

    let aim = brain.aim_master().unwrap_or(Quat::IDENTITY);
    assert!((aim * Vec3::Z).abs_diff_eq(brain.heading(), 1e-4));
}

#[test]
fn test_wander_seeds_from_world_rng() {
    let mut world_a = crate::DeterministicRng::new(42);
    let mut world_b = crate::DeterministicRng::new(42);

    let mut a = WanderBrain::from_world_rng(&mut world_a);
    let mut b = WanderBrain::from_world_rng(&mut world_b);
    assert_eq!(a.sample(0.1), b.sample(0.1));
}
