//! Locomotion: intent + facing → displacement
//!
//! Архитектура:
//! - Drift: горизонтальная скорость догоняет target velocity с ограниченным ускорением
//! - Asymmetric acceleration: walk/boost × accelerate/decelerate
//! - Вертикаль: ground stick / jump / thrust (energy) / weight-scaled gravity
//! - Energy drain: один consume на tick, даже если boost и thrust активны одновременно
//! - Коллизии НЕ здесь: displacement уходит в `MoveIntegrator`

use bevy::prelude::*;
use crate::components::{EnergyPool, KinematicState, MechInput};
use crate::config::LocomotionConfig;

pub mod systems;


pub use systems::apply_locomotion;

/// Земная гравитация (m/s²)
pub const GRAVITY: f32 = 9.81;
/// Вес, при котором gravity/thrust не масштабируются
pub const REFERENCE_WEIGHT: f32 = 5000.0;
/// Падение тяжёлого меха быстрее реального
pub const GRAVITY_MULTIPLIER: f32 = 2.0;
/// Сколько тяги съедает каждый кг веса
pub const THRUST_WEIGHT_PENALTY: f32 = 0.005;
/// Intent меньше этого считается нулевым (deceleration)
pub const INTENT_DEADZONE: f32 = 1e-4;

/// Источник энергии для boost/flight
pub trait EnergySource {
    fn is_depleted(&self) -> bool;
    fn can_consume(&self) -> bool;
    fn consume(&mut self, amount: f32) -> bool;
}

impl EnergySource for EnergyPool {
    fn is_depleted(&self) -> bool {
        EnergyPool::is_depleted(self)
    }

    fn can_consume(&self) -> bool {
        EnergyPool::can_consume(self)
    }

    fn consume(&mut self, amount: f32) -> bool {
        EnergyPool::consume(self, amount)
    }
}

/// Исполнитель перемещения (коллизии: его ответственность)
///
/// Возвращает новый grounded флаг.
pub trait MoveIntegrator {
    fn move_by(&mut self, displacement: Vec3) -> bool;
}

/// Результат одного locomotion шага
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionStep {
    pub displacement: Vec3,
    pub horizontal_boost: bool,
    pub vertical_thrust: bool,
    /// Был ли вызван consume в этом tick
    pub drained: bool,
}

/// Bounded move-towards: не проскакивает target
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_delta
    }
}

/// Убираем вертикаль из направления (мех не наклоняется)
pub fn flatten_direction(direction: Vec3) -> Option<Vec3> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    flat.try_normalize()
}

/// Upward thrust acceleration с учётом веса
pub fn thrust_acceleration(config: &LocomotionConfig) -> f32 {
    let raw = config.boost_vertical_speed * 2.0 - config.total_weight * THRUST_WEIGHT_PENALTY;
    raw.max(config.minimum_lift)
}

/// Гравитация с учётом веса (тяжёлые мехи падают быстрее)
pub fn gravity_acceleration(config: &LocomotionConfig) -> f32 {
    GRAVITY * (config.total_weight / REFERENCE_WEIGHT) * GRAVITY_MULTIPLIER
}

/// Один шаг locomotion (без коллизий)
///
/// Мутирует `state` (скорости, heading) и `energy` (не более одного consume).
pub fn step(
    config: &LocomotionConfig,
    state: &mut KinematicState,
    energy: &mut impl EnergySource,
    input: &MechInput,
    delta_time: f32,
) -> LocomotionStep {
    // 1. Local basis из facing; без facing: последний валидный heading
    if let Some(forward) = input.facing.and_then(flatten_direction) {
        state.heading = forward;
    }
    let forward = state.heading;
    let right = Vec3::Y.cross(forward);

    // 2. Target velocity
    let intent = input.move_intent;
    let has_intent = intent.length() > INTENT_DEADZONE;
    let boosting = input.boost && !energy.is_depleted();
    let speed = if boosting {
        config.boost_horizontal_speed
    } else {
        config.walk_speed
    };
    let direction = (forward * intent.y + right * intent.x).normalize_or_zero();
    let target = Vec2::new(direction.x, direction.z) * speed;

    // 3. Accel rate по intent magnitude (не по направлению скорости)
    let accel = match (boosting, has_intent) {
        (true, true) => config.boost_acceleration,
        (true, false) => config.boost_deceleration,
        (false, true) => config.walk_acceleration,
        (false, false) => config.walk_deceleration,
    };

    // 4. Drift
    state.horizontal_velocity = move_towards(state.horizontal_velocity, target, accel * delta_time);

    // 5. Вертикаль
    let mut vertical_thrust = false;
    if state.grounded {
        if !state.is_rising() {
            state.vertical_velocity = config.ground_stick_velocity;
        }
        if input.jump {
            // Прыжок с земли бесплатный
            state.vertical_velocity = config.jump_force;
        }
    } else if input.jump && energy.can_consume() {
        state.vertical_velocity += thrust_acceleration(config) * delta_time;
        state.vertical_velocity = state.vertical_velocity.min(config.boost_vertical_speed);
        vertical_thrust = true;
    } else {
        state.vertical_velocity -= gravity_acceleration(config) * delta_time;
    }

    // 6. Unified drain: один consume на tick
    let horizontal_boost = boosting && has_intent;
    let mut drained = false;
    if horizontal_boost || vertical_thrust {
        energy.consume(config.boost_energy_drain * delta_time);
        drained = true;
    }

    // 7. Displacement
    LocomotionStep {
        displacement: state.velocity() * delta_time,
        horizontal_boost,
        vertical_thrust,
        drained,
    }
}

/// Полный tick: step + move integrator → grounded
pub fn tick(
    config: &LocomotionConfig,
    state: &mut KinematicState,
    energy: &mut impl EnergySource,
    input: &MechInput,
    integrator: &mut impl MoveIntegrator,
    delta_time: f32,
) -> LocomotionStep {
    let result = step(config, state, energy, input, delta_time);
    state.grounded = integrator.move_by(result.displacement);
    result
}
