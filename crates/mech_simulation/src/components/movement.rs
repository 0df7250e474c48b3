//! Movement компоненты: intent на tick, кинематика, визуальная ориентация корпуса

use bevy::prelude::*;

/// Входные данные на текущий tick (пишет player brain или AI)
///
/// `move_intent.x` = strafe, `move_intent.y` = forward, оба в [-1, 1].
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MechInput {
    pub move_intent: Vec2,
    /// Куда мех хочет смотреть (None = input не задан)
    pub facing: Option<Vec3>,
    pub boost: bool,
    pub jump: bool,
}

/// Кинематика меха (momentum)
///
/// Владелец: locomotion. Остальные системы только читают.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct KinematicState {
    /// Горизонтальная скорость в плоскости земли (x, z)
    pub horizontal_velocity: Vec2,
    pub vertical_velocity: f32,
    pub grounded: bool,
    /// Последний валидный flattened heading (fallback когда facing не задан)
    pub heading: Vec3,
}

impl Default for KinematicState {
    fn default() -> Self {
        Self {
            horizontal_velocity: Vec2::ZERO,
            vertical_velocity: 0.0,
            grounded: true,
            heading: Vec3::Z,
        }
    }
}

impl KinematicState {
    /// Полная скорость в world space
    pub fn velocity(&self) -> Vec3 {
        Vec3::new(
            self.horizontal_velocity.x,
            self.vertical_velocity,
            self.horizontal_velocity.y,
        )
    }

    pub fn is_rising(&self) -> bool {
        self.vertical_velocity > 0.0
    }
}

/// Визуальная ориентация корпуса
///
/// Отвязана от root Transform: root (коллизии/движение) не вращается,
/// поворачивается только визуальная модель.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BodyOrientation {
    pub rotation: Quat,
}

impl Default for BodyOrientation {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
        }
    }
}
