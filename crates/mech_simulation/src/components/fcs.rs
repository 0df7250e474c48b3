//! FCS компоненты: состояние сенсора, lock state, aim master, цели

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;

/// Состояние захвата цели
///
/// Инварианты:
/// - hard_locked ⇒ soft_locked
/// - lock_timer сбрасывается в 0 при смене цели
/// - hard_locked только после lock_timer ≥ lock_speed с той же целью
///
/// `current_target`: handle (Entity), НЕ владение: захват/потеря цели
/// не влияет на lifetime entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct TargetLockState {
    pub current_target: Option<Entity>,
    pub soft_locked: bool,
    pub hard_locked: bool,
    pub lock_timer: f32,
    /// Позиция цели на момент последнего detection
    pub target_position: Vec3,
}

impl TargetLockState {
    pub fn has_target(&self) -> bool {
        self.current_target.is_some()
    }

    pub fn phase(&self) -> LockPhase {
        match (self.current_target, self.hard_locked) {
            (None, _) => LockPhase::NoTarget,
            (Some(_), false) => LockPhase::SoftLock,
            (Some(_), true) => LockPhase::HardLock,
        }
    }
}

/// Фаза state machine захвата
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum LockPhase {
    NoTarget,
    SoftLock,
    HardLock,
}

/// Fire control system меха
///
/// Сенсор имеет собственную ориентацию (догоняет aim master),
/// local +Z = вперёд сенсора.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FireControl {
    pub sensor_rotation: Quat,
    /// World-space позиция сенсора (root + mount offset)
    pub origin: Vec3,
    pub lock: TargetLockState,
}

impl Default for FireControl {
    fn default() -> Self {
        Self {
            sensor_rotation: Quat::IDENTITY,
            origin: Vec3::ZERO,
            lock: TargetLockState::default(),
        }
    }
}

impl FireControl {
    pub fn sensor_forward(&self) -> Vec3 {
        self.sensor_rotation * Vec3::Z
    }
}

/// Ориентация, за которой следует сенсор (камера игрока / голова AI)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AimMaster {
    pub rotation: Option<Quat>,
}

/// Entity, которую FCS может обнаружить
///
/// `layers` сравнивается с `FcsConfig::target_layer`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Targetable {
    pub layers: Group,
}

impl Default for Targetable {
    fn default() -> Self {
        Self {
            layers: crate::physics::collision::TARGET_GROUP,
        }
    }
}
