//! Move integrators + spawn helpers для мехов
//!
//! Архитектура:
//! - Locomotion считает displacement сам (не используем Rapier forces)
//! - Rapier `KinematicCharacterController` делает capsule sweep + ground detection
//! - Headless режим: ground plane без Rapier (тесты, детерминизм)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{AimMaster, EnergyPool, FireControl, KinematicState, Mech, Targetable};
use crate::config::MechConfig;
use crate::locomotion::MoveIntegrator;

/// Высота плоского пола для headless интеграции
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GroundPlane {
    pub height: f32,
}

/// Headless integrator: position += displacement, пол на `ground_height`
///
/// Grounded если после шага позиция Y на уровне пола или ниже.
pub struct GroundPlaneIntegrator<'a> {
    pub translation: &'a mut Vec3,
    pub ground_height: f32,
}

impl MoveIntegrator for GroundPlaneIntegrator<'_> {
    fn move_by(&mut self, displacement: Vec3) -> bool {
        *self.translation += displacement;

        if self.translation.y <= self.ground_height {
            self.translation.y = self.ground_height;
            true
        } else {
            false
        }
    }
}

/// Rapier integrator: displacement → `KinematicCharacterController::translation`
///
/// Rapier разрешает коллизии в своём step, поэтому grounded берётся из
/// `KinematicCharacterControllerOutput` предыдущего step.
///
/// Хост подключает `RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule()`,
/// тогда step идёт после каждого tick. Если Rapier остаётся в `PostUpdate`, несколько
/// tick за кадр складывают displacement до одного step (и видят один и тот же output).
pub struct CharacterControllerIntegrator<'a> {
    pub controller: &'a mut KinematicCharacterController,
    pub last_output: Option<&'a KinematicCharacterControllerOutput>,
}

impl MoveIntegrator for CharacterControllerIntegrator<'_> {
    fn move_by(&mut self, displacement: Vec3) -> bool {
        // Rapier обнуляет translation после step; всё, что не обработано, суммируем
        let pending = self.controller.translation.unwrap_or(Vec3::ZERO);
        self.controller.translation = Some(pending + displacement);
        self.last_output.map(|output| output.grounded).unwrap_or(false)
    }
}

/// Capsule меха: половина высоты цилиндра и радиус (метры)
pub const MECH_CAPSULE_HALF_HEIGHT: f32 = 1.5;
pub const MECH_CAPSULE_RADIUS: f32 = 1.2;

/// Spawn helper: мех без физики (headless)
///
/// Все компоненты берут значения из `config`. FCS включён всегда.
pub fn spawn_mech(commands: &mut Commands, position: Vec3, config: &MechConfig) -> Entity {
    commands
        .spawn((
            Mech,
            Transform::from_translation(position),
            EnergyPool::new(&config.energy),
            config.locomotion,
            KinematicState::default(),
            config.fcs,
            FireControl {
                origin: position + config.fcs.mount_offset(),
                ..default()
            },
            AimMaster::default(),
        ))
        .id()
}

/// Spawn helper: мех с Rapier character controller
///
/// Дополнительно к `spawn_mech`:
/// - RigidBody::KinematicPositionBased + capsule collider
/// - KinematicCharacterController (snap to ground, autostep off)
/// - Collision groups меха (сам является целью)
pub fn spawn_physics_mech(commands: &mut Commands, position: Vec3, config: &MechConfig) -> Entity {
    let entity = spawn_mech(commands, position, config);

    commands.entity(entity).insert((
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(MECH_CAPSULE_HALF_HEIGHT, MECH_CAPSULE_RADIUS),
        KinematicCharacterController {
            snap_to_ground: Some(CharacterLength::Absolute(0.5)),
            ..default()
        },
        super::collision::mech_groups(),
        Targetable::default(),
    ));

    entity
}

/// Spawn helper: неподвижная цель (дрон/мишень) для FCS
pub fn spawn_target_dummy(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((Transform::from_translation(position), Targetable::default()))
        .id()
}

/// Spawn helper: статичный блок окружения (пол, стена, укрытие)
///
/// Только коллизии с мехами: FCS его не видит.
pub fn spawn_environment_block(commands: &mut Commands, position: Vec3, half_extents: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            super::collision::environment_groups(),
        ))
        .id()
}
