//! Mech Simulation Core
//!
//! ECS-симуляция тяжёлого меха на Bevy 0.16 (headless, FixedUpdate 60Hz)
//!
//! Подсистемы:
//! - energy: общий пул энергии (boost/thrust), hysteresis при истощении
//! - locomotion: drift, asymmetric acceleration, weight-scaled gravity/thrust
//! - orientation: визуальный поворот корпуса к facing
//! - fcs: сенсор, frustum detection, soft/hard lock, aim point
//! - input: player/AI источники `MechInput`
//!
//! Коллизии: Rapier (`KinematicCharacterController`) или плоский пол для тестов.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod config;
pub mod energy;
pub mod fcs;
pub mod input;
pub mod locomotion;
pub mod logger;
pub mod orientation;
pub mod physics;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::{ConfigError, EnergyConfig, FcsConfig, LocomotionConfig, MechConfig};
pub use energy::EnergyEvent;
pub use fcs::{FrustumWireframe, LockEvent, LockTransition, SpatialQuery, TargetIndex};
pub use input::{InputSource, PlayerBrain, PlayerControls, WanderBrain};
pub use locomotion::{EnergySource, LocomotionStep, MoveIntegrator};
pub use physics::{
    spawn_environment_block, spawn_mech, spawn_physics_mech, spawn_target_dummy, GroundPlane,
};

/// Главный plugin симуляции
///
/// Порядок выполнения в FixedUpdate (один tick):
/// 1. input: brains пишут MechInput + AimMaster
/// 2. track_sensors: сенсор FCS догоняет aim master
/// 3. orient_bodies: корпус поворачивается к facing
/// 4. apply_locomotion: displacement → integrator (energy drain)
/// 5. regenerate_energy: regen / hysteresis
/// 6. acquire_targets: detection от новой позиции + lock state machine
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .init_resource::<GroundPlane>()
            .add_event::<EnergyEvent>()
            .add_event::<LockEvent>()
            .register_type::<EnergyPool>()
            .register_type::<KinematicState>()
            .register_type::<MechInput>()
            .register_type::<BodyOrientation>()
            .register_type::<FireControl>()
            .register_type::<AimMaster>()
            .register_type::<PlayerControls>()
            .register_type::<PlayerBrain>();

        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: Input (player и AI не пересекаются)
                (input::drive_player_brains, input::drive_wander_brains),
                // Фаза 2: Сенсор ДО движения
                fcs::track_sensors,
                // Фаза 3: Корпус + движение
                orientation::orient_bodies,
                locomotion::apply_locomotion,
                // Фаза 4: Энергия после drain
                energy::regenerate_energy,
                // Фаза 5: Detection от новой позиции
                fcs::acquire_targets,
            )
                .chain(), // Последовательное выполнение для детерминизма
        );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// MinimalPlugins + SimulationPlugin, без Rapier: мехи двигаются по `GroundPlane`.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins((MinimalPlugins, SimulationPlugin))
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
