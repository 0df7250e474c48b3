//! Locomotion systems (FixedUpdate)

use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier3d::prelude::{KinematicCharacterController, KinematicCharacterControllerOutput};

use crate::components::{EnergyPool, KinematicState, Mech, MechInput};
use crate::config::LocomotionConfig;
use crate::logger;
use crate::physics::{CharacterControllerIntegrator, GroundPlane, GroundPlaneIntegrator};

/// Система: locomotion tick для всех мехов
///
/// Integrator выбирается по наличию компонентов:
/// - `KinematicCharacterController` → Rapier разрешает коллизии (grounded с задержкой в 1 tick)
/// - иначе → headless ground plane (тесты, сервер без физики)
pub fn apply_locomotion(
    mut query: Query<
        (
            Entity,
            &LocomotionConfig,
            &MechInput,
            &mut KinematicState,
            &mut EnergyPool,
            &mut Transform,
            Option<&mut KinematicCharacterController>,
            Option<&KinematicCharacterControllerOutput>,
        ),
        With<Mech>,
    >,
    ground: Res<GroundPlane>,
    time: Res<Time<Fixed>>,
    mut missing_facing: Local<HashSet<Entity>>,
) {
    let delta = time.delta_secs();

    for (entity, config, input, mut state, mut energy, mut transform, controller, output) in
        query.iter_mut()
    {
        // Facing не задан: базис остаётся прежним (предупреждаем один раз)
        if input.facing.is_none() {
            if missing_facing.insert(entity) {
                logger::log_warning(&format!(
                    "Mech {:?}: no facing input, keeping last heading {:?}",
                    entity, state.heading
                ));
            }
        } else {
            missing_facing.remove(&entity);
        }

        let step = match controller {
            Some(mut controller) => {
                let mut integrator = CharacterControllerIntegrator {
                    controller: &mut *controller,
                    last_output: output,
                };
                super::tick(config, &mut *state, &mut *energy, input, &mut integrator, delta)
            }
            None => {
                let mut integrator = GroundPlaneIntegrator {
                    translation: &mut transform.translation,
                    ground_height: ground.height,
                };
                super::tick(config, &mut *state, &mut *energy, input, &mut integrator, delta)
            }
        };

        if step.drained && energy.current <= 0.0 {
            logger::log(&format!(
                "Mech {:?}: boost drained pool ({:.1}/{:.1})",
                entity, energy.current, energy.max
            ));
        }
    }
}
