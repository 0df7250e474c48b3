//! Input sources: кто заполняет `MechInput` и `AimMaster`
//!
//! Архитектура:
//! - `InputSource` trait: один sample на FixedUpdate tick
//! - `PlayerBrain`: mouse look + WASD из `PlayerControls` (пишет device layer)
//! - `WanderBrain`: seeded AI, бродит по случайным направлениям
//!
//! Locomotion/FCS не знают, кто источник. Mech без brain просто стоит
//! с тем `MechInput`, который ему выставили снаружи.

use bevy::prelude::*;

use crate::components::{AimMaster, MechInput};

pub mod player;
pub mod wander;

#[cfg(test)]
mod input_tests;

pub use player::{PlayerBrain, PlayerControls};
pub use wander::WanderBrain;

/// Источник намерений меха
pub trait InputSource {
    /// Намерения на этот tick
    fn sample(&mut self, delta_time: f32) -> MechInput;

    /// Ориентация для сенсора FCS (None → сенсор стоит)
    fn aim_master(&self) -> Option<Quat>;
}

/// Один sample: `MechInput` + aim master
pub fn apply_input_source(
    source: &mut impl InputSource,
    input: &mut MechInput,
    aim_master: Option<&mut AimMaster>,
    delta_time: f32,
) {
    *input = source.sample(delta_time);
    if let Some(aim_master) = aim_master {
        aim_master.rotation = source.aim_master();
    }
}

/// Система: PlayerControls → PlayerBrain → MechInput
///
/// Look delta из `PlayerControls` потребляется (обнуляется): при нескольких
/// FixedUpdate за кадр мышь не применяется дважды.
pub fn drive_player_brains(
    mut query: Query<(
        &mut PlayerBrain,
        &mut PlayerControls,
        &mut MechInput,
        Option<&mut AimMaster>,
    )>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut brain, mut controls, mut input, aim_master) in query.iter_mut() {
        brain.feed(&mut controls);
        apply_input_source(
            &mut *brain,
            &mut *input,
            aim_master.map(|aim| aim.into_inner()),
            delta,
        );
    }
}

/// Система: WanderBrain → MechInput (AI мехи)
pub fn drive_wander_brains(
    mut query: Query<(&mut WanderBrain, &mut MechInput, Option<&mut AimMaster>), Without<PlayerBrain>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut brain, mut input, aim_master) in query.iter_mut() {
        apply_input_source(
            &mut *brain,
            &mut *input,
            aim_master.map(|aim| aim.into_inner()),
            delta,
        );
    }
}
