//! Базовый компонент меха

use bevy::prelude::*;
use crate::components::{BodyOrientation, EnergyPool, KinematicState, MechInput};
use crate::config::LocomotionConfig;

/// Мех (игрок или AI)
///
/// Required Components дают defaults; `spawn_mech` перезаписывает их
/// значениями из `MechConfig`.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, EnergyPool, KinematicState, MechInput, BodyOrientation, LocomotionConfig)]
pub struct Mech;
