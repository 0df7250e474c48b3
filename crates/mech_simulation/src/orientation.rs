//! Orientation controller: плавный поворот корпуса к facing
//!
//! Тяжёлый мех не разворачивается мгновенно: slerp с turn_speed.
//! Root Transform НЕ вращается: направление движения считается из facing,
//! а не из текущего поворота корпуса.

use bevy::prelude::*;
use crate::components::{BodyOrientation, MechInput};
use crate::config::LocomotionConfig;
use crate::locomotion::flatten_direction;

/// Rotation, у которой local +Z смотрит в `forward`, а +Y: вверх
///
/// None если направление нулевое или вертикальное.
pub fn look_rotation(forward: Vec3) -> Option<Quat> {
    let forward = forward.try_normalize()?;
    let right = Vec3::Y.cross(forward).try_normalize()?;
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize())
}

/// Один шаг поворота корпуса
///
/// Нулевой facing → ориентация не меняется.
pub fn turn_towards(current: Quat, facing: Vec3, turn_speed: f32, delta_time: f32) -> Quat {
    let Some(target) = flatten_direction(facing).and_then(look_rotation) else {
        return current;
    };

    let t = (turn_speed * delta_time).clamp(0.0, 1.0);
    current.slerp(target, t).normalize()
}

/// Система: поворот визуального корпуса всех мехов
pub fn orient_bodies(
    mut query: Query<(&LocomotionConfig, &MechInput, &mut BodyOrientation)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (config, input, mut body) in query.iter_mut() {
        let Some(facing) = input.facing else {
            continue;
        };
        body.rotation = turn_towards(body.rotation, facing, config.turn_speed, delta);
    }
}
