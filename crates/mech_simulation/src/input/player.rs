//! Player input: mouse look + movement axes

use bevy::prelude::*;

use super::InputSource;
use crate::components::MechInput;

/// Сырое состояние устройств (пишет device layer каждый кадр)
///
/// `move_axes`: x = strafe (right +), y = forward (+).
/// `look_delta`: x = mouse right (+), y = mouse up (+), накапливается до sample.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerControls {
    pub move_axes: Vec2,
    pub look_delta: Vec2,
    pub boost: bool,
    pub jump: bool,
}

/// Player-controlled мех: камера (yaw/pitch) = aim master,
/// yaw камеры = facing корпуса.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(PlayerControls)]
pub struct PlayerBrain {
    /// Градусы на единицу look delta
    pub sensitivity: f32,
    /// Ограничение pitch (градусы), камера не переворачивается
    pub pitch_limit: f32,
    /// Градусы, + = вправо
    pub yaw: f32,
    /// Градусы, − = вверх
    pub pitch: f32,
    pending: PlayerControls,
}

impl Default for PlayerBrain {
    fn default() -> Self {
        Self {
            sensitivity: 2.0,
            pitch_limit: 60.0,
            yaw: 0.0,
            pitch: 0.0,
            pending: PlayerControls::default(),
        }
    }
}

impl PlayerBrain {
    /// Стартовый yaw (градусы), например из spawn heading
    pub fn with_yaw(yaw: f32) -> Self {
        Self {
            yaw,
            ..default()
        }
    }

    /// Забрать состояние устройств; look delta обнуляется в источнике
    pub fn feed(&mut self, controls: &mut PlayerControls) {
        self.pending.move_axes = controls.move_axes;
        self.pending.boost = controls.boost;
        self.pending.jump = controls.jump;
        self.pending.look_delta += controls.look_delta;
        controls.look_delta = Vec2::ZERO;
    }

    /// Направление корпуса: yaw камеры, без pitch
    pub fn facing(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw.to_radians()) * Vec3::Z
    }

    fn apply_look(&mut self, look_delta: Vec2) {
        self.yaw += look_delta.x * self.sensitivity;
        self.pitch = (self.pitch - look_delta.y * self.sensitivity)
            .clamp(-self.pitch_limit, self.pitch_limit);
    }
}

impl InputSource for PlayerBrain {
    fn sample(&mut self, _delta_time: f32) -> MechInput {
        let look_delta = std::mem::take(&mut self.pending.look_delta);
        self.apply_look(look_delta);

        MechInput {
            move_intent: self.pending.move_axes.normalize_or_zero(),
            facing: Some(self.facing()),
            boost: self.pending.boost,
            jump: self.pending.jump,
        }
    }

    fn aim_master(&self) -> Option<Quat> {
        Some(Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            0.0,
        ))
    }
}
