//! Debug snapshot геометрии frustum
//!
//! Только данные: линии рисует хост (gizmos или debug overlay).

use bevy::prelude::*;

use crate::components::FireControl;
use crate::config::FcsConfig;

/// Пирамида frustum: вершина в сенсоре, 4 угла на дальности range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumWireframe {
    pub origin: Vec3,
    pub top_left: Vec3,
    pub top_right: Vec3,
    pub bottom_right: Vec3,
    pub bottom_left: Vec3,
}

impl FrustumWireframe {
    pub fn from_sensor(fire_control: &FireControl, config: &FcsConfig) -> Self {
        let half_width = (config.width * 0.5).to_radians();
        let half_height = (config.height * 0.5).to_radians();
        let origin = fire_control.origin;

        // Отрицательный pitch = вверх, отрицательный yaw = влево
        let corner = |yaw: f32, pitch: f32| {
            let offset = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
            origin + fire_control.sensor_rotation * offset * Vec3::Z * config.range
        };

        Self {
            origin,
            top_left: corner(-half_width, -half_height),
            top_right: corner(half_width, -half_height),
            bottom_right: corner(half_width, half_height),
            bottom_left: corner(-half_width, half_height),
        }
    }

    /// 8 рёбер: 4 луча от сенсора + прямоугольник основания
    pub fn edges(&self) -> [(Vec3, Vec3); 8] {
        [
            (self.origin, self.top_left),
            (self.origin, self.top_right),
            (self.origin, self.bottom_left),
            (self.origin, self.bottom_right),
            (self.top_left, self.top_right),
            (self.top_right, self.bottom_right),
            (self.bottom_right, self.bottom_left),
            (self.bottom_left, self.top_left),
        ]
    }
}

impl FireControl {
    /// Snapshot для debug отрисовки (вызывается по запросу, не каждый tick)
    pub fn frustum_wireframe(&self, config: &FcsConfig) -> FrustumWireframe {
        FrustumWireframe::from_sensor(self, config)
    }
}
