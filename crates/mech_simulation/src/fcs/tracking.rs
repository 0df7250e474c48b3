//! Sensor tracking: собственная ориентация сенсора догоняет aim master

use bevy::prelude::*;
use crate::components::FireControl;

/// Допуск sticky порога (градусы): разница ровно в порог всегда snap
pub const STICKY_TOLERANCE: f32 = 1e-4;

/// Как сенсор сдвинулся в этом tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingMode {
    /// Разница ≤ sticky threshold: точное совпадение
    Snapped,
    /// Slerp к aim master
    Chasing,
}

impl FireControl {
    /// Угол (градусы) между сенсором и aim master
    ///
    /// atan2 по относительному кватерниону: точно и около нуля
    /// (`Quat::angle_between` идёт через приближённый acos).
    pub fn angle_to(&self, aim_master: Quat) -> f32 {
        let relative = self.sensor_rotation.inverse() * aim_master;
        let half_angle = relative.xyz().length().atan2(relative.w.abs());
        (2.0 * half_angle).to_degrees()
    }

    /// Один шаг трекинга
    ///
    /// Sticky center: в пределах `sticky_threshold` сенсор встаёт ровно на aim master
    /// за один tick, без интерполяции.
    pub fn track(
        &mut self,
        aim_master: Quat,
        sticky_threshold: f32,
        turn_rate: f32,
        delta_time: f32,
    ) -> TrackingMode {
        if self.angle_to(aim_master) <= sticky_threshold + STICKY_TOLERANCE {
            self.sensor_rotation = aim_master;
            TrackingMode::Snapped
        } else {
            let t = (turn_rate * delta_time).clamp(0.0, 1.0);
            self.sensor_rotation = self.sensor_rotation.slerp(aim_master, t).normalize();
            TrackingMode::Chasing
        }
    }
}
