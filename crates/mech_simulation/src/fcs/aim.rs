//! Aim query для внешней weapon логики

use bevy::prelude::*;

use crate::components::FireControl;
use crate::config::FcsConfig;

/// Extension point: упреждение по скорости цели
///
/// Используется только при hard lock и projectile_speed > 0.
pub trait LeadPredictor {
    fn lead_position(&self, shooter: Vec3, target: Vec3, projectile_speed: f32) -> Vec3;
}

/// Без упреждения: сырая позиция цели
#[derive(Debug, Clone, Copy, Default)]
pub struct RawTargetPosition;

impl LeadPredictor for RawTargetPosition {
    fn lead_position(&self, _shooter: Vec3, target: Vec3, _projectile_speed: f32) -> Vec3 {
        target
    }
}

impl FireControl {
    /// Куда целиться
    ///
    /// - нет цели → точка прямо по курсу сенсора на `default_aim_distance`
    /// - цель есть → позиция цели (упреждение пока не реализовано)
    pub fn aim_position(&self, config: &FcsConfig, projectile_speed: f32) -> Vec3 {
        self.aim_position_with(config, projectile_speed, &RawTargetPosition)
    }

    pub fn aim_position_with(
        &self,
        config: &FcsConfig,
        projectile_speed: f32,
        predictor: &dyn LeadPredictor,
    ) -> Vec3 {
        if self.lock.current_target.is_none() {
            return self.origin + self.sensor_forward() * config.default_aim_distance;
        }

        if self.lock.hard_locked && projectile_speed > 0.0 {
            predictor.lead_position(self.origin, self.lock.target_position, projectile_speed)
        } else {
            self.lock.target_position
        }
    }
}
