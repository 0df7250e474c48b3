//! Detection: frustum filter + выбор ближайшей цели

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;

use super::{Candidate, LockTransition, SpatialQuery};
use crate::components::FireControl;
use crate::config::FcsConfig;

/// Допуск на границе frustum (градусы): граница включительная
pub const FRUSTUM_EDGE_TOLERANCE: f32 = 1e-4;

/// Позиция в local space сенсора (+Z вперёд)
pub fn local_position(sensor_rotation: Quat, origin: Vec3, world_position: Vec3) -> Vec3 {
    sensor_rotation.inverse() * (world_position - origin)
}

/// Горизонтальный и вертикальный углы (градусы) до точки в local space
///
/// None если точка позади сенсора (z ≤ 0): atan2 даже не считаем.
pub fn frustum_angles(local: Vec3) -> Option<(f32, f32)> {
    if local.z <= 0.0 {
        return None;
    }

    let angle_x = local.x.atan2(local.z).abs().to_degrees();
    let angle_y = local.y.atan2(local.z).abs().to_degrees();
    Some((angle_x, angle_y))
}

/// Попадает ли local точка в прямоугольный frustum `width × height` (градусы)
pub fn in_frustum(local: Vec3, width: f32, height: f32) -> bool {
    let Some((angle_x, angle_y)) = frustum_angles(local) else {
        return false;
    };

    angle_x <= width * 0.5 + FRUSTUM_EDGE_TOLERANCE
        && angle_y <= height * 0.5 + FRUSTUM_EDGE_TOLERANCE
}

/// Ближайшая (по local forward distance) цель внутри frustum
///
/// При равной дистанции побеждает первый кандидат. `observer` никогда не выбирается.
pub fn select_best_target(
    fire_control: &FireControl,
    width: f32,
    height: f32,
    candidates: &[Candidate],
    observer: Option<Entity>,
) -> Option<Candidate> {
    let mut best: Option<(Candidate, f32)> = None;

    for candidate in candidates {
        if Some(candidate.entity) == observer {
            continue;
        }

        let local = local_position(
            fire_control.sensor_rotation,
            fire_control.origin,
            candidate.position,
        );
        if !in_frustum(local, width, height) {
            continue;
        }

        let distance = local.z;
        if best.map_or(true, |(_, closest)| distance < closest) {
            best = Some((*candidate, distance));
        }
    }

    best.map(|(candidate, _)| candidate)
}

impl FireControl {
    /// Detection + lock update за один tick
    ///
    /// Пустой `target_layer` → кандидатов нет (захват сбрасывается).
    pub fn acquire(
        &mut self,
        config: &FcsConfig,
        spatial: &impl SpatialQuery,
        observer: Option<Entity>,
        delta_time: f32,
    ) -> Option<LockTransition> {
        let layers = config.target_group();
        let candidates = if layers.is_empty() {
            Vec::new()
        } else {
            spatial.overlap_sphere(self.origin, config.range, layers)
        };

        let best = select_best_target(self, config.width, config.height, &candidates, observer);
        self.lock.update(best, config.lock_speed, delta_time)
    }
}

/// Снимок всех Targetable на текущий tick
///
/// Отсортирован по Entity index: порядок не зависит от archetype layout.
#[derive(Debug, Clone, Default)]
pub struct TargetIndex {
    entries: Vec<(Candidate, Group)>,
}

impl TargetIndex {
    pub fn new(mut entries: Vec<(Candidate, Group)>) -> Self {
        entries.sort_by_key(|(candidate, _)| candidate.entity.index());
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SpatialQuery for TargetIndex {
    fn overlap_sphere(&self, origin: Vec3, radius: f32, layers: Group) -> Vec<Candidate> {
        let radius_sq = radius * radius;

        self.entries
            .iter()
            .filter(|(_, groups)| groups.intersects(layers))
            .filter(|(candidate, _)| candidate.position.distance_squared(origin) <= radius_sq)
            .map(|(candidate, _)| *candidate)
            .collect()
    }
}
