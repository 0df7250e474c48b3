//! FCS (fire control system): обнаружение, трекинг и захват целей
//!
//! Pipeline на tick:
//! 1. tracking: сенсор догоняет aim master (sticky snap в пределах порога)
//! 2. detection: overlap sphere → local space сенсора → прямоугольный frustum
//! 3. lock: state machine NoTarget → SoftLock → HardLock
//!
//! Наружу: `TargetLockState`, `FireControl::aim_position`, `LockEvent`,
//! `FrustumWireframe` (debug snapshot, рисует хост).

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;

pub mod aim;
pub mod detection;
pub mod lock;
pub mod systems;
pub mod tracking;
pub mod wireframe;


// Re-export основных типов
pub use aim::{LeadPredictor, RawTargetPosition};
pub use detection::{frustum_angles, in_frustum, select_best_target, TargetIndex};
pub use lock::{LockTransition, LOCK_TIMER_TOLERANCE};
pub use systems::{acquire_targets, track_sensors};
pub use tracking::{TrackingMode, STICKY_TOLERANCE};
pub use wireframe::FrustumWireframe;

/// Кандидат из spatial query: handle + world позиция
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub position: Vec3,
}

/// Spatial query collaborator (overlap sphere по слою)
///
/// Порядок результата должен быть детерминированным для одинакового мира.
pub trait SpatialQuery {
    fn overlap_sphere(&self, origin: Vec3, radius: f32, layers: Group) -> Vec<Candidate>;
}

/// Event: смена состояния захвата у меха
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LockEvent {
    pub observer: Entity,
    pub transition: LockTransition,
}
