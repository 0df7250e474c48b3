//! Physics boundary: move integrators, collision groups, spawn helpers.
//!
//! Сама геометрия коллизий: Rapier; симуляция только отдаёт displacement.

pub mod collision;
pub mod movement;

// Re-export основных типов
pub use movement::{
    CharacterControllerIntegrator,
    GroundPlane,
    GroundPlaneIntegrator,
    spawn_environment_block,
    spawn_mech,
    spawn_physics_mech,
    spawn_target_dummy,
};
