//! ECS Components меха
//!
//! Организация по доменам:
//! - mech: marker + required components
//! - energy: energy pool (boost/flight ресурс)
//! - movement: intent, кинематика, ориентация корпуса
//! - fcs: сенсор, lock state, aim master, цели

pub mod mech;
pub mod energy;
pub mod movement;
pub mod fcs;

// Re-exports для удобного импорта
pub use mech::*;
pub use energy::*;
pub use movement::*;
pub use fcs::*;
