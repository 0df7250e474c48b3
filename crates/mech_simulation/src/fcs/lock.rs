//! Lock state machine: NoTarget → SoftLock → HardLock

use bevy::prelude::*;

use super::Candidate;
use crate::components::TargetLockState;

/// Допуск таймера (секунды): f32 сумма 1/60 × 90 чуть меньше 1.5
pub const LOCK_TIMER_TOLERANCE: f32 = 1e-4;

/// Переход state machine захвата
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTransition {
    /// Первая цель (soft lock)
    Acquired(Entity),
    /// Ближайшая цель сменилась: снова soft lock, таймер с нуля
    Switched { from: Entity, to: Entity },
    /// Цель удержана lock_speed секунд
    Hardened(Entity),
    /// Цель потеряна (вне frustum / range / слоя)
    Lost(Entity),
}

impl TargetLockState {
    /// Обновить захват по лучшему кандидату этого tick
    pub fn update(
        &mut self,
        best: Option<Candidate>,
        lock_speed: f32,
        delta_time: f32,
    ) -> Option<LockTransition> {
        match best {
            Some(candidate) if self.current_target != Some(candidate.entity) => {
                let previous = self.current_target;

                self.current_target = Some(candidate.entity);
                self.target_position = candidate.position;
                self.soft_locked = true;
                self.hard_locked = false;
                self.lock_timer = 0.0;

                Some(match previous {
                    Some(from) => LockTransition::Switched {
                        from,
                        to: candidate.entity,
                    },
                    None => LockTransition::Acquired(candidate.entity),
                })
            }
            Some(candidate) => {
                self.target_position = candidate.position;
                if self.hard_locked {
                    return None;
                }

                self.lock_timer += delta_time;
                if self.lock_timer + LOCK_TIMER_TOLERANCE >= lock_speed {
                    self.hard_locked = true;
                    Some(LockTransition::Hardened(candidate.entity))
                } else {
                    None
                }
            }
            None => {
                let lost = self.current_target.take();
                self.soft_locked = false;
                self.hard_locked = false;
                self.lock_timer = 0.0;
                self.target_position = Vec3::ZERO;
                lost.map(LockTransition::Lost)
            }
        }
    }
}
