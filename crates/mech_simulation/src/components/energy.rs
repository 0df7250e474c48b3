//! Energy pool меха (boost + flight)
//!
//! Инвариант: 0.0 ≤ current ≤ max после каждого tick.
//! Hysteresis: depleted включается при current ≤ 0.01,
//! выключается ТОЛЬКО при полном заряде (частичный regen не разблокирует boost).

use bevy::prelude::*;
use crate::config::EnergyConfig;

/// Порог "пустого" пула
pub const DEPLETION_EPSILON: f32 = 0.01;

/// Переход depleted-флага за один tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyTransition {
    Depleted,
    Recovered,
}

/// Read-only снимок для HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergySnapshot {
    pub current: f32,
    pub max: f32,
    pub depleted: bool,
}

impl EnergySnapshot {
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EnergyPool {
    pub max: f32,
    pub current: f32,
    pub regen_rate: f32,
    pub depleted_regen_rate: f32,
    pub depleted: bool,
}

impl Default for EnergyPool {
    fn default() -> Self {
        Self::new(&EnergyConfig::default())
    }
}

impl EnergyPool {
    /// Полный пул из конфигурации
    pub fn new(config: &EnergyConfig) -> Self {
        Self {
            max: config.max_energy,
            current: config.max_energy,
            regen_rate: config.regen_rate,
            depleted_regen_rate: config.depleted_regen_rate,
            depleted: false,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.depleted
    }

    /// Можно ли сейчас тратить энергию
    pub fn can_consume(&self) -> bool {
        !self.depleted && self.current > 0.0
    }

    /// Один tick: depletion check → recovery check → regen → clamp
    pub fn tick(&mut self, delta_time: f32) -> Option<EnergyTransition> {
        let was_depleted = self.depleted;

        if self.current <= DEPLETION_EPSILON {
            self.current = 0.0;
            self.depleted = true;
        }

        if self.depleted && self.current >= self.max {
            self.depleted = false;
        }

        let regen = if self.depleted {
            self.depleted_regen_rate
        } else {
            self.regen_rate
        };
        if self.current < self.max {
            self.current += regen * delta_time;
        }

        self.current = self.current.clamp(0.0, self.max);

        match (was_depleted, self.depleted) {
            (false, true) => Some(EnergyTransition::Depleted),
            (true, false) => Some(EnergyTransition::Recovered),
            _ => None,
        }
    }

    /// Списать энергию
    ///
    /// false (без мутации) если depleted или пусто. Может временно уйти в минус -
    /// следующий `tick` делает clamp.
    pub fn consume(&mut self, amount: f32) -> bool {
        if !self.can_consume() {
            return false;
        }

        self.current -= amount;
        true
    }

    pub fn snapshot(&self) -> EnergySnapshot {
        EnergySnapshot {
            current: self.current,
            max: self.max,
            depleted: self.depleted,
        }
    }
}
