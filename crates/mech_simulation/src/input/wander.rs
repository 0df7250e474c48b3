//! Wander AI: случайный heading + иногда boost/jump
//!
//! Детерминизм: собственный ChaCha8 RNG на каждого меха (seed из `DeterministicRng`).

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::InputSource;
use crate::components::MechInput;
use crate::orientation::look_rotation;
use crate::DeterministicRng;

#[derive(Component, Debug, Clone)]
pub struct WanderBrain {
    /// Как часто менять решение (секунды)
    pub decision_interval: f32,
    /// Вероятность boost на интервал
    pub boost_chance: f64,
    /// Вероятность прыжка/thrust на интервал
    pub jump_chance: f64,
    rng: ChaCha8Rng,
    timer: f32,
    heading: Vec3,
    boost: bool,
    jump: bool,
}

impl WanderBrain {
    pub fn new(seed: u64) -> Self {
        Self {
            decision_interval: 2.0,
            boost_chance: 0.3,
            jump_chance: 0.15,
            rng: ChaCha8Rng::seed_from_u64(seed),
            timer: 0.0,
            heading: Vec3::Z,
            boost: false,
            jump: false,
        }
    }

    /// Seed из глобального RNG симуляции (порядок spawn определяет seed)
    pub fn from_world_rng(world_rng: &mut DeterministicRng) -> Self {
        Self::new(world_rng.rng.gen())
    }

    pub fn heading(&self) -> Vec3 {
        self.heading
    }

    fn decide(&mut self) {
        let angle = self.rng.gen_range(0.0..TAU);
        self.heading = Vec3::new(angle.sin(), 0.0, angle.cos());
        self.boost = self.rng.gen_bool(self.boost_chance.clamp(0.0, 1.0));
        self.jump = self.rng.gen_bool(self.jump_chance.clamp(0.0, 1.0));
    }
}

impl InputSource for WanderBrain {
    fn sample(&mut self, delta_time: f32) -> MechInput {
        self.timer -= delta_time;
        if self.timer <= 0.0 {
            self.decide();
            self.timer = self.decision_interval.max(delta_time);
        }

        MechInput {
            move_intent: Vec2::Y,
            facing: Some(self.heading),
            boost: self.boost,
            jump: self.jump,
        }
    }

    fn aim_master(&self) -> Option<Quat> {
        look_rotation(self.heading)
    }
}
