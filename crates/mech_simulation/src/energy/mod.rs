//! Energy management системы
//!
//! - Регенерация energy pool (150 units/sec, 50 units/sec в depleted)
//! - Depletion/recovery события для HUD и AI
//! - Расход энергии: в locomotion (boost + flight, один consume на tick)

use bevy::prelude::*;
use crate::components::{EnergyPool, EnergyTransition};
use crate::logger;


/// Event: пул меха опустел или полностью восстановился
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnergyEvent {
    pub entity: Entity,
    pub transition: EnergyTransition,
}

/// Система: regenerate energy для всех мехов
///
/// Работает в FixedUpdate после locomotion: clamp'ит временный минус после consume.
pub fn regenerate_energy(
    mut query: Query<(Entity, &mut EnergyPool)>,
    mut events: EventWriter<EnergyEvent>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut pool) in query.iter_mut() {
        let Some(transition) = pool.tick(delta) else {
            continue;
        };

        match transition {
            EnergyTransition::Depleted => {
                logger::log(&format!("Mech {:?}: energy depleted", entity));
            }
            EnergyTransition::Recovered => {
                logger::log(&format!("Mech {:?}: energy fully recharged", entity));
            }
        }

        events.write(EnergyEvent { entity, transition });
    }
}
