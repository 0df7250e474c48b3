//! FCS systems (FixedUpdate)

use std::collections::HashSet;

use bevy::prelude::*;

use super::{Candidate, LockEvent, LockTransition, TargetIndex};
use crate::components::{AimMaster, FireControl, Targetable};
use crate::config::FcsConfig;
use crate::logger;

/// Система: сенсор догоняет aim master
///
/// Запускается ДО locomotion. Без aim master сенсор стоит на месте.
pub fn track_sensors(
    mut query: Query<(Entity, &FcsConfig, &AimMaster, &mut FireControl)>,
    time: Res<Time<Fixed>>,
    mut missing_aim: Local<HashSet<Entity>>,
) {
    let delta = time.delta_secs();

    for (entity, config, aim_master, mut fire_control) in query.iter_mut() {
        let Some(aim) = aim_master.rotation else {
            if missing_aim.insert(entity) {
                logger::log_warning(&format!(
                    "Mech {:?}: FCS has no aim master, sensor frozen",
                    entity
                ));
            }
            continue;
        };
        missing_aim.remove(&entity);

        fire_control.track(aim, config.sticky_threshold, config.turn_rate, delta);
    }
}

/// Система: detection + lock state machine
///
/// Запускается ПОСЛЕ locomotion: origin сенсора = новая позиция root + mount offset.
pub fn acquire_targets(
    mut observers: Query<(Entity, &Transform, &FcsConfig, &mut FireControl)>,
    targets: Query<(Entity, &Transform, &Targetable)>,
    mut events: EventWriter<LockEvent>,
    time: Res<Time<Fixed>>,
    mut missing_layer: Local<HashSet<Entity>>,
) {
    let delta = time.delta_secs();

    let index = TargetIndex::new(
        targets
            .iter()
            .map(|(entity, transform, targetable)| {
                (
                    Candidate {
                        entity,
                        position: transform.translation,
                    },
                    targetable.layers,
                )
            })
            .collect(),
    );

    for (observer, transform, config, mut fire_control) in observers.iter_mut() {
        fire_control.origin = transform.translation + config.mount_offset();

        if config.target_group().is_empty() {
            if missing_layer.insert(observer) {
                logger::log_warning(&format!(
                    "Mech {:?}: FCS target layer not set, detection disabled",
                    observer
                ));
            }
        } else {
            missing_layer.remove(&observer);
        }

        let Some(transition) = fire_control.acquire(config, &index, Some(observer), delta) else {
            continue;
        };

        match transition {
            LockTransition::Acquired(target) | LockTransition::Switched { to: target, .. } => {
                logger::log(&format!("Mech {:?}: soft lock on {:?}", observer, target));
            }
            LockTransition::Hardened(target) => {
                logger::log_info(&format!("Mech {:?}: HARD LOCK on {:?}", observer, target));
            }
            LockTransition::Lost(target) => {
                logger::log(&format!("Mech {:?}: lost lock on {:?}", observer, target));
            }
        }

        events.write(LockEvent {
            observer,
            transition,
        });
    }
}
