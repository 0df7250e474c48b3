//! Collision groups: centralised constants для всего проекта.
//!
//! ## Архитектура:
//! - **Memberships:** на каком слое находится объект
//! - **Filters:** с какими слоями объект коллидирует
//!
//! ## Слои (rapier `Group`):
//! - Group 1: Mechs (KinematicCharacterController capsule)
//! - Group 2: Targets (всё, что FCS может захватить)
//! - Group 3: Environment (terrain, стены)
//!
//! `FcsConfig::target_layer` хранит bits: default = `TARGET_GROUP`.

use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Group 1: Mechs
pub const MECH_GROUP: Group = Group::GROUP_1;

/// Group 2: Targets (вражеские мехи, дроны, турели)
pub const TARGET_GROUP: Group = Group::GROUP_2;

/// Group 3: Environment
pub const ENVIRONMENT_GROUP: Group = Group::GROUP_3;

/// Мех, который сам является целью для чужих FCS
///
/// Коллайдит с мехами и окружением; слой целей не влияет на коллизии.
pub fn mech_groups() -> CollisionGroups {
    CollisionGroups::new(MECH_GROUP | TARGET_GROUP, MECH_GROUP | ENVIRONMENT_GROUP)
}

/// Статическое окружение
pub fn environment_groups() -> CollisionGroups {
    CollisionGroups::new(ENVIRONMENT_GROUP, MECH_GROUP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mech_is_on_target_layer() {
        let groups = mech_groups();
        assert!(groups.memberships.contains(TARGET_GROUP));
        assert!(!groups.filters.contains(TARGET_GROUP));
    }

    #[test]
    fn test_environment_blocks_mechs_not_targets() {
        let groups = environment_groups();
        assert!(groups.filters.contains(MECH_GROUP));
        assert!(!groups.filters.contains(TARGET_GROUP));
        assert!(mech_groups().filters.contains(groups.memberships));
    }

    #[test]
    fn test_layers_are_disjoint() {
        assert!(!MECH_GROUP.intersects(TARGET_GROUP));
        assert!(!TARGET_GROUP.intersects(ENVIRONMENT_GROUP));
    }
}
