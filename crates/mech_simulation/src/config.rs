//! Конфигурация меха: energy, locomotion, FCS
//!
//! `MechConfig`: immutable value object. Загружается один раз (JSON или defaults),
//! валидируется, затем раздаётся компонентам при spawn.
//! Defaults соответствуют "стандартному" тяжёлому меху (5000 кг).

use std::path::Path;

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки загрузки/валидации конфигурации
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read mech config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse mech config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid mech config: {field} = {value} ({reason})")]
    Invalid {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Полная конфигурация меха
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MechConfig {
    pub energy: EnergyConfig,
    pub locomotion: LocomotionConfig,
    pub fcs: FcsConfig,
}

impl MechConfig {
    /// Парсинг + валидация из JSON строки
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MechConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузка из файла (loadout меха)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.energy.validate()?;
        self.locomotion.validate()?;
        self.fcs.validate()
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            value,
            reason: "must be positive and finite",
        })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            value,
            reason: "must be non-negative and finite",
        })
    }
}

/// Energy pool tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    pub max_energy: f32,
    /// Regen (units/sec) в нормальном режиме
    pub regen_rate: f32,
    /// Regen (units/sec) пока пул depleted
    pub depleted_regen_rate: f32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            max_energy: 1000.0,
            regen_rate: 150.0,
            depleted_regen_rate: 50.0,
        }
    }
}

impl EnergyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("energy.max_energy", self.max_energy)?;
        require_non_negative("energy.regen_rate", self.regen_rate)?;
        require_non_negative("energy.depleted_regen_rate", self.depleted_regen_rate)
    }
}

/// Locomotion tunables (скорости, ускорения, вес)
///
/// Низкий `boost_acceleration` даёт занос (drift) при повороте на бусте.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Скорость поворота корпуса (slerp factor/sec)
    pub turn_speed: f32,
    pub walk_speed: f32,
    pub boost_horizontal_speed: f32,
    /// Потолок вертикальной скорости при полёте
    pub boost_vertical_speed: f32,
    pub walk_acceleration: f32,
    pub walk_deceleration: f32,
    pub boost_acceleration: f32,
    pub boost_deceleration: f32,
    pub jump_force: f32,
    /// Расход энергии (units/sec) при бусте или полёте
    pub boost_energy_drain: f32,
    /// Полный вес меха (кг): масштабирует гравитацию и тягу
    pub total_weight: f32,
    /// Минимальная тяга вверх, даже для перегруженного меха
    pub minimum_lift: f32,
    /// Прижимающая скорость на земле (держит контакт на склонах)
    pub ground_stick_velocity: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            turn_speed: 5.0,
            walk_speed: 15.0,
            boost_horizontal_speed: 35.0,
            boost_vertical_speed: 25.0,
            walk_acceleration: 25.0,
            walk_deceleration: 30.0,
            boost_acceleration: 10.0,
            boost_deceleration: 15.0,
            jump_force: 12.0,
            boost_energy_drain: 200.0,
            total_weight: 5000.0,
            minimum_lift: 5.0,
            ground_stick_velocity: -2.0,
        }
    }
}

impl LocomotionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("locomotion.turn_speed", self.turn_speed)?;
        require_positive("locomotion.walk_speed", self.walk_speed)?;
        require_positive("locomotion.boost_horizontal_speed", self.boost_horizontal_speed)?;
        require_positive("locomotion.boost_vertical_speed", self.boost_vertical_speed)?;
        require_positive("locomotion.walk_acceleration", self.walk_acceleration)?;
        require_positive("locomotion.walk_deceleration", self.walk_deceleration)?;
        require_positive("locomotion.boost_acceleration", self.boost_acceleration)?;
        require_positive("locomotion.boost_deceleration", self.boost_deceleration)?;
        require_non_negative("locomotion.jump_force", self.jump_force)?;
        require_non_negative("locomotion.boost_energy_drain", self.boost_energy_drain)?;
        require_positive("locomotion.total_weight", self.total_weight)?;
        require_non_negative("locomotion.minimum_lift", self.minimum_lift)?;
        if !self.ground_stick_velocity.is_finite() || self.ground_stick_velocity > 0.0 {
            return Err(ConfigError::Invalid {
                field: "locomotion.ground_stick_velocity",
                value: self.ground_stick_velocity,
                reason: "must be zero or negative",
            });
        }
        Ok(())
    }
}

/// FCS (fire control system) tunables
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FcsConfig {
    /// Угловая ширина frustum (градусы)
    pub width: f32,
    /// Угловая высота frustum (градусы)
    pub height: f32,
    pub range: f32,
    /// Время удержания цели до hard lock (секунды)
    pub lock_speed: f32,
    /// Скорость догоняния aim master (slerp factor/sec)
    pub turn_rate: f32,
    /// Порог (градусы), ниже которого сенсор snap'ается на aim master
    pub sticky_threshold: f32,
    /// Bitmask слоёв целей (rapier `Group` bits). 0 = слой не задан
    pub target_layer: u32,
    /// Позиция сенсора относительно root меха
    pub mount_offset: [f32; 3],
    /// Дистанция aim point когда цели нет
    pub default_aim_distance: f32,
}

impl Default for FcsConfig {
    fn default() -> Self {
        Self {
            width: 45.0,
            height: 30.0,
            range: 300.0,
            lock_speed: 1.5,
            turn_rate: 10.0,
            sticky_threshold: 2.0,
            target_layer: crate::physics::collision::TARGET_GROUP.bits(),
            mount_offset: [0.0, 1.5, 0.0],
            default_aim_distance: 100.0,
        }
    }
}

impl FcsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("fcs.width", self.width)?;
        require_positive("fcs.height", self.height)?;
        if self.width >= 360.0 || self.height >= 180.0 {
            return Err(ConfigError::Invalid {
                field: "fcs.width/height",
                value: self.width.max(self.height),
                reason: "frustum must be narrower than a full turn",
            });
        }
        require_positive("fcs.range", self.range)?;
        require_non_negative("fcs.lock_speed", self.lock_speed)?;
        require_non_negative("fcs.turn_rate", self.turn_rate)?;
        require_non_negative("fcs.sticky_threshold", self.sticky_threshold)?;
        require_positive("fcs.default_aim_distance", self.default_aim_distance)
    }

    pub fn target_group(&self) -> Group {
        Group::from_bits_truncate(self.target_layer)
    }

    pub fn mount_offset(&self) -> Vec3 {
        Vec3::from_array(self.mount_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(MechConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = MechConfig::from_json_str(r#"{ "locomotion": { "total_weight": 7500.0 } }"#)
            .expect("partial config should parse");

        assert_eq!(config.locomotion.total_weight, 7500.0);
        assert_eq!(config.locomotion.walk_speed, 15.0);
        assert_eq!(config.energy, EnergyConfig::default());
        assert_eq!(config.fcs.width, 45.0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = MechConfig::default();
        config.fcs.lock_speed = 0.75;
        config.energy.max_energy = 1200.0;

        let json = config.to_json_string().unwrap();
        let parsed = MechConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let err = MechConfig::from_json_str(r#"{ "locomotion": { "total_weight": 0.0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "locomotion.total_weight", .. }
        ));
    }

    #[test]
    fn test_rejects_positive_ground_stick() {
        let mut config = MechConfig::default();
        config.locomotion.ground_stick_velocity = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_garbage_json() {
        let err = MechConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = MechConfig::load("/definitely/missing/mech.json").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert!(path.contains("mech.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_target_group_from_bits() {
        let config = FcsConfig {
            target_layer: 0b10,
            ..default()
        };
        assert_eq!(config.target_group(), Group::GROUP_2);
        assert_eq!(config.mount_offset(), Vec3::new(0.0, 1.5, 0.0));
    }
}
