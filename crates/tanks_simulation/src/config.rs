//! Gameplay tuning (tanks + shells)
//!
//! Загружается снаружи (JSON) и передаётся в симуляцию как immutable Resource.
//! Валидация — один раз на старте (`create_combat_app`), в рантайме конфиг
//! считается корректным.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки загрузки/валидации конфига
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}` = {value}: {reason}")]
    Invalid {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Tank tuning (движение, башня, сенсор, двигатель, пушка)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TankTuning {
    /// Скорость движения вперёд/назад (units/sec)
    pub speed: f32,

    /// Скорость поворота корпуса и башни (degrees/sec)
    pub turn_speed: f32,

    /// Радиус поиска врагов (units)
    pub search_radius: f32,

    /// Базовый pitch звука двигателя
    pub original_pitch: f32,

    /// Разброс pitch при смене клипа
    pub pitch_range: f32,

    pub max_health: f32,

    /// Радиус коллизии корпуса (для overlap query взрыва)
    pub hull_radius: f32,

    /// Начальная скорость снаряда (units/sec)
    pub launch_speed: f32,

    /// Сколько снарядов одного танка может быть в полёте одновременно
    pub max_shells_in_flight: u32,
}

impl Default for TankTuning {
    fn default() -> Self {
        Self {
            speed: 12.0,
            turn_speed: 180.0,
            search_radius: 30.0,
            original_pitch: 1.0,
            pitch_range: 0.2,
            max_health: 100.0,
            hull_radius: 1.0,
            launch_speed: 20.0,
            max_shells_in_flight: 3,
        }
    }
}

/// Shell tuning (взрыв, урон, время жизни)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShellTuning {
    /// Урон в эпицентре
    pub max_damage: f32,

    /// Сила взрыва в эпицентре
    pub explosion_force: f32,

    /// Время до детонации по таймауту (секунды)
    pub max_lifetime: f32,

    /// Максимальная дистанция поражения
    pub explosion_radius: f32,

    /// Битовая маска слоёв, которые задевает взрыв (rapier `Group` bits)
    pub tank_mask: u32,

    /// Длительность визуального эффекта взрыва (секунды)
    pub effect_duration: f32,

    /// Радиус коллизии самого снаряда
    pub collision_radius: f32,
}

impl Default for ShellTuning {
    fn default() -> Self {
        Self {
            max_damage: 100.0,
            explosion_force: 1000.0,
            max_lifetime: 2.0,
            explosion_radius: 5.0,
            tank_mask: TANK_LAYER,
            effect_duration: 1.5,
            collision_radius: 0.2,
        }
    }
}

/// Слой "Players" (rapier `Group::GROUP_1`)
pub const TANK_LAYER: u32 = 1 << 0;

/// Полный конфиг combat-симуляции
#[derive(Resource, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CombatConfig {
    pub tank: TankTuning,
    pub shell: ShellTuning,

    /// Частота fixed tick (Hz)
    pub fixed_hz: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            tank: TankTuning::default(),
            shell: ShellTuning::default(),
            fixed_hz: 60.0,
        }
    }
}

impl CombatConfig {
    /// Парсит JSON и валидирует результат
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Читает JSON файл
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Проверка инвариантов конфига (startup validation)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tank = &self.tank;
        let shell = &self.shell;

        positive("tank.search_radius", tank.search_radius)?;
        positive("tank.max_health", tank.max_health)?;
        positive("tank.hull_radius", tank.hull_radius)?;
        non_negative("tank.speed", tank.speed)?;
        non_negative("tank.turn_speed", tank.turn_speed)?;
        non_negative("tank.original_pitch", tank.original_pitch)?;
        non_negative("tank.pitch_range", tank.pitch_range)?;
        non_negative("tank.launch_speed", tank.launch_speed)?;

        if tank.pitch_range > tank.original_pitch {
            return Err(ConfigError::Invalid {
                field: "tank.pitch_range",
                value: tank.pitch_range as f64,
                reason: "must not exceed tank.original_pitch",
            });
        }

        positive("shell.explosion_radius", shell.explosion_radius)?;
        positive("shell.max_lifetime", shell.max_lifetime)?;
        non_negative("shell.max_damage", shell.max_damage)?;
        non_negative("shell.explosion_force", shell.explosion_force)?;
        non_negative("shell.effect_duration", shell.effect_duration)?;
        non_negative("shell.collision_radius", shell.collision_radius)?;

        if shell.tank_mask == 0 {
            return Err(ConfigError::Invalid {
                field: "shell.tank_mask",
                value: 0.0,
                reason: "explosion would never affect anything",
            });
        }

        if !self.fixed_hz.is_finite() || self.fixed_hz <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "fixed_hz",
                value: self.fixed_hz,
                reason: "must be a positive finite number",
            });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            value: value as f64,
            reason: "must be a positive finite number",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            value: value as f64,
            reason: "must be a non-negative finite number",
        })
    }
}
