//! Входные оси танка
//!
//! Источник осей внешний (клавиатура, геймпад, AI, replay) — он пишет значения
//! в `InputAxes` по имени оси. Симуляция семплирует их раз в кадр в `TankInput`.

use std::collections::HashMap;

use bevy::prelude::*;

/// Семплированный input танка (значения в [-1, 1])
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TankInput {
    /// Вперёд/назад
    pub movement: f32,
    /// Поворот корпуса
    pub turn: f32,
    /// Ручной поворот башни
    pub turret_turn: f32,
    /// Доводка башни к цели (работает только при захвате цели)
    pub aim: f32,
}

impl TankInput {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Имена осей для конкретного игрока
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct InputAxisNames {
    pub movement: String,
    pub turn: String,
    pub turret_turn: String,
    pub aim: String,
}

impl InputAxisNames {
    /// Имена осей строятся из номера игрока: "Vertical1", "Horizontal1", ...
    pub fn for_player(player_number: u32) -> Self {
        Self {
            movement: format!("Vertical{}", player_number),
            turn: format!("Horizontal{}", player_number),
            turret_turn: format!("TurretHorizontal{}", player_number),
            aim: format!("Aim{}", player_number),
        }
    }
}

/// Текущие значения всех именованных осей (opaque input source)
#[derive(Resource, Debug, Clone, Default)]
pub struct InputAxes {
    values: HashMap<String, f32>,
}

impl InputAxes {
    pub fn set(&mut self, axis: impl Into<String>, value: f32) {
        self.values.insert(axis.into(), value);
    }

    /// Значение оси, clamp в [-1, 1]. Неизвестная ось (или NaN) = 0.
    pub fn get(&self, axis: &str) -> f32 {
        match self.values.get(axis) {
            Some(value) if value.is_finite() => value.clamp(-1.0, 1.0),
            _ => 0.0,
        }
    }

    pub fn sample(&self, names: &InputAxisNames) -> TankInput {
        TankInput {
            movement: self.get(&names.movement),
            turn: self.get(&names.turn),
            turret_turn: self.get(&names.turret_turn),
            aim: self.get(&names.aim),
        }
    }
}
