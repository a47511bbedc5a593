//! Базовые компоненты танка: Tank, Health, Dead

use bevy::prelude::*;

use crate::targeting::{EnemyRoster, TargetingState};
use crate::combat::Cannon;
use crate::components::{TankDrive, TankInput, TurretState};

/// Танк (управляемый юнит)
///
/// Автоматически добавляет Health, башню, input и targeting state через Required Components.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, Health, TankDrive, TurretState, TankInput, EnemyRoster, TargetingState, Cannon)]
pub struct Tank {
    /// Номер игрока (он же фракция): 1, 2, ...
    pub player_number: u32,
}

impl Tank {
    pub fn new(player_number: u32) -> Self {
        Self { player_number }
    }
}

/// Здоровье танка
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Урон clamp'ится: отрицательный/NaN урон игнорируется, health не уходит ниже 0
    pub fn take_damage(&mut self, amount: f32) {
        if amount.is_nan() || amount <= 0.0 {
            return;
        }
        self.current = (self.current - amount).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        if amount.is_nan() || amount <= 0.0 {
            return;
        }
        self.current = (self.current + amount).min(self.max);
    }
}

/// Компонент-маркер: танк уничтожен (disabled)
///
/// Мёртвые танки исключаются из EnemyRoster и не участвуют в targeting.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100.0);

        health.take_damage(30.0);
        assert_eq!(health.current, 70.0);
        assert!(health.is_alive());

        health.take_damage(100.0); // clamp к нулю
        assert_eq!(health.current, 0.0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_ignores_negative_and_nan() {
        let mut health = Health::new(100.0);

        health.take_damage(-20.0);
        health.take_damage(f32::NAN);
        assert_eq!(health.current, 100.0);
    }

    #[test]
    fn test_health_heal() {
        let mut health = Health::new(100.0);
        health.take_damage(50.0);

        health.heal(30.0);
        assert_eq!(health.current, 80.0);

        health.heal(100.0); // clamp к max
        assert_eq!(health.current, 100.0);
    }
}
