//! Targeting компоненты и события

use bevy::prelude::*;

use crate::targeting::TargetLock;

/// Радиус сенсора по умолчанию (units)
pub const DEFAULT_SEARCH_RADIUS: f32 = 30.0;

/// Список врагов, видимых танку
///
/// Порядок не важен. Меняется снаружи (spawn/death через sync_enemy_rosters),
/// targeting только читает.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct EnemyRoster {
    pub enemies: Vec<Entity>,
}

/// Transient targeting state танка
///
/// `current` — только идентификатор, каждый tick резолвится заново через
/// живой roster (уничтоженный враг не может "висеть" в захвате).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TargetingState {
    pub current: Option<Entity>,
    /// Signed bearing к текущей цели, 0 если цели нет
    pub bearing_degrees: f32,
    pub search_radius: f32,
}

impl Default for TargetingState {
    fn default() -> Self {
        Self::with_radius(DEFAULT_SEARCH_RADIUS)
    }
}

impl TargetingState {
    pub fn with_radius(search_radius: f32) -> Self {
        Self {
            current: None,
            bearing_degrees: 0.0,
            search_radius,
        }
    }

    /// Применить результат захвата. Потеря цели сбрасывает bearing в 0.
    pub fn apply(&mut self, lock: Option<TargetLock>) {
        match lock {
            Some(lock) => {
                self.current = Some(lock.target);
                self.bearing_degrees = lock.bearing_degrees;
            }
            None => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.bearing_degrees = 0.0;
    }

    pub fn has_target(&self) -> bool {
        self.current.is_some()
    }
}

/// Event: танк захватил/сменил/потерял цель
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TargetChanged {
    pub tank: Entity,
    pub previous: Option<Entity>,
    pub current: Option<Entity>,
}
