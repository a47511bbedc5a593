//! TargetTracker — выбор ближайшего врага в радиусе сенсора
//!
//! Каждый tick roster сканируется целиком (не только текущая цель).
//! Кандидат — враг со строго `distance < search_radius` (planar XZ).
//!
//! Tie-break при точном равенстве дистанций (не зависит от порядка roster):
//! 1. Предыдущая захваченная цель остаётся (stability > re-acquisition)
//! 2. Иначе меньший `(player_number, entity)`

use bevy::prelude::*;

use crate::geometry::{planar_distance, signed_bearing_degrees};

/// Снимок врага на текущий tick (позиция + стабильный идентификатор)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySighting {
    pub entity: Entity,
    pub player_number: u32,
    pub position: Vec3,
}

/// Результат захвата цели
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetLock {
    pub target: Entity,
    pub distance: f32,
    /// Signed bearing от forward башни к цели, положительный = цель справа
    pub bearing_degrees: f32,
}

/// Ближайший враг в радиусе (или None если в радиусе никого)
pub fn find_nearest_enemy(
    origin: Vec3,
    enemies: &[EnemySighting],
    search_radius: f32,
    previous: Option<Entity>,
) -> Option<(EnemySighting, f32)> {
    let mut nearest: Option<(EnemySighting, f32)> = None;

    for enemy in enemies {
        let distance = planar_distance(origin, enemy.position);

        // NaN тоже отсекается
        if !(distance < search_radius) {
            continue;
        }

        let replace = match &nearest {
            None => true,
            Some((best, best_distance)) => {
                is_preferred(enemy, distance, best, *best_distance, previous)
            }
        };

        if replace {
            nearest = Some((*enemy, distance));
        }
    }

    nearest
}

fn is_preferred(
    candidate: &EnemySighting,
    distance: f32,
    best: &EnemySighting,
    best_distance: f32,
    previous: Option<Entity>,
) -> bool {
    if distance != best_distance {
        return distance < best_distance;
    }

    if previous == Some(best.entity) {
        return false;
    }
    if previous == Some(candidate.entity) {
        return true;
    }

    (candidate.player_number, candidate.entity) < (best.player_number, best.entity)
}

/// TargetTracker::update — ближайший враг + bearing от башни к нему
pub fn acquire_target(
    origin: Vec3,
    turret_forward: Vec3,
    enemies: &[EnemySighting],
    search_radius: f32,
    previous: Option<Entity>,
) -> Option<TargetLock> {
    let (enemy, distance) = find_nearest_enemy(origin, enemies, search_radius, previous)?;

    Some(TargetLock {
        target: enemy.entity,
        distance,
        bearing_degrees: signed_bearing_degrees(turret_forward, enemy.position - origin),
    })
}
