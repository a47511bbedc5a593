//! Targeting systems

use bevy::prelude::*;

use crate::components::{Dead, Tank, TurretState};
use crate::logger;
use crate::targeting::{acquire_target, EnemyRoster, EnemySighting, TargetChanged, TargetingState};

/// System: захват ближайшего врага (FixedUpdate, каждый tick)
///
/// Для каждого живого танка:
/// 1. Резолвим roster в живых врагов (мёртвые/despawned пропускаются)
/// 2. TargetTracker выбирает ближайшего в радиусе
/// 3. TargetingState обновляется (потеря цели → bearing = 0)
pub fn acquire_targets(
    mut trackers: Query<
        (Entity, &Transform, &TurretState, &EnemyRoster, &mut TargetingState),
        Without<Dead>,
    >,
    enemies: Query<(&Tank, &Transform), Without<Dead>>,
    mut changes: EventWriter<TargetChanged>,
) {
    let mut sightings: Vec<EnemySighting> = Vec::new();

    for (entity, transform, turret, roster, mut targeting) in trackers.iter_mut() {
        sightings.clear();
        sightings.extend(roster.enemies.iter().filter(|&&enemy| enemy != entity).filter_map(
            |&enemy| {
                let (tank, enemy_transform) = enemies.get(enemy).ok()?;
                Some(EnemySighting {
                    entity: enemy,
                    player_number: tank.player_number,
                    position: enemy_transform.translation,
                })
            },
        ));

        let previous = targeting.current;
        let lock = acquire_target(
            transform.translation,
            turret.forward(transform.rotation),
            &sightings,
            targeting.search_radius,
            previous,
        );

        targeting.apply(lock);

        if previous == targeting.current {
            continue;
        }

        match (previous, lock) {
            (_, Some(lock)) => logger::log(&format!(
                "🎯 {:?} locked {:?} at {:.1}m (bearing {:.1}°)",
                entity, lock.target, lock.distance, lock.bearing_degrees
            )),
            (Some(lost), None) => logger::log(&format!("👁️ {:?} lost target {:?}", entity, lost)),
            (None, None) => {}
        }

        changes.write(TargetChanged {
            tank: entity,
            previous,
            current: targeting.current,
        });
    }
}

/// System: пересборка EnemyRoster при spawn/death/despawn танков
///
/// Roster = все живые танки с другим player_number, отсортированные по Entity.
/// Запускается в каждом tick, но работает только если состав танков изменился.
pub fn sync_enemy_rosters(
    spawned: Query<(), Added<Tank>>,
    died: Query<(), Added<Dead>>,
    mut removed: RemovedComponents<Tank>,
    mut rosters: Query<(Entity, &Tank, &mut EnemyRoster)>,
    alive: Query<(Entity, &Tank), Without<Dead>>,
) {
    let despawned = removed.read().count() > 0;
    if spawned.is_empty() && died.is_empty() && !despawned {
        return;
    }

    let mut living: Vec<(Entity, u32)> = alive
        .iter()
        .map(|(entity, tank)| (entity, tank.player_number))
        .collect();
    living.sort_by_key(|(entity, _)| *entity);

    for (entity, tank, mut roster) in rosters.iter_mut() {
        roster.enemies = living
            .iter()
            .filter(|(other, player)| *other != entity && *player != tank.player_number)
            .map(|(other, _)| *other)
            .collect();
    }

    logger::log(&format!("📋 Enemy rosters rebuilt ({} living tanks)", living.len()));
}
