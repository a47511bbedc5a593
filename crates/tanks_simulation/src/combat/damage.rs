//! Damage sink + урон от взрывов + смерть танка

use bevy::prelude::*;

use crate::combat::ShellDetonated;
use crate::components::{Dead, Health};
use crate::logger;

/// Capability: "прими урон". Clamp — забота реализации.
pub trait DamageSink {
    fn take_damage(&mut self, amount: f32);
    fn is_destroyed(&self) -> bool;
}

impl DamageSink for Health {
    fn take_damage(&mut self, amount: f32) {
        Health::take_damage(self, amount);
    }

    fn is_destroyed(&self) -> bool {
        !self.is_alive()
    }
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health (только для ненулевого урона).
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
    pub target_died: bool,
}

/// Событие: танк уничтожен (health дошёл до 0)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Применяет урон к sink. Возвращает true если этот урон уничтожил цель.
pub fn apply_damage_to<S: DamageSink>(sink: &mut S, amount: f32) -> bool {
    let was_alive = !sink.is_destroyed();
    sink.take_damage(amount);
    was_alive && sink.is_destroyed()
}

/// System: урон от взрывов (после apply_blast_impulses)
///
/// 1. Читаем ShellDetonated
/// 2. Для каждого hit с уроном вызываем damage sink (ровно один раз)
/// 3. DamageDealt / EntityDied события, маркер Dead
pub fn apply_blast_damage(
    mut commands: Commands,
    mut detonations: EventReader<ShellDetonated>,
    mut targets: Query<&mut Health>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
) {
    for detonation in detonations.read() {
        for hit in &detonation.hits {
            let Some(damage) = hit.damage else {
                continue;
            };

            let Ok(mut health) = targets.get_mut(hit.target) else {
                continue;
            };

            let died = apply_damage_to(&mut *health, damage);

            if damage > 0.0 {
                logger::log(&format!(
                    "💥 {:?} took {:.1} blast damage (health {:.1}/{:.1})",
                    hit.target, damage, health.current, health.max
                ));

                damage_dealt_events.write(DamageDealt {
                    attacker: detonation.owner,
                    target: hit.target,
                    damage,
                    target_died: died,
                });
            }

            if died {
                logger::log_info(&format!(
                    "💀 {:?} destroyed by {:?}",
                    hit.target, detonation.owner
                ));

                entity_died_events.write(EntityDied {
                    entity: hit.target,
                    killer: Some(detonation.owner),
                });

                if let Ok(mut entity_commands) = commands.get_entity(hit.target) {
                    entity_commands.insert(Dead);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_damage_reports_death_once() {
        let mut health = Health::new(100.0);

        assert!(!apply_damage_to(&mut health, 60.0));
        assert!(apply_damage_to(&mut health, 60.0));
        assert_eq!(health.current, 0.0);

        // Уже мёртв — повторно не "умирает"
        assert!(!apply_damage_to(&mut health, 60.0));
    }

    #[test]
    fn test_zero_damage_is_noop() {
        let mut health = Health::new(100.0);
        assert!(!apply_damage_to(&mut health, 0.0));
        assert_eq!(health.current, 100.0);
    }
}
