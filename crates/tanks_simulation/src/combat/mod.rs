//! Combat module: снаряды, детонация, BlastResolver, урон
//!
//! ECS ответственность:
//! - Shell state machine (Armed → Resolving → Resolved) + fuse
//! - BlastResolver: falloff урона, force directives
//! - Events: ShellDetonated, ShellConsumed, DamageDealt, EntityDied
//!
//! Внешние capabilities:
//! - rapier: collision-entry (CollisionEvent), ExternalImpulse, RigidBody
//! - хост: партиклы/звук по ExplosionTriggered

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

pub mod blast;
pub mod damage;
pub mod effects;
pub mod overlap;
pub mod shell;
pub mod systems;

#[cfg(test)]
mod blast_tests;

pub use blast::{blast_damage, resolve_blast, BlastCandidate, BlastHit, BlastSpec, ForceDirective};
pub use damage::{apply_blast_damage, apply_damage_to, DamageDealt, DamageSink, EntityDied};
pub use effects::{expire_explosion_effects, spawn_explosion_effects, ExplosionEffect, ExplosionTriggered};
pub use overlap::{CollisionSphere, OverlapQuery, SphereOverlap};
pub use shell::{
    spawn_shell, Cannon, DetonationCause, FireShellIntent, Fuse, Shell, ShellConsumed, ShellDetonated,
    ShellImpact, ShellState,
};

use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate (SimulationSet::Combat).
///
/// Порядок выполнения:
/// 1. fire_shells — FireShellIntent → spawn снаряда
/// 2. forward_rapier_contacts — CollisionEvent → ShellImpact
/// 3. release_orphaned_shells — owner despawned → fuse отменён, снаряд удалён
/// 4. detonate_shells — impact или timeout, single-shot guard, BlastResolver
/// 5. apply_blast_impulses → apply_blast_damage
/// 6. spawn_explosion_effects → expire_explosion_effects
/// 7. notify_shell_owners → release_consumed_shells
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        // CollisionEvent регистрирует и RapierPhysicsPlugin (add_event идемпотентен)
        app.add_event::<FireShellIntent>()
            .add_event::<ShellImpact>()
            .add_event::<ShellDetonated>()
            .add_event::<ShellConsumed>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<ExplosionTriggered>()
            .add_event::<CollisionEvent>();

        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: выстрелы
                systems::fire_shells,

                // Фаза 2: триггеры (collision-entry, сироты, детонация)
                systems::forward_rapier_contacts,
                systems::release_orphaned_shells,
                systems::detonate_shells,

                // Фаза 3: применение взрыва (сила, потом урон)
                systems::apply_blast_impulses,
                damage::apply_blast_damage,

                // Фаза 4: эффекты
                effects::spawn_explosion_effects,
                effects::expire_explosion_effects,

                // Фаза 5: возврат снаряда owner'у
                systems::notify_shell_owners,
                systems::release_consumed_shells,
            )
                .chain()
                .in_set(SimulationSet::Combat),
        );
    }
}
