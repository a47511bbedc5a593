//! BlastResolver — чистый расчёт урона и силы взрыва
//!
//! Никакого ECS: на вход origin + кандидаты из overlap query, на выход
//! список попаданий. Применение (Health, ExternalImpulse) — в системах.
//!
//! Гейтинг независимый:
//! - сила → только если у кандидата есть физическое тело
//! - урон → только если у кандидата есть damage sink
//!
//! Кандидат без того и другого отбрасывается.

use bevy::prelude::*;

use crate::config::ShellTuning;
use crate::geometry::linear_falloff;

/// Параметры взрыва одного снаряда (фиксируются при spawn)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct BlastSpec {
    pub radius: f32,
    pub max_damage: f32,
    pub explosion_force: f32,
    /// Слои, которые задевает взрыв (rapier `Group` bits)
    pub layer_mask: u32,
}

impl BlastSpec {
    pub fn from_tuning(tuning: &ShellTuning) -> Self {
        Self {
            radius: tuning.explosion_radius,
            max_damage: tuning.max_damage,
            explosion_force: tuning.explosion_force,
            layer_mask: tuning.tank_mask,
        }
    }
}

/// Тело, попавшее в сферу взрыва
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlastCandidate {
    pub entity: Entity,
    pub position: Vec3,
    /// Есть физическое тело (rapier RigidBody)
    pub has_body: bool,
    /// Есть damage sink (Health)
    pub damageable: bool,
}

/// Команда физике: "толкни тело от точки" (радиальный импульс с falloff)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceDirective {
    pub force: f32,
    pub origin: Vec3,
    pub radius: f32,
}

/// Результат взрыва для одного тела
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlastHit {
    pub target: Entity,
    pub damage: Option<f32>,
    pub force: Option<ForceDirective>,
}

/// Урон на дистанции `distance` от эпицентра: линейно от max_damage до 0.
///
/// Результат всегда в [0, max_damage], на радиусе и дальше ровно 0.
pub fn blast_damage(distance: f32, radius: f32, max_damage: f32) -> f32 {
    (linear_falloff(distance, radius) * max_damage).max(0.0)
}

/// BlastResolver::resolve — по одному BlastHit на годного кандидата.
///
/// Порядок результата = порядок кандидатов.
pub fn resolve_blast(spec: &BlastSpec, origin: Vec3, candidates: &[BlastCandidate]) -> Vec<BlastHit> {
    candidates
        .iter()
        .filter(|candidate| candidate.has_body || candidate.damageable)
        .map(|candidate| {
            let force = candidate.has_body.then_some(ForceDirective {
                force: spec.explosion_force,
                origin,
                radius: spec.radius,
            });

            let damage = candidate.damageable.then(|| {
                let distance = candidate.position.distance(origin);
                blast_damage(distance, spec.radius, spec.max_damage)
            });

            BlastHit {
                target: candidate.entity,
                damage,
                force,
            }
        })
        .collect()
}
