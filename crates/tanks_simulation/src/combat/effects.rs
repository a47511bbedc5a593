//! Визуальный/звуковой эффект взрыва
//!
//! Партиклы и звук проигрываются снаружи по ExplosionTriggered.
//! Симуляция держит только entity эффекта и убирает его по таймеру.

use bevy::prelude::*;

use crate::combat::ShellDetonated;
use crate::config::CombatConfig;

/// Эффект взрыва (живёт `effect_duration` секунд)
#[derive(Component, Debug, Clone)]
pub struct ExplosionEffect {
    pub timer: Timer,
}

impl ExplosionEffect {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(duration_secs, TimerMode::Once),
        }
    }
}

/// Event: проиграть взрыв в точке (particles + audio)
#[derive(Event, Debug, Clone)]
pub struct ExplosionTriggered {
    pub shell: Entity,
    pub effect: Entity,
    pub origin: Vec3,
}

/// System: спавн эффекта на каждый взрыв
pub fn spawn_explosion_effects(
    mut commands: Commands,
    mut detonations: EventReader<ShellDetonated>,
    mut triggered: EventWriter<ExplosionTriggered>,
    config: Res<CombatConfig>,
) {
    for detonation in detonations.read() {
        let effect = commands
            .spawn((
                ExplosionEffect::new(config.shell.effect_duration),
                Transform::from_translation(detonation.origin),
            ))
            .id();

        triggered.write(ExplosionTriggered {
            shell: detonation.shell,
            effect,
            origin: detonation.origin,
        });
    }
}

/// System: деспавн эффектов с истёкшим временем
pub fn expire_explosion_effects(
    mut commands: Commands,
    mut effects: Query<(Entity, &mut ExplosionEffect)>,
    time: Res<Time<Fixed>>,
) {
    for (entity, mut effect) in effects.iter_mut() {
        effect.timer.tick(time.delta());

        if effect.timer.finished() {
            commands.entity(entity).despawn();
        }
    }
}
