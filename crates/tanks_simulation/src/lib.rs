//! Tanks Simulation Core
//!
//! ECS-симуляция танкового боя на Bevy 0.16:
//! - targeting: захват ближайшего врага + signed bearing
//! - aim: доводка башни (auto-lock + ручной aim)
//! - combat: снаряды, детонация (impact/timeout), BlastResolver, урон
//! - tank: движение, lifecycle, звук двигателя, camera rig
//!
//! Физика (rapier) — внешняя capability: RigidBody, CollisionEvent, ExternalImpulse.
//! Рендер, звук, партиклы — снаружи, по событиям.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod aim;
pub mod combat;
pub mod components;
pub mod config;
pub mod geometry;
pub mod logger;
pub mod tank;
pub mod targeting;

// Re-export базовых типов для удобства
pub use aim::{aim_turrets, compute_turret_delta};
pub use combat::{
    blast_damage, resolve_blast, BlastCandidate, BlastHit, BlastSpec, Cannon, CollisionSphere, CombatPlugin,
    DamageDealt, DetonationCause, EntityDied, ExplosionEffect, ExplosionTriggered, FireShellIntent,
    ForceDirective, Shell, ShellConsumed, ShellDetonated, ShellImpact, ShellState,
};
pub use components::*;
pub use config::{CombatConfig, ConfigError, ShellTuning, TankTuning, TANK_LAYER};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use tank::{spawn_tank, CameraRig, EngineAudio, EngineClip, EngineClipChanged, TankPlugin};
pub use targeting::{
    acquire_target, find_nearest_enemy, EnemyRoster, EnemySighting, TargetChanged, TargetLock, TargetingState,
};

/// Фазы fixed tick
///
/// Tanks (targeting, движение, aim) → Combat (снаряды, взрывы) → Lifecycle (смерть).
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Tanks,
    Combat,
    Lifecycle,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Берёт CombatConfig из мира (или default) — вставьте конфиг до add_plugins.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatConfig>();
        let fixed_hz = app.world().resource::<CombatConfig>().fixed_hz;

        app
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(fixed_hz))
            .configure_sets(
                FixedUpdate,
                (SimulationSet::Tanks, SimulationSet::Combat, SimulationSet::Lifecycle).chain(),
            )
            // Подсистемы
            .add_plugins((TankPlugin, CombatPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную: каждый `app.update()` (кроме первого, у которого
/// delta = 0) продвигает мир ровно на один fixed tick.
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_hz(seed, CombatConfig::default().fixed_hz)
}

fn create_headless_app_with_hz(seed: u64, fixed_hz: f64) -> App {
    let mut app = App::new();
    init_logger();

    let fixed = Time::<Fixed>::from_hz(fixed_hz);
    let step = fixed.timestep();

    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(fixed)
        .insert_resource(TimeUpdateStrategy::ManualDuration(step));

    app
}

/// Headless App с полной combat-симуляцией и провалидированным конфигом
pub fn create_combat_app(seed: u64, config: CombatConfig) -> Result<App, ConfigError> {
    if let Err(err) = config.validate() {
        logger::log_error(&format!("Invalid combat config: {}", err));
        return Err(err);
    }

    let mut app = create_headless_app_with_hz(seed, config.fixed_hz);
    app.insert_resource(config).add_plugins(SimulationPlugin);

    Ok(app)
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
