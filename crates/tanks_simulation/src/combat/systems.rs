//! Combat systems: выстрел, триггеры детонации, применение взрыва

use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionEvent, ExternalImpulse};

use crate::combat::{
    resolve_blast, spawn_shell, BlastHit, Cannon, DetonationCause, FireShellIntent, OverlapQuery,
    Shell, ShellConsumed, ShellDetonated, ShellImpact, SphereOverlap,
};
use crate::components::{Dead, Tank, TurretState};
use crate::config::CombatConfig;
use crate::geometry::explosion_impulse;
use crate::logger;

/// System: FireShellIntent → spawn снаряда из башни
///
/// Снаряд появляется перед корпусом по направлению башни и летит со скоростью
/// `turret_forward * launch_speed`. Лимит — `max_shells_in_flight`.
pub fn fire_shells(
    mut commands: Commands,
    mut intents: EventReader<FireShellIntent>,
    mut tanks: Query<(&Transform, &TurretState, &mut Cannon), Without<Dead>>,
    config: Res<CombatConfig>,
) {
    for intent in intents.read() {
        let Ok((transform, turret, mut cannon)) = tanks.get_mut(intent.tank) else {
            continue;
        };

        if !cannon.can_fire() {
            logger::log(&format!(
                "🚫 {:?} cannot fire: {} shells already in flight",
                intent.tank, cannon.shells_in_flight
            ));
            continue;
        }

        let forward = turret.forward(transform.rotation);
        let muzzle_offset = config.tank.hull_radius + config.shell.collision_radius * 2.0;
        let position = transform.translation + forward * muzzle_offset;

        let shell = spawn_shell(
            &mut commands,
            intent.tank,
            position,
            forward * cannon.launch_speed,
            &config.shell,
        );
        cannon.shell_fired();

        logger::log(&format!("🔫 {:?} fired shell {:?}", intent.tank, shell));
    }
}

/// System: rapier CollisionEvent::Started → ShellImpact
pub fn forward_rapier_contacts(
    mut collisions: EventReader<CollisionEvent>,
    shells: Query<(), With<Shell>>,
    mut impacts: EventWriter<ShellImpact>,
) {
    for collision in collisions.read() {
        let CollisionEvent::Started(a, b, _) = collision else {
            continue;
        };

        for (shell, other) in [(*a, *b), (*b, *a)] {
            if shells.contains(shell) {
                impacts.write(ShellImpact { shell, other });
            }
        }
    }
}

/// System: снаряды, чей owner despawned, уничтожаются вместе с ним
///
/// Fuse отменяется до despawn, ShellDetonated/ShellConsumed не будет.
/// Уничтоженный (Dead) owner остаётся entity: его снаряды живут, fuse тикает.
pub fn release_orphaned_shells(
    mut commands: Commands,
    mut shells: Query<(Entity, &mut Shell)>,
    owners: Query<(), With<Tank>>,
) {
    for (entity, mut shell) in shells.iter_mut() {
        if !shell.is_armed() || owners.contains(shell.owner) {
            continue;
        }

        shell.fuse_mut().cancel();
        commands.entity(entity).despawn();

        logger::log(&format!(
            "⏹️ Shell {:?} released: owner {:?} despawned",
            entity, shell.owner
        ));
    }
}

/// System: детонация по попаданию ИЛИ по timeout (кто первый)
///
/// В пределах tick сначала обрабатываются impacts, потом fuse.
/// `Shell::try_begin` гарантирует ровно один ShellDetonated на снаряд.
pub fn detonate_shells(
    mut impacts: EventReader<ShellImpact>,
    mut shells: Query<(Entity, &Transform, &mut Shell)>,
    overlap: SphereOverlap,
    time: Res<Time<Fixed>>,
    mut detonations: EventWriter<ShellDetonated>,
) {
    for impact in impacts.read() {
        let Ok((entity, transform, mut shell)) = shells.get_mut(impact.shell) else {
            continue;
        };

        // Снаряд стартует рядом с корпусом стрелка
        if impact.other == shell.owner {
            continue;
        }

        if shell.try_begin() {
            detonations.write(detonate(entity, transform.translation, &shell, DetonationCause::Impact, &overlap));
        }
    }

    for (entity, transform, mut shell) in shells.iter_mut() {
        if !shell.is_armed() {
            continue;
        }

        if shell.fuse_mut().tick(time.delta()) && shell.try_begin() {
            detonations.write(detonate(entity, transform.translation, &shell, DetonationCause::Timeout, &overlap));
        }
    }
}

fn detonate(
    entity: Entity,
    origin: Vec3,
    shell: &Shell,
    cause: DetonationCause,
    overlap: &impl OverlapQuery,
) -> ShellDetonated {
    let candidates = overlap.overlap_sphere(origin, shell.blast.radius, shell.blast.layer_mask);
    let hits: Vec<BlastHit> = resolve_blast(&shell.blast, origin, &candidates);

    logger::log(&format!(
        "💥 Shell {:?} detonated ({:?}) at {:.1?}: {} bodies hit",
        entity,
        cause,
        origin,
        hits.len()
    ));

    ShellDetonated {
        shell: entity,
        owner: shell.owner,
        origin,
        cause,
        hits,
    }
}

/// System: ForceDirective → rapier ExternalImpulse
///
/// Импульс = explosion force с линейным falloff, отнесённый к fixed timestep.
pub fn apply_blast_impulses(
    mut commands: Commands,
    mut detonations: EventReader<ShellDetonated>,
    mut bodies: Query<(&Transform, Option<&mut ExternalImpulse>)>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();

    for detonation in detonations.read() {
        for hit in &detonation.hits {
            let Some(directive) = hit.force else {
                continue;
            };

            let Ok((transform, external)) = bodies.get_mut(hit.target) else {
                continue;
            };

            let impulse = explosion_impulse(
                directive.force,
                directive.origin,
                directive.radius,
                transform.translation,
            ) * dt;

            match external {
                Some(mut external) => external.impulse += impulse,
                None => {
                    commands.entity(hit.target).insert(ExternalImpulse {
                        impulse,
                        torque_impulse: Vec3::ZERO,
                    });
                }
            }
        }
    }
}

/// System: ShellConsumed owner'у (ровно один раз на снаряд)
///
/// Owner, которого уже нет, уведомление не получает.
pub fn notify_shell_owners(
    mut detonations: EventReader<ShellDetonated>,
    mut owners: Query<&mut Cannon>,
    mut consumed: EventWriter<ShellConsumed>,
) {
    for detonation in detonations.read() {
        let Ok(mut cannon) = owners.get_mut(detonation.owner) else {
            logger::log_warning(&format!(
                "Shell {:?} owner {:?} no longer exists, skipping ShellConsumed",
                detonation.shell, detonation.owner
            ));
            continue;
        };

        cannon.shell_consumed();
        consumed.write(ShellConsumed {
            owner: detonation.owner,
            shell: detonation.shell,
        });
    }
}

/// System: Resolving → Resolved, despawn снаряда
pub fn release_consumed_shells(
    mut commands: Commands,
    mut detonations: EventReader<ShellDetonated>,
    mut shells: Query<&mut Shell>,
) {
    for detonation in detonations.read() {
        let Ok(mut shell) = shells.get_mut(detonation.shell) else {
            continue;
        };

        shell.finish();
        commands.entity(detonation.shell).despawn();
    }
}
