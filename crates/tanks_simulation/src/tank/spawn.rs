//! Spawn танка со всеми компонентами (ECS + rapier тело)

use bevy::prelude::*;
use bevy_rapier3d::geometry::Group;
use bevy_rapier3d::prelude::*;

use crate::combat::{Cannon, CollisionSphere};
use crate::components::{Health, InputAxisNames, Tank, TankDrive};
use crate::config::{CombatConfig, TANK_LAYER};
use crate::geometry::yaw_rotation;
use crate::logger;
use crate::tank::EngineAudio;
use crate::targeting::TargetingState;

/// Spawn танка игрока `player_number` в `position`, корпус повернут на `yaw_degrees`
///
/// Тело: dynamic rigid body на слое танков (TANK_LAYER), сфера `hull_radius`
/// (rapier collider + CollisionSphere для overlap query взрыва).
pub fn spawn_tank(
    commands: &mut Commands,
    player_number: u32,
    position: Vec3,
    yaw_degrees: f32,
    config: &CombatConfig,
) -> Entity {
    let tuning = &config.tank;

    let entity = commands
        .spawn((
            Tank::new(player_number),
            Transform::from_translation(position).with_rotation(yaw_rotation(yaw_degrees)),
            Health::new(tuning.max_health),
            TankDrive::from_tuning(tuning),
            TargetingState::with_radius(tuning.search_radius),
            Cannon::from_tuning(tuning),
            InputAxisNames::for_player(player_number),
            EngineAudio::from_tuning(tuning),
        ))
        .insert((
            RigidBody::Dynamic,
            Collider::ball(tuning.hull_radius),
            CollisionSphere::new(tuning.hull_radius),
            CollisionGroups::new(Group::from_bits_truncate(TANK_LAYER), Group::ALL),
            Velocity::zero(),
            ExternalImpulse::default(),
            LockedAxes::ROTATION_LOCKED_X | LockedAxes::ROTATION_LOCKED_Z,
        ))
        .id();

    logger::log_info(&format!(
        "Spawned tank {:?} for player {} at {:?}",
        entity, player_number, position
    ));

    entity
}
