//! Enable/disable lifecycle танка

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::components::{Dead, Tank, TankInput, TurretState};
use crate::logger;
use crate::targeting::TargetingState;

/// System: только что заспавненный танк стартует с чистым input и без цели
pub fn reset_spawned_tanks(
    mut tanks: Query<(&mut TankInput, &mut TargetingState), Added<Tank>>,
) {
    for (mut input, mut targeting) in tanks.iter_mut() {
        input.clear();
        targeting.clear();
    }
}

/// System: отключение уничтоженного танка
///
/// - Башня выравнивается по корпусу
/// - Input и захват цели сбрасываются
/// - Velocity обнуляется (танк перестаёт двигаться)
pub fn disable_dead_tanks(
    mut tanks: Query<
        (
            Entity,
            &mut TurretState,
            &mut TankInput,
            &mut TargetingState,
            Option<&mut Velocity>,
        ),
        Added<Dead>,
    >,
) {
    for (entity, mut turret, mut input, mut targeting, velocity) in tanks.iter_mut() {
        turret.reset();
        input.clear();
        targeting.clear();

        if let Some(mut velocity) = velocity {
            *velocity = Velocity::zero();
        }

        logger::log_info(&format!("Disabled dead tank {:?}", entity));
    }
}
