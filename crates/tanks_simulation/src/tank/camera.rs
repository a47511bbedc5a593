//! Camera rig, который следует за башней танка
//!
//! Рендер внешний; rig — просто Transform, который сглаженно догоняет башню.

use bevy::prelude::*;

use crate::components::TurretState;

/// Коэффициент сглаживания за fixed tick
pub const CAMERA_RIG_SMOOTHING: f32 = 0.3;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    /// Танк, за башней которого следует rig
    pub turret_of: Entity,
    pub smoothing: f32,
}

impl CameraRig {
    pub fn new(turret_of: Entity) -> Self {
        Self {
            turret_of,
            smoothing: CAMERA_RIG_SMOOTHING,
        }
    }
}

/// System: rig догоняет башню (lerp позиции, slerp поворота)
///
/// В первый tick после добавления rig прыгает в позу башни без сглаживания.
pub fn follow_turret_with_camera_rig(
    mut rigs: Query<(Ref<CameraRig>, &mut Transform)>,
    turrets: Query<(&Transform, &TurretState), Without<CameraRig>>,
) {
    for (rig, mut transform) in rigs.iter_mut() {
        let Ok((hull, turret)) = turrets.get(rig.turret_of) else {
            continue;
        };

        let target_position = hull.translation;
        let target_rotation = turret.world_rotation(hull.rotation);

        if rig.is_added() {
            transform.translation = target_position;
            transform.rotation = target_rotation;
            continue;
        }

        transform.translation = transform.translation.lerp(target_position, rig.smoothing);
        transform.rotation = transform.rotation.slerp(target_rotation, rig.smoothing);
    }
}
