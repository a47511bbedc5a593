//! AimController — доводка башни к захваченной цели
//!
//! Ручная ось `aim` выражается относительно цели, а не абсолютно влево/вправо:
//! если цель слева (bearing < 0), ось инвертируется. Положительный aim всегда
//! тянет башню К цели, так что ручная доводка и auto-lock не мешают друг другу.
//!
//! bearing == 0 (цели нет или башня уже смотрит на цель) → этот путь молчит,
//! остаётся только ручной поворот башни (drive_tanks).

use bevy::prelude::*;

use crate::components::{Dead, TankDrive, TankInput, TurretState};
use crate::targeting::TargetingState;

/// Rotation delta башни за tick (градусы, положительный = вправо)
pub fn compute_turret_delta(manual_aim_axis: f32, bearing_degrees: f32, turn_speed: f32, dt: f32) -> f32 {
    if bearing_degrees == 0.0 {
        return 0.0;
    }

    let effective_aim = if bearing_degrees < 0.0 {
        -manual_aim_axis
    } else {
        manual_aim_axis
    };

    effective_aim * turn_speed * dt
}

/// System: применить AimController к башням (FixedUpdate, после drive_tanks)
pub fn aim_turrets(
    mut tanks: Query<(&TankInput, &TankDrive, &TargetingState, &mut TurretState), Without<Dead>>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();

    for (input, drive, targeting, mut turret) in tanks.iter_mut() {
        let delta = compute_turret_delta(input.aim, targeting.bearing_degrees, drive.turn_speed, dt);

        if delta != 0.0 {
            turret.rotate(delta);
        }
    }
}
