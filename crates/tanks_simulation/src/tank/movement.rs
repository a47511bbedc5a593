//! Движение танка: input sampling + drive (move / turn / turret turn)

use bevy::prelude::*;

use crate::components::{Dead, InputAxes, InputAxisNames, TankDrive, TankInput, TurretState};
use crate::geometry::{forward_of, yaw_rotation};

/// System: семплирование именованных осей в TankInput (Update, раз в кадр)
pub fn sample_tank_input(
    axes: Res<InputAxes>,
    mut tanks: Query<(&InputAxisNames, &mut TankInput), Without<Dead>>,
) {
    for (names, mut input) in tanks.iter_mut() {
        let sampled = axes.sample(names);
        if *input != sampled {
            *input = sampled;
        }
    }
}

/// System: движение танков (FixedUpdate)
///
/// - Move: смещение вдоль forward корпуса на `movement * speed * dt`
/// - Turn: поворот корпуса вокруг вертикали на `turn * turn_speed * dt`
/// - TurretTurn: ручной поворот башни на `turret_turn * turn_speed * dt`
///
/// Физику (коллизии) ведёт rapier, здесь только kinematic интеграция input.
pub fn drive_tanks(
    mut tanks: Query<(&TankInput, &TankDrive, &mut Transform, &mut TurretState), Without<Dead>>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();

    for (input, drive, mut transform, mut turret) in tanks.iter_mut() {
        let translation = input.movement * drive.speed * dt;
        if translation != 0.0 {
            let forward = forward_of(transform.rotation);
            transform.translation += forward * translation;
        }

        let rotation = input.turn * drive.turn_speed * dt;
        if rotation != 0.0 {
            transform.rotation = (transform.rotation * yaw_rotation(rotation)).normalize();
        }

        let turret_rotation = input.turret_turn * drive.turn_speed * dt;
        if turret_rotation != 0.0 {
            turret.rotate(turret_rotation);
        }
    }
}
