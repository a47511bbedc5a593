//! Башня и параметры шасси

use bevy::prelude::*;

use crate::config::TankTuning;
use crate::geometry::{forward_of, wrap_degrees, yaw_rotation};

/// Состояние башни (owned, меняется только через drive/aim системы)
///
/// `yaw` — поворот башни относительно корпуса, градусы, положительный = вправо.
/// yaw = 0 означает что башня смотрит туда же куда корпус.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct TurretState {
    pub yaw: f32,
}

impl TurretState {
    /// Поворот башни на `delta` градусов (результат нормализуется в (-180, 180])
    pub fn rotate(&mut self, delta: f32) {
        self.yaw = wrap_degrees(self.yaw + delta);
    }

    /// Выровнять башню по корпусу
    pub fn reset(&mut self) {
        self.yaw = 0.0;
    }

    /// World rotation башни для корпуса с `hull_rotation`
    pub fn world_rotation(&self, hull_rotation: Quat) -> Quat {
        hull_rotation * yaw_rotation(self.yaw)
    }

    /// World forward башни
    pub fn forward(&self, hull_rotation: Quat) -> Vec3 {
        forward_of(self.world_rotation(hull_rotation))
    }
}

/// Параметры движения танка (скорость, скорость поворота)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TankDrive {
    /// units/sec
    pub speed: f32,
    /// degrees/sec (корпус и башня)
    pub turn_speed: f32,
}

impl Default for TankDrive {
    fn default() -> Self {
        Self::from_tuning(&TankTuning::default())
    }
}

impl TankDrive {
    pub fn from_tuning(tuning: &TankTuning) -> Self {
        Self {
            speed: tuning.speed,
            turn_speed: tuning.turn_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turret_forward_follows_hull_and_yaw() {
        let mut turret = TurretState::default();
        let hull = Quat::IDENTITY;

        assert!((turret.forward(hull) - Vec3::NEG_Z).length() < 1e-4);

        turret.rotate(90.0);
        assert!((turret.forward(hull) - Vec3::X).length() < 1e-4);

        // Корпус повернут вправо на 90 → башня (+90 относительно корпуса) смотрит назад
        let hull_right = yaw_rotation(90.0);
        assert!((turret.forward(hull_right) - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn test_turret_rotate_wraps() {
        let mut turret = TurretState { yaw: 170.0 };
        turret.rotate(20.0);
        assert!((turret.yaw + 170.0).abs() < 1e-3);

        turret.reset();
        assert_eq!(turret.yaw, 0.0);
    }

    #[test]
    fn test_drive_from_tuning() {
        let drive = TankDrive::default();
        assert_eq!(drive.speed, 12.0);
        assert_eq!(drive.turn_speed, 180.0);
    }
}
