//! Геометрия горизонтальной плоскости (XZ)
//!
//! Соглашения:
//! - Forward = -Z (Bevy), вертикальная ось = +Y
//! - Положительный угол (yaw, bearing) = по часовой стрелке если смотреть сверху,
//!   т.е. "вправо" относительно forward
//!
//! Всё здесь — чистые функции без ECS (используются targeting, aim и combat).

use bevy::prelude::*;

/// Проекция на горизонтальную плоскость (Y = 0)
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Дистанция в плоскости XZ (высота игнорируется)
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(b - a).length()
}

/// Forward вектор для заданного поворота (-Z в локальных координатах)
pub fn forward_of(rotation: Quat) -> Vec3 {
    rotation * Vec3::NEG_Z
}

/// Поворот вокруг вертикали на `yaw_degrees` (положительный = вправо)
pub fn yaw_rotation(yaw_degrees: f32) -> Quat {
    Quat::from_rotation_y(-yaw_degrees.to_radians())
}

/// Нормализует угол в диапазон (-180, 180]
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Signed horizontal bearing от `forward` к `to_target`, градусы [-180, 180].
///
/// Модуль = угол между векторами, знак берётся из вертикальной компоненты
/// cross(forward, to_target). В right-handed системе Bevy цель справа даёт
/// `cross.y < 0`, поэтому такой bearing положительный.
///
/// Вырожденные случаи (нулевой forward или цель в той же точке) → 0.
pub fn signed_bearing_degrees(forward: Vec3, to_target: Vec3) -> f32 {
    let forward = flatten(forward);
    let to_target = flatten(to_target);

    if forward.length_squared() <= f32::EPSILON || to_target.length_squared() <= f32::EPSILON {
        return 0.0;
    }

    let unsigned = forward.angle_between(to_target).to_degrees();
    let axis = forward.cross(to_target);

    if axis.y > 0.0 {
        -unsigned
    } else {
        unsigned
    }
}

/// Линейный falloff: 1.0 в центре → 0.0 на `radius` и дальше.
///
/// Радиус <= 0 (или NaN дистанция) даёт 0, не NaN.
pub fn linear_falloff(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 || distance.is_nan() {
        return 0.0;
    }

    ((radius - distance) / radius).clamp(0.0, 1.0)
}

/// Импульс взрыва для тела в `body_position`.
///
/// Величина = `force * falloff(distance)`, направление от `origin` к телу.
/// Если тело точно в центре — толкаем вверх. За радиусом — ноль.
pub fn explosion_impulse(force: f32, origin: Vec3, radius: f32, body_position: Vec3) -> Vec3 {
    let offset = body_position - origin;
    let falloff = linear_falloff(offset.length(), radius);

    if falloff <= 0.0 {
        return Vec3::ZERO;
    }

    let direction = offset.try_normalize().unwrap_or(Vec3::Y);
    direction * force * falloff
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-2;

    #[test]
    fn test_planar_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 50.0, 4.0);
        assert!((planar_distance(a, b) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_bearing_sign_convention() {
        let forward = Vec3::NEG_Z;

        let right = signed_bearing_degrees(forward, Vec3::X);
        let left = signed_bearing_degrees(forward, Vec3::NEG_X);
        let ahead = signed_bearing_degrees(forward, Vec3::new(0.0, 0.0, -10.0));

        assert!((right - 90.0).abs() < EPS, "right = {}", right);
        assert!((left + 90.0).abs() < EPS, "left = {}", left);
        assert!(ahead.abs() < EPS, "ahead = {}", ahead);
    }

    #[test]
    fn test_bearing_diagonal_and_height() {
        // Цель справа-впереди под 45°, высота не влияет
        let bearing = signed_bearing_degrees(Vec3::NEG_Z, Vec3::new(5.0, 3.0, -5.0));
        assert!((bearing - 45.0).abs() < EPS, "bearing = {}", bearing);
    }

    #[test]
    fn test_bearing_degenerate_is_zero() {
        assert_eq!(signed_bearing_degrees(Vec3::NEG_Z, Vec3::ZERO), 0.0);
        assert_eq!(signed_bearing_degrees(Vec3::Y, Vec3::X), 0.0);
    }

    #[test]
    fn test_yaw_rotation_matches_bearing_sign() {
        // yaw +90 → forward смотрит вправо (+X), bearing к +X становится 0
        let forward = forward_of(yaw_rotation(90.0));
        assert!((forward - Vec3::X).length() < EPS, "forward = {:?}", forward);
        assert!(signed_bearing_degrees(forward, Vec3::X).abs() < EPS);
    }

    #[test]
    fn test_wrap_degrees() {
        assert!((wrap_degrees(190.0) + 170.0).abs() < EPS);
        assert!((wrap_degrees(-190.0) - 170.0).abs() < EPS);
        assert!((wrap_degrees(-180.0) - 180.0).abs() < EPS);
        assert!((wrap_degrees(540.0) - 180.0).abs() < EPS);
        assert!((wrap_degrees(45.0) - 45.0).abs() < EPS);
    }

    #[test]
    fn test_linear_falloff_edges() {
        assert_eq!(linear_falloff(0.0, 5.0), 1.0);
        assert_eq!(linear_falloff(2.5, 5.0), 0.5);
        assert_eq!(linear_falloff(5.0, 5.0), 0.0);
        assert_eq!(linear_falloff(7.0, 5.0), 0.0);
        assert_eq!(linear_falloff(1.0, 0.0), 0.0);
        assert_eq!(linear_falloff(f32::NAN, 5.0), 0.0);
    }

    #[test]
    fn test_explosion_impulse_direction_and_falloff() {
        let impulse = explosion_impulse(1000.0, Vec3::ZERO, 5.0, Vec3::new(2.5, 0.0, 0.0));
        assert!((impulse - Vec3::new(500.0, 0.0, 0.0)).length() < EPS);

        let centred = explosion_impulse(1000.0, Vec3::ZERO, 5.0, Vec3::ZERO);
        assert!((centred - Vec3::new(0.0, 1000.0, 0.0)).length() < EPS);

        let outside = explosion_impulse(1000.0, Vec3::ZERO, 5.0, Vec3::new(6.0, 0.0, 0.0));
        assert_eq!(outside, Vec3::ZERO);
    }
}
