//! Overlap query: все тела, пересекающие сферу взрыва, с фильтром по слоям
//!
//! Broad-phase: brute force sphere-vs-sphere по CollisionSphere, без rapier QueryPipeline.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::geometry::Group;
use bevy_rapier3d::prelude::{CollisionGroups, RigidBody};

use crate::combat::BlastCandidate;
use crate::components::{Dead, Health};

/// Объём тела для overlap query (сфера вокруг Transform.translation)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CollisionSphere {
    pub radius: f32,
}

impl CollisionSphere {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

/// Capability: "дай все тела, пересекающие сферу, на этих слоях"
pub trait OverlapQuery {
    fn overlap_sphere(&self, center: Vec3, radius: f32, layer_mask: u32) -> Vec<BlastCandidate>;
}

/// Пересекаются ли сфера взрыва и сфера тела (касание не считается)
pub fn spheres_intersect(center: Vec3, radius: f32, body_position: Vec3, body_radius: f32) -> bool {
    center.distance(body_position) < radius + body_radius
}

/// Проходит ли тело фильтр слоёв. Без CollisionGroups тело во всех слоях.
pub fn matches_layer(groups: Option<&CollisionGroups>, layer_mask: u32) -> bool {
    let memberships = groups.map(|groups| groups.memberships).unwrap_or(Group::ALL);
    memberships.intersects(Group::from_bits_truncate(layer_mask))
}

/// ECS реализация OverlapQuery поверх CollisionSphere + rapier CollisionGroups
///
/// Уничтоженные (Dead) танки отключены и в запрос не попадают.
#[derive(SystemParam)]
pub struct SphereOverlap<'w, 's> {
    bodies: Query<
        'w,
        's,
        (
            Entity,
            &'static Transform,
            &'static CollisionSphere,
            Option<&'static CollisionGroups>,
            Has<RigidBody>,
            Has<Health>,
        ),
        Without<Dead>,
    >,
}

impl OverlapQuery for SphereOverlap<'_, '_> {
    fn overlap_sphere(&self, center: Vec3, radius: f32, layer_mask: u32) -> Vec<BlastCandidate> {
        let mut candidates: Vec<BlastCandidate> = self
            .bodies
            .iter()
            .filter(|(_, transform, sphere, groups, _, _)| {
                matches_layer(*groups, layer_mask)
                    && spheres_intersect(center, radius, transform.translation, sphere.radius)
            })
            .map(|(entity, transform, _, _, has_body, has_health)| BlastCandidate {
                entity,
                position: transform.translation,
                has_body,
                damageable: has_health,
            })
            .collect();

        // Детерминированный порядок
        candidates.sort_by_key(|candidate| candidate.entity);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spheres_intersect() {
        assert!(spheres_intersect(Vec3::ZERO, 5.0, Vec3::new(5.5, 0.0, 0.0), 1.0));
        assert!(!spheres_intersect(Vec3::ZERO, 5.0, Vec3::new(6.0, 0.0, 0.0), 1.0));
        assert!(!spheres_intersect(Vec3::ZERO, 5.0, Vec3::new(0.0, 7.0, 0.0), 1.0));
    }

    #[test]
    fn test_layer_filter() {
        let tanks = CollisionGroups::new(Group::GROUP_1, Group::ALL);
        let scenery = CollisionGroups::new(Group::GROUP_3, Group::ALL);
        let mask = Group::GROUP_1.bits();

        assert!(matches_layer(Some(&tanks), mask));
        assert!(!matches_layer(Some(&scenery), mask));
        // Нет CollisionGroups → rapier default (все слои)
        assert!(matches_layer(None, mask));
    }

    #[test]
    fn test_sphere_overlap_system_param() {
        let mut world = World::new();

        let tank = world
            .spawn((
                Transform::from_xyz(2.0, 0.0, 0.0),
                CollisionSphere::new(1.0),
                CollisionGroups::new(Group::GROUP_1, Group::ALL),
                RigidBody::Dynamic,
                Health::new(100.0),
            ))
            .id();
        let crate_box = world
            .spawn((Transform::from_xyz(-1.0, 0.0, 0.0), CollisionSphere::new(0.5), RigidBody::Dynamic))
            .id();
        // Другой слой
        world.spawn((
            Transform::from_xyz(0.0, 0.0, 1.0),
            CollisionSphere::new(1.0),
            CollisionGroups::new(Group::GROUP_2, Group::ALL),
            Health::new(100.0),
        ));
        // Слишком далеко
        world.spawn((Transform::from_xyz(40.0, 0.0, 0.0), CollisionSphere::new(1.0), Health::new(100.0)));
        // Мёртвый танк
        world.spawn((Transform::from_xyz(0.5, 0.0, 0.0), CollisionSphere::new(1.0), Health::new(0.0), Dead));

        let mut state = bevy::ecs::system::SystemState::<SphereOverlap>::new(&mut world);
        let overlap = state.get(&world);
        let candidates = overlap.overlap_sphere(Vec3::ZERO, 5.0, Group::GROUP_1.bits());

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].entity, tank);
        assert!(candidates[0].has_body && candidates[0].damageable);
        assert_eq!(candidates[1].entity, crate_box);
        assert!(candidates[1].has_body && !candidates[1].damageable);
    }
}
