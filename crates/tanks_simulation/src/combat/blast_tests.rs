//! Tests for BlastResolver.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use proptest::prelude::*;

    use crate::combat::{blast_damage, resolve_blast, BlastCandidate, BlastSpec};
    use crate::config::ShellTuning;

    fn default_blast() -> BlastSpec {
        BlastSpec::from_tuning(&ShellTuning::default())
    }

    fn candidate(id: u32, x: f32, has_body: bool, damageable: bool) -> BlastCandidate {
        BlastCandidate {
            entity: Entity::from_raw(id),
            position: Vec3::new(x, 0.0, 0.0),
            has_body,
            damageable,
        }
    }

    #[test]
    fn test_half_radius_is_half_damage() {
        // radius 5, max 100, distance 2.5 → 50
        assert!((blast_damage(2.5, 5.0, 100.0) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_edge_of_radius_is_zero_not_negative() {
        assert_eq!(blast_damage(5.0, 5.0, 100.0), 0.0);
        assert_eq!(blast_damage(9.0, 5.0, 100.0), 0.0);
    }

    #[test]
    fn test_epicentre_is_max_damage() {
        assert_eq!(blast_damage(0.0, 5.0, 100.0), 100.0);
    }

    #[test]
    fn test_resolve_gates_force_and_damage_independently() {
        let candidates = [
            candidate(1, 2.5, true, true),
            candidate(2, 1.0, true, false), // ящик: только сила
            candidate(3, 1.0, false, true), // без тела: только урон
            candidate(4, 1.0, false, false), // ни того ни другого
        ];

        let hits = resolve_blast(&default_blast(), Vec3::ZERO, &candidates);
        assert_eq!(hits.len(), 3);

        assert_eq!(hits[0].target, Entity::from_raw(1));
        assert!((hits[0].damage.expect("damageable") - 50.0).abs() < 1e-4);
        let force = hits[0].force.expect("has body");
        assert_eq!(force.force, 1000.0);
        assert_eq!(force.radius, 5.0);
        assert_eq!(force.origin, Vec3::ZERO);

        assert_eq!(hits[1].target, Entity::from_raw(2));
        assert!(hits[1].damage.is_none());
        assert!(hits[1].force.is_some());

        assert_eq!(hits[2].target, Entity::from_raw(3));
        assert!(hits[2].force.is_none());
        assert!((hits[2].damage.expect("damageable") - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_candidate_on_radius_still_gets_zero_damage_hit() {
        let hits = resolve_blast(&default_blast(), Vec3::ZERO, &[candidate(1, 5.0, true, true)]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].damage, Some(0.0));
    }

    #[test]
    fn test_no_candidates_no_hits() {
        assert!(resolve_blast(&default_blast(), Vec3::ONE, &[]).is_empty());
    }

    #[test]
    fn test_distance_is_three_dimensional() {
        let above = BlastCandidate {
            entity: Entity::from_raw(1),
            position: Vec3::new(0.0, 3.0, 4.0),
            has_body: false,
            damageable: true,
        };

        let hits = resolve_blast(&default_blast(), Vec3::ZERO, &[above]);
        assert_eq!(hits[0].damage, Some(0.0));
    }

    proptest! {
        #[test]
        fn prop_damage_bounded_and_non_increasing(
            a in 0.0f32..20.0,
            b in 0.0f32..20.0,
            radius in 0.1f32..15.0,
            max_damage in 0.0f32..500.0,
        ) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            let near_damage = blast_damage(near, radius, max_damage);
            let far_damage = blast_damage(far, radius, max_damage);

            prop_assert!(near_damage >= 0.0 && near_damage <= max_damage);
            prop_assert!(far_damage >= 0.0 && far_damage <= max_damage);
            prop_assert!(near_damage >= far_damage);

            if far >= radius {
                prop_assert_eq!(far_damage, 0.0);
            }
        }
    }
}
