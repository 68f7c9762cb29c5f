//! Random cutting planes biased toward an impact point.

use nalgebra::{Point3, Vector3};

use crate::{Aabb, FractureRng, Plane, PlaneBias};

/// Generates the cutting plane for one cut iteration.
///
/// The plane point is pulled from the bounds center toward the impact point
/// by a random factor in `bias.impact_lerp`, then jittered inside a ball of
/// radius `bias.offset_factor * |bounds.extents|`, so cuts cluster around
/// the impact. The normal is a random direction blended toward the
/// impact-to-center direction by `bias.radial_weight`.
///
/// `cut_index` does not change the distribution; every iteration uses the
/// same bias.
pub fn generate_cutting_plane<R: FractureRng + ?Sized>(
    rng: &mut R,
    impact_point: Point3<f32>,
    bounds: &Aabb,
    cut_index: usize,
    bias: &PlaneBias,
) -> Plane {
    let (lerp_min, lerp_max) = bias.impact_lerp;
    let t = rng.next_float(lerp_min, lerp_max);
    let offset = rng.next_inside_sphere(bias.offset_factor * bounds.extents.norm());
    let point = bounds.center.lerp(&impact_point, t) + offset;

    let random = rng.next_unit_vector();
    let normal = match (bounds.center - impact_point).try_normalize(f32::EPSILON) {
        Some(radial) => blend_normal(random, radial, bias.radial_weight),
        None => random,
    };

    log::trace!("Cut {}: point {:?}, normal {:?}", cut_index, point, normal);
    Plane::from_point_and_normal(point, normal)
}

/// `normalize(lerp(random, radial, weight))`, falling back to `random` if
/// the two cancel out.
fn blend_normal(random: Vector3<f32>, radial: Vector3<f32>, weight: f32) -> Vector3<f32> {
    random
        .lerp(&radial, weight)
        .try_normalize(f32::EPSILON)
        .unwrap_or(random)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedRng;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn unit_bounds() -> Aabb {
        Aabb::new(Point3::origin(), Vector3::repeat(0.5))
    }

    #[test]
    fn scripted_plane_passes_through_lerped_point() {
        let mut rng = ScriptedRng::new(0.5, Vector3::x(), Vector3::zeros());
        let impact = Point3::new(2.0, 0.0, 0.0);
        let plane = generate_cutting_plane(&mut rng, impact, &unit_bounds(), 0, &PlaneBias::default());

        assert_relative_eq!(plane.signed_distance(Point3::new(1.0, 0.0, 0.0)), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn normal_leans_toward_radial_direction() {
        // Random direction straight up, radial direction is -X.
        let mut rng = ScriptedRng::new(0.5, Vector3::y(), Vector3::zeros());
        let impact = Point3::new(2.0, 0.0, 0.0);
        let plane = generate_cutting_plane(&mut rng, impact, &unit_bounds(), 0, &PlaneBias::default());

        let expected = Vector3::new(-0.3, 0.7, 0.0).normalize();
        assert_relative_eq!(plane.normal(), expected, epsilon = 1e-6);
    }

    #[test]
    fn impact_at_center_uses_random_normal() {
        let mut rng = ScriptedRng::new(0.5, Vector3::z(), Vector3::zeros());
        let plane = generate_cutting_plane(
            &mut rng,
            Point3::origin(),
            &unit_bounds(),
            0,
            &PlaneBias::default(),
        );
        assert_relative_eq!(plane.normal(), Vector3::z());
    }

    #[test]
    fn opposite_random_direction_still_gives_unit_normal() {
        let mut rng = ScriptedRng::new(0.5, Vector3::x(), Vector3::zeros());
        let impact = Point3::new(-2.0, 0.0, 0.0);
        let plane = generate_cutting_plane(&mut rng, impact, &unit_bounds(), 0, &PlaneBias::default());
        assert_relative_eq!(plane.normal().norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn random_planes_pass_near_impact_side() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = unit_bounds();
        let impact = Point3::new(0.5, 0.0, 0.0);
        let bias = PlaneBias::default();
        let max_offset = bias.offset_factor * bounds.extents.norm();

        for i in 0..50 {
            let plane = generate_cutting_plane(&mut rng, impact, &bounds, i, &bias);
            // The plane point lies in [0.15, 0.45] along X, jittered by at most `max_offset`.
            let segment_distance = [0.15_f32, 0.45]
                .map(|x| plane.signed_distance(Point3::new(x, 0.0, 0.0)).abs())
                .into_iter()
                .fold(f32::INFINITY, f32::min);
            assert!(
                segment_distance <= max_offset + 0.3 + 1e-5,
                "plane {i} strays too far from the impact segment"
            );
            assert_relative_eq!(plane.normal().norm(), 1.0, epsilon = 1e-5);
        }
    }
}
