//! Sealing the cross-section exposed by a cut.

use nalgebra::{Point3, Vector3};

use crate::{Corner, MeshFragment, Plane, Polygon};

/// Points closer than this are treated as the same cap vertex.
pub const CAP_WELD_EPSILON: f32 = 1e-5;

/// Intersection points collected while splitting one fragment.
///
/// Neighbouring triangles share their crossing edges, so each crossing point
/// is usually reported twice. Near-duplicates are welded on insertion so the
/// ring contains every boundary point once.
#[derive(Debug, Clone, Default)]
pub struct CapRing {
    points: Vec<Point3<f32>>,
}

impl CapRing {
    /// An empty ring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a crossing point unless one within [`CAP_WELD_EPSILON`] is already in the ring.
    pub fn push(&mut self, point: Point3<f32>) {
        let eps_sq = CAP_WELD_EPSILON * CAP_WELD_EPSILON;
        if !self
            .points
            .iter()
            .any(|p| (p - point).norm_squared() <= eps_sq)
        {
            self.points.push(point);
        }
    }

    /// The welded points in insertion order.
    #[inline]
    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }

    /// Number of distinct points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no crossing was recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Seals a cut by fan-triangulating the cap points into `target`.
///
/// The points are ordered by their signed angle about the plane normal,
/// measured around their centroid from the first point. By default the cap
/// faces away from the plane normal, which is outward for the piece on the
/// positive side; `reverse_winding` flips it for the negative piece. Cap
/// corners get planar `(x, z)` UVs.
///
/// Fewer than 3 points leave the hole open.
pub fn fill_cap_hole(
    cap_points: &[Point3<f32>],
    plane: &Plane,
    target: &mut MeshFragment,
    reverse_winding: bool,
) {
    if cap_points.len() < 3 {
        log::trace!("Skipping cap with {} points", cap_points.len());
        return;
    }

    let ring = sort_around_centroid(cap_points, &plane.normal());
    let ordered: Vec<Corner> = if reverse_winding {
        ring.into_iter().map(Corner::planar).collect()
    } else {
        // Keep the apex first so both windings fan from the same point.
        let mut reversed: Vec<Corner> = ring.into_iter().map(Corner::planar).collect();
        reversed[1..].reverse();
        reversed
    };
    target.push_polygon(&Polygon::new(ordered));
}

/// Orders points counter-clockwise about `normal`, with angles measured from the first point.
fn sort_around_centroid(points: &[Point3<f32>], normal: &Vector3<f32>) -> Vec<Point3<f32>> {
    let sum: Vector3<f32> = points.iter().map(|p| p.coords).sum();
    let centroid = Point3::from(sum / points.len() as f32);

    let reference = points[0] - centroid;
    let u = (reference - normal * normal.dot(&reference))
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(|| any_perpendicular(normal));
    let v = normal.cross(&u);

    let angle = |p: &Point3<f32>| {
        let d = p - centroid;
        d.dot(&v).atan2(d.dot(&u))
    };

    let mut keyed: Vec<(f32, Point3<f32>)> = points.iter().map(|p| (angle(p), *p)).collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, p)| p).collect()
}

fn any_perpendicular(normal: &Vector3<f32>) -> Vector3<f32> {
    let axis = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    normal.cross(&axis).normalize()
}
