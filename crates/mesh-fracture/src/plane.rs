//! Cutting plane representation.

use nalgebra::{Point3, Vector3};

/// Which side of a plane a point lies on.
///
/// There is no "on plane" class: points exactly on the plane count as
/// positive, so every corner of a triangle lands on exactly one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Signed distance is zero or positive (same side as the normal).
    Positive,
    /// Signed distance is negative.
    Negative,
}

/// A plane in 3D space, represented as `normal · point = offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vector3<f32>,
    offset: f32,
}

impl Plane {
    /// Creates a new plane from a normal vector and offset.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn new(normal: Vector3<f32>, offset: f32) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        Self {
            normal: normal / norm,
            offset: offset / norm,
        }
    }

    /// Creates a plane from a point on the plane and a normal vector.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        let unit_normal = normal / norm;
        let offset = unit_normal.dot(&point.coords);
        Self {
            normal: unit_normal,
            offset,
        }
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is on the side the normal points to
    /// - Negative: point is on the opposite side
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies which side of the plane a point lies on.
    #[inline]
    pub fn side(&self, point: Point3<f32>) -> PlaneSide {
        if self.signed_distance(point) >= 0.0 {
            PlaneSide::Positive
        } else {
            PlaneSide::Negative
        }
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Interpolation parameter of the crossing between two points with the
    /// given signed distances: `|d1| / (|d1| + |d2|)`.
    ///
    /// Returns 0 when both distances are zero.
    #[inline]
    pub fn crossing_parameter(d1: f32, d2: f32) -> f32 {
        let denom = d1.abs() + d2.abs();
        if denom > 0.0 { d1.abs() / denom } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn new_normalizes_normal_and_offset() {
        let plane = Plane::new(Vector3::new(0.0, 2.0, 0.0), 4.0);
        assert_relative_eq!(plane.normal(), Vector3::y());
        assert_relative_eq!(plane.offset(), 2.0);
    }

    #[test]
    fn from_point_and_normal_passes_through_point() {
        let point = Point3::new(1.0, 2.0, 3.0);
        let plane = Plane::from_point_and_normal(point, Vector3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(plane.signed_distance(point), 0.0, epsilon = 1e-6);
    }

    #[test]
    #[should_panic(expected = "Plane normal cannot be zero")]
    fn zero_normal_panics() {
        Plane::new(Vector3::zeros(), 1.0);
    }

    #[test]
    fn points_on_plane_are_positive() {
        let plane = Plane::new(Vector3::z(), 0.0);
        assert_eq!(plane.side(Point3::new(5.0, -3.0, 0.0)), PlaneSide::Positive);
        assert_eq!(plane.side(Point3::new(0.0, 0.0, 0.1)), PlaneSide::Positive);
        assert_eq!(plane.side(Point3::new(0.0, 0.0, -0.1)), PlaneSide::Negative);
    }

    #[test]
    fn flipped_swaps_sides() {
        let plane = Plane::new(Vector3::x(), 1.0);
        let flipped = plane.flipped();
        let p = Point3::new(3.0, 0.0, 0.0);
        assert_relative_eq!(plane.signed_distance(p), -flipped.signed_distance(p));
    }

    #[test]
    fn crossing_parameter_is_distance_ratio() {
        assert_relative_eq!(Plane::crossing_parameter(1.0, -3.0), 0.25);
        assert_relative_eq!(Plane::crossing_parameter(-2.0, 2.0), 0.5);
        assert_eq!(Plane::crossing_parameter(0.0, 0.0), 0.0);
    }
}
