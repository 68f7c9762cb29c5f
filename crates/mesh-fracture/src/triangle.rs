//! Triangle geometry helpers.

use nalgebra::{Point3, Vector3};

use crate::{Plane, PlaneSide};

/// Classification of a triangle relative to a cutting plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// All corners are on the positive side (or on the plane).
    Positive,
    /// All corners are on the negative side.
    Negative,
    /// Corners on both sides: the triangle must be split.
    Spanning,
}

/// A triangle in 3D space, defined by three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    ///
    /// The winding order determines the normal direction via the right-hand rule:
    /// normal = (b - a) × (c - a)
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    /// Computes the (unnormalized) normal vector of the triangle.
    ///
    /// Its length is twice the triangle's area.
    pub fn normal(&self) -> Vector3<f32> {
        let [a, b, c] = &self.vertices;
        let ab = b - a;
        let ac = c - a;
        ab.cross(&ac)
    }

    /// Computes the unit normal vector of the triangle.
    ///
    /// Returns `None` if the triangle is degenerate (zero area).
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        let n = self.normal();
        let len = n.norm();
        if len > f32::EPSILON {
            Some(n / len)
        } else {
            None
        }
    }

    /// Area of the triangle.
    pub fn area(&self) -> f32 {
        self.normal().norm() * 0.5
    }

    /// Computes the centroid (center of mass) of the triangle.
    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Classifies this triangle relative to a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        let positive = self
            .vertices
            .iter()
            .filter(|v| plane.side(**v) == PlaneSide::Positive)
            .count();

        match positive {
            3 => Classification::Positive,
            0 => Classification::Negative,
            _ => Classification::Spanning,
        }
    }
}
