//! Axis-aligned bounding boxes.

use nalgebra::{Point3, Vector3};

/// An axis-aligned box stored as a center and half-size extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Point3<f32>,
    pub extents: Vector3<f32>,
}

impl Aabb {
    /// Creates a box from its center and half-size extents.
    pub fn new(center: Point3<f32>, extents: Vector3<f32>) -> Self {
        Self { center, extents }
    }

    /// Creates a box from its minimum and maximum corners.
    pub fn from_min_max(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self {
            center: nalgebra::center(&min, &max),
            extents: (max - min) * 0.5,
        }
    }

    /// Smallest box containing every point.
    ///
    /// Returns a zero-sized box at the origin for an empty slice.
    pub fn from_points(points: &[Point3<f32>]) -> Self {
        let Some(first) = points.first() else {
            return Self::new(Point3::origin(), Vector3::zeros());
        };

        let (min, max) = points[1..]
            .iter()
            .fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p)));
        Self::from_min_max(min, max)
    }

    /// Minimum corner.
    #[inline]
    pub fn min(&self) -> Point3<f32> {
        self.center - self.extents
    }

    /// Maximum corner.
    #[inline]
    pub fn max(&self) -> Point3<f32> {
        self.center + self.extents
    }

    /// Full size along each axis.
    #[inline]
    pub fn size(&self) -> Vector3<f32> {
        self.extents * 2.0
    }

    /// Volume of the box; zero for a flat box.
    pub fn volume(&self) -> f32 {
        let size = self.size();
        size.x * size.y * size.z
    }

    /// Smallest box containing both boxes.
    pub fn merged(&self, other: &Aabb) -> Self {
        Self::from_min_max(self.min().inf(&other.min()), self.max().sup(&other.max()))
    }

    /// Whether `point` lies inside or on the box.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        let d = point - self.center;
        d.x.abs() <= self.extents.x && d.y.abs() <= self.extents.y && d.z.abs() <= self.extents.z
    }
}
