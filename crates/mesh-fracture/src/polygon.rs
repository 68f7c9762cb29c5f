//! Convex polygons of textured corners, produced while splitting triangles.

use nalgebra::{Point2, Point3};

/// A polygon corner: position plus texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub position: Point3<f32>,
    pub uv: Point2<f32>,
}

impl Corner {
    /// A corner at `position` with texture coordinate `uv`.
    pub fn new(position: Point3<f32>, uv: Point2<f32>) -> Self {
        Self { position, uv }
    }

    /// Corner with the planar `(x, z)` texture coordinate used for synthetic geometry.
    pub fn planar(position: Point3<f32>) -> Self {
        Self {
            position,
            uv: Point2::new(position.x, position.z),
        }
    }

    /// Interpolates position and UV together.
    pub fn lerp(&self, other: &Corner, t: f32) -> Self {
        Self {
            position: self.position.lerp(&other.position, t),
            uv: self.uv.lerp(&other.uv, t),
        }
    }
}

/// A convex polygon in 3D space, defined by an ordered list of corners.
///
/// Corners are in counter-clockwise winding order when viewed from the front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    corners: Vec<Corner>,
}

impl Polygon {
    /// A polygon from corners in winding order.
    pub fn new(corners: Vec<Corner>) -> Self {
        Self { corners }
    }

    /// An empty polygon with room for `capacity` corners.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            corners: Vec::with_capacity(capacity),
        }
    }

    /// Appends a corner to the end of the winding.
    #[inline]
    pub fn push(&mut self, corner: Corner) {
        self.corners.push(corner);
    }

    /// The corners in winding order.
    #[inline]
    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    /// Number of corners.
    #[inline]
    pub fn len(&self) -> usize {
        self.corners.len()
    }

    /// True if the polygon has no corners.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    /// Fan triangulation from the first corner.
    ///
    /// Yields nothing for fewer than 3 corners.
    pub fn fan_triangles(&self) -> impl Iterator<Item = [Corner; 3]> + '_ {
        let apex = self.corners.first().copied();
        self.corners
            .windows(2)
            .skip(1)
            .filter_map(move |pair| apex.map(|a| [a, pair[0], pair[1]]))
    }
}
