//! Working fragments used while cutting.

use nalgebra::{Point2, Point3};

use crate::{Aabb, Corner, Polygon, SourceMesh, Triangle};

/// A piece of mesh in the middle of the fracture pipeline.
///
/// Vertices are stored once per triangle corner and never shared between
/// triangles: after cutting, a position can need a different UV (or normal)
/// on each face that touches it.
///
/// A fragment is single-use. Splitting it builds two new fragments and leaves
/// the original untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshFragment {
    pub vertices: Vec<Point3<f32>>,
    pub uvs: Vec<Point2<f32>>,
    pub triangles: Vec<u32>,
}

impl MeshFragment {
    /// An empty fragment with room for `corners` triangle corners.
    pub fn with_capacity(corners: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(corners),
            uvs: Vec::with_capacity(corners),
            triangles: Vec::with_capacity(corners),
        }
    }

    /// De-indexes a validated source mesh into a fragment.
    ///
    /// Sources without UVs get planar `(x, z)` coordinates.
    pub fn from_source(source: &SourceMesh) -> Self {
        let mut fragment = Self::with_capacity(source.indices.len());
        for tri in source.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| source_corner(source, i as usize));
            fragment.push_triangle(a, b, c);
        }
        fragment
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Fewer than 3 vertices: nothing renderable.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Appends one triangle as three new corners.
    pub fn push_triangle(&mut self, a: Corner, b: Corner, c: Corner) {
        for corner in [a, b, c] {
            self.triangles.push(self.vertices.len() as u32);
            self.vertices.push(corner.position);
            self.uvs.push(corner.uv);
        }
    }

    /// Appends a convex polygon by fan triangulation from its first corner.
    pub fn push_polygon(&mut self, polygon: &Polygon) {
        for [a, b, c] in polygon.fan_triangles() {
            self.push_triangle(a, b, c);
        }
    }

    /// The three corners of triangle `index`.
    pub fn corners(&self, index: usize) -> [Corner; 3] {
        let tri = &self.triangles[index * 3..index * 3 + 3];
        [tri[0], tri[1], tri[2]].map(|i| Corner::new(self.vertices[i as usize], self.uvs[i as usize]))
    }

    /// Iterates over the triangles' corners.
    pub fn triangle_corners(&self) -> impl Iterator<Item = [Corner; 3]> + '_ {
        (0..self.triangle_count()).map(|i| self.corners(i))
    }

    /// Positions of triangle `index`.
    pub fn triangle(&self, index: usize) -> Triangle {
        let [a, b, c] = self.corners(index);
        Triangle::new(a.position, b.position, c.position)
    }

    /// Bounding box of all vertices.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }
}

fn source_corner(source: &SourceMesh, index: usize) -> Corner {
    let position = source.vertices[index];
    match source.uvs.get(index) {
        Some(uv) => Corner::new(position, *uv),
        None => Corner::planar(position),
    }
}
