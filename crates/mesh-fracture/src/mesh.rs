//! Mesh descriptions at the boundary of the fracture pipeline.

use nalgebra::{Point2, Point3, Vector3};

use crate::{Aabb, FractureError, MeshFragment, Triangle};

/// An indexed triangle mesh handed to the fracturer.
///
/// Positions are in the object's local space. `uvs` may be empty, in which case
/// each corner gets the planar `(x, z)` coordinate of its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMesh {
    pub vertices: Vec<Point3<f32>>,
    pub uvs: Vec<Point2<f32>>,
    pub indices: Vec<u32>,
}

impl SourceMesh {
    /// Wraps the raw buffers; `uvs` may be empty. See [`SourceMesh::validate`].
    pub fn new(vertices: Vec<Point3<f32>>, uvs: Vec<Point2<f32>>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            uvs,
            indices,
        }
    }

    /// Number of triangles described by the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Checks that the buffers describe a readable triangle mesh.
    pub fn validate(&self) -> Result<(), FractureError> {
        if self.indices.len() % 3 != 0 {
            return Err(FractureError::IndexCountNotTriangles(self.indices.len()));
        }
        if !self.uvs.is_empty() && self.uvs.len() != self.vertices.len() {
            return Err(FractureError::UvCountMismatch {
                vertices: self.vertices.len(),
                uvs: self.uvs.len(),
            });
        }
        if let Some(i) = self
            .vertices
            .iter()
            .position(|v| !v.coords.iter().all(|c| c.is_finite()))
        {
            return Err(FractureError::NonFiniteVertex(i));
        }
        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.vertices.len())
        {
            return Err(FractureError::IndexOutOfRange {
                index,
                vertex_count: self.vertices.len(),
            });
        }
        Ok(())
    }

    /// Bounds of the vertices actually present in the buffer.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }
}

/// A finished fragment: de-indexed triangles with normals and bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputMesh {
    pub vertices: Vec<Point3<f32>>,
    pub uvs: Vec<Point2<f32>>,
    pub indices: Vec<u32>,
    pub normals: Vec<Vector3<f32>>,
    pub bounds: Aabb,
}

impl OutputMesh {
    /// Converts a fragment, recomputing normals and bounds.
    ///
    /// Returns `None` if the fragment has fewer than 3 vertices or 3 indices.
    pub fn from_fragment(fragment: MeshFragment) -> Option<Self> {
        if fragment.vertices.len() < 3 || fragment.triangles.len() < 3 {
            return None;
        }

        let normals = compute_normals(&fragment.vertices, &fragment.triangles);
        let bounds = Aabb::from_points(&fragment.vertices);
        Some(Self {
            vertices: fragment.vertices,
            uvs: fragment.uvs,
            indices: fragment.triangles,
            normals,
            bounds,
        })
    }

    /// Number of triangles in the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over the triangles as geometry.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            Triangle::new(
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            )
        })
    }
}

/// Per-vertex normals: area-weighted sum of the adjacent face normals.
///
/// Vertices touched only by degenerate faces get a zero normal.
fn compute_normals(vertices: &[Point3<f32>], indices: &[u32]) -> Vec<Vector3<f32>> {
    let mut normals = vec![Vector3::zeros(); vertices.len()];
    for tri in indices.chunks_exact(3) {
        let face = Triangle::new(
            vertices[tri[0] as usize],
            vertices[tri[1] as usize],
            vertices[tri[2] as usize],
        )
        .normal();
        for &i in tri {
            normals[i as usize] += face;
        }
    }
    for n in &mut normals {
        *n = n.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros);
    }
    normals
}
