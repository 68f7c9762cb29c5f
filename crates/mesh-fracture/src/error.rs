//! Errors reported by the fracture pipeline.

/// Errors that can occur before any cutting happens.
///
/// The fracture algorithm itself never fails: degenerate splits, missing caps
/// and tiny fragments are dropped silently and simply shorten the result list.
/// What *is* reported is input that cannot be read as a triangle mesh at all,
/// so callers can tell "nothing to break" (`Ok(vec![])`) apart from "the mesh
/// data handed to us was broken" (`Err`).
#[derive(thiserror::Error, Debug)]
pub enum FractureError {
    /// The index buffer length is not a multiple of three.
    #[error("Index buffer length {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),

    /// A triangle references a vertex that does not exist.
    ///
    /// Reports the offending index and the vertex count.
    #[error("Triangle index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// The UV buffer is neither empty nor parallel to the vertex buffer.
    #[error("Mesh has {uvs} UVs for {vertices} vertices")]
    UvCountMismatch { vertices: usize, uvs: usize },

    /// A vertex position contains NaN or an infinite coordinate.
    #[error("Vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),

    /// The impact point or the bounds handed to the fracturer are not finite.
    #[error("Impact point or bounds contain a non-finite coordinate")]
    NonFiniteImpact,

    /// A fracture configuration could not be parsed.
    #[error("Invalid fracture config: {0}")]
    Config(#[from] ron::error::SpannedError),
}
