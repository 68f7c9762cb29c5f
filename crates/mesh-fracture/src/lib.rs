//! Runtime mesh fracturing.
//!
//! Breaks a triangle mesh into capped fragments by repeatedly slicing it with
//! random planes that are biased toward an impact point, so pieces get
//! smaller near where the object was hit.
//!
//! # Example
//!
//! ```ignore
//! use mesh_fracture::{MeshFracturer, SourceMesh, spawn_fragments, DebrisField};
//! use nalgebra::{Point3, Vector3};
//! use rand::SeedableRng;
//!
//! let mesh: SourceMesh = /* vertices, uvs, indices */;
//! let fracturer = MeshFracturer::default();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! let pieces = fracturer.fracture(&mesh, 8, Point3::new(0.5, 0.0, 0.0), &mesh.bounds(), &mut rng)?;
//!
//! let mut debris = DebrisField::new();
//! debris.spawn(spawn_fragments(pieces, Point3::origin(), Vector3::zeros(), &mut rng, &fracturer.config().debris));
//! debris.explode(Point3::new(0.5, 0.0, 0.0), 4.0, 2.0);
//! ```
//!
//! # Architecture
//!
//! - [`generate_cutting_plane`]: one biased random [`Plane`] per cut iteration
//! - [`Cuttable`]: splits a [`MeshFragment`] into its positive and negative halves
//! - [`fill_cap_hole`]: seals each half along the cut
//! - [`MeshFracturer`]: runs the iterations and assembles [`OutputMesh`]es
//! - [`FragmentBody`] / [`DebrisField`]: lifetime and motion of spawned pieces

mod bounds;
mod cap;
mod config;
mod cuttable;
mod cutting_plane;
mod debris;
mod error;
mod fracture;
mod fragment;
mod mesh;
mod plane;
mod polygon;
mod random;
mod triangle;

#[cfg(test)]
mod test_support;

pub use bounds::Aabb;
pub use cap::{CAP_WELD_EPSILON, CapRing, fill_cap_hole};
pub use config::{DebrisConfig, FractureConfig, PlaneBias};
pub use cuttable::Cuttable;
pub use cutting_plane::generate_cutting_plane;
pub use debris::{DebrisField, FragmentBody, FragmentState, spawn_fragments};
pub use error::FractureError;
pub use fracture::{MeshFracturer, cuts_needed};
pub use fragment::MeshFragment;
pub use mesh::{OutputMesh, SourceMesh};
pub use plane::{Plane, PlaneSide};
pub use polygon::{Corner, Polygon};
pub use random::FractureRng;
pub use triangle::{Classification, Triangle};
