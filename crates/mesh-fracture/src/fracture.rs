//! Top-level fracture: repeated plane cuts over a working set of fragments.

use nalgebra::{Point3, Vector3};

use crate::{
    Aabb, Cuttable, FractureConfig, FractureError, FractureRng, MeshFragment, OutputMesh,
    SourceMesh, generate_cutting_plane,
};

/// Number of cut iterations for a requested piece count:
/// `clamp(ceil(log2(piece_count)), min_cuts, max_cuts)`.
///
/// `ceil(log2(1))` and the degenerate `piece_count == 0` both count as 0.
pub fn cuts_needed(piece_count: usize, min_cuts: u32, max_cuts: u32) -> u32 {
    let log2_ceil = match piece_count {
        0 | 1 => 0,
        n => usize::BITS - (n - 1).leading_zeros(),
    };
    log2_ceil.clamp(min_cuts, max_cuts.max(min_cuts))
}

/// Breaks triangle meshes into capped fragments.
///
/// Each call runs to completion synchronously and owns its working set; a
/// fracturer holds only configuration and can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct MeshFracturer {
    config: FractureConfig,
}

impl MeshFracturer {
    /// A fracturer using `config` for every call.
    pub fn new(config: FractureConfig) -> Self {
        Self { config }
    }

    /// The configuration this fracturer runs with.
    #[inline]
    pub fn config(&self) -> &FractureConfig {
        &self.config
    }

    /// Fractures `mesh` into at most `piece_count` fragments.
    ///
    /// Every iteration generates one plane (see [`generate_cutting_plane`]) and
    /// splits every fragment of the working set with it, so the set roughly
    /// doubles per iteration. Cutting stops early once the set exceeds
    /// `piece_count * runaway_factor`. The first `piece_count` fragments are
    /// then converted to [`OutputMesh`]es; fragments too small to render are
    /// dropped, so fewer pieces than requested may come back.
    ///
    /// A mesh with no triangles yields an empty list. Buffers that do not
    /// describe a triangle mesh are an error, and so is a non-finite
    /// `impact_point` or `bounds`.
    pub fn fracture<R: FractureRng + ?Sized>(
        &self,
        mesh: &SourceMesh,
        piece_count: usize,
        impact_point: Point3<f32>,
        bounds: &Aabb,
        rng: &mut R,
    ) -> Result<Vec<OutputMesh>, FractureError> {
        mesh.validate()?;
        let finite = |v: &Vector3<f32>| v.iter().all(|c| c.is_finite());
        if !finite(&impact_point.coords) || !finite(&bounds.center.coords) || !finite(&bounds.extents) {
            return Err(FractureError::NonFiniteImpact);
        }

        let source = MeshFragment::from_source(mesh);
        if source.is_degenerate() {
            log::debug!("Nothing to fracture: mesh has no triangles");
            return Ok(Vec::new());
        }

        let cuts = cuts_needed(piece_count, self.config.min_cuts, self.config.max_cuts);
        let runaway_limit = piece_count.saturating_mul(self.config.runaway_factor);
        log::debug!(
            "Fracturing {} triangles into {} pieces with {} cuts",
            mesh.triangle_count(),
            piece_count,
            cuts
        );

        let mut working = vec![source];
        for cut_index in 0..cuts as usize {
            if working.len() > runaway_limit {
                log::debug!("Stopping after {} cuts: {} fragments", cut_index, working.len());
                break;
            }

            let plane =
                generate_cutting_plane(rng, impact_point, bounds, cut_index, &self.config.plane);
            working = working
                .into_iter()
                .flat_map(|fragment| match fragment.cut(&plane) {
                    (None, None) => vec![fragment],
                    (positive, negative) => positive.into_iter().chain(negative).collect(),
                })
                .collect();
            log::debug!("Cut {}: {} fragments", cut_index, working.len());
        }

        let pieces: Vec<OutputMesh> = working
            .into_iter()
            .take(piece_count)
            .filter_map(OutputMesh::from_fragment)
            .collect();
        log::debug!("Produced {} fragment meshes", pieces.len());
        Ok(pieces)
    }
}
