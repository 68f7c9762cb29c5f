//! Splitting fragments with a cutting plane.

use crate::{CapRing, Classification, Corner, MeshFragment, Plane, PlaneSide, Polygon, fill_cap_hole};

/// Trait for geometry that can be cut by a plane.
pub trait Cuttable: Sized {
    /// Cuts the geometry by a plane.
    ///
    /// Returns `(positive, negative)`: the parts on the side the normal points
    /// to and on the opposite side. A side is `None` when it received fewer
    /// than 3 vertices, including the case where the plane misses the
    /// geometry entirely.
    fn cut(&self, plane: &Plane) -> (Option<Self>, Option<Self>);
}

impl Cuttable for MeshFragment {
    /// Splits the fragment and seals both halves with a cap.
    ///
    /// Whole triangles are copied to their side; spanning triangles are
    /// clipped into one polygon per side and fan-triangulated. Every crossing
    /// point also goes into the cap ring, which is then triangulated onto
    /// each surviving half with opposite windings.
    ///
    /// This is a single-plane split: if the plane crosses a non-convex
    /// fragment in several disjoint places, all pieces on one side stay in
    /// one fragment and the cap ring spans all the cross-sections.
    fn cut(&self, plane: &Plane) -> (Option<MeshFragment>, Option<MeshFragment>) {
        let capacity = self.vertices.len();
        let mut positive = MeshFragment::with_capacity(capacity);
        let mut negative = MeshFragment::with_capacity(capacity);
        let mut cap = CapRing::new();

        for (index, corners) in self.triangle_corners().enumerate() {
            let [a, b, c] = corners;
            match self.triangle(index).classify(plane) {
                Classification::Positive => positive.push_triangle(a, b, c),
                Classification::Negative => negative.push_triangle(a, b, c),
                Classification::Spanning => {
                    let (front, back) = split_triangle(&corners, plane, &mut cap);
                    positive.push_polygon(&front);
                    negative.push_polygon(&back);
                }
            }
        }

        let positive = (!positive.is_degenerate()).then(|| {
            fill_cap_hole(cap.points(), plane, &mut positive, false);
            positive
        });
        let negative = (!negative.is_degenerate()).then(|| {
            fill_cap_hole(cap.points(), plane, &mut negative, true);
            negative
        });

        if positive.is_none() || negative.is_none() {
            log::trace!(
                "Degenerate split: positive={}, negative={}",
                positive.is_some(),
                negative.is_some()
            );
        }

        (positive, negative)
    }
}

/// Clips a spanning triangle into positive and negative polygons.
///
/// Uses a variant of the Sutherland-Hodgman algorithm:
/// walks the triangle edges and builds two corner lists,
/// adding the intersection corner to both when an edge crosses the plane.
fn split_triangle(corners: &[Corner; 3], plane: &Plane, cap: &mut CapRing) -> (Polygon, Polygon) {
    let mut front = Polygon::with_capacity(4);
    let mut back = Polygon::with_capacity(4);

    // Classify all corners upfront
    let distances = corners.map(|c| plane.signed_distance(c.position));
    let sides = corners.map(|c| plane.side(c.position));

    for i in 0..3 {
        let current = corners[i];
        let next_idx = (i + 1) % 3;

        match sides[i] {
            PlaneSide::Positive => front.push(current),
            PlaneSide::Negative => back.push(current),
        }

        if sides[i] != sides[next_idx] {
            let t = Plane::crossing_parameter(distances[i], distances[next_idx]);
            let intersection = current.lerp(&corners[next_idx], t);
            front.push(intersection);
            back.push(intersection);
            cap.push(intersection.position);
        }
    }

    (front, back)
}
