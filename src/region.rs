//! Region classification of a constrained Delaunay triangulation.
//!
//! The bounded faces partition into *regions*: maximal connected sets of
//! triangles whose interiors are connected across unconstrained edges.
//! Every region is bounded by closed chains of constraint edges and/or the
//! convex hull. Regions are marked alternately as trimmed or non-trimmed,
//! starting from the hull: a region entered from outside through an
//! unconstrained hull edge is trimmed away, one entered through a
//! constraint edge is kept, and each constraint crossing flips the mark.

use hashbrown::HashMap;
use std::collections::VecDeque;

use crate::cdt::ConstrainedDelaunayTriangulation;
use crate::quadedge::{FixedEdgeHandle, FixedFaceHandle};
use crate::HasPosition;

/// The trimmed/non-trimmed mark of every bounded face.
///
/// Produced by [`classify_regions`].
#[derive(Debug, Clone, Default)]
pub struct RegionClassification {
    trimmed: HashMap<FixedFaceHandle, bool>,
}

impl RegionClassification {
    /// Whether a bounded face belongs to a trimmed region. Faces that were
    /// never reached count as trimmed.
    pub fn is_trimmed(&self, face: FixedFaceHandle) -> bool {
        self.trimmed.get(&face).copied().unwrap_or(true)
    }

    /// Number of classified faces.
    pub fn len(&self) -> usize {
        self.trimmed.len()
    }

    /// `true` if no face was classified.
    pub fn is_empty(&self) -> bool {
        self.trimmed.is_empty()
    }

    fn is_visited(&self, face: FixedFaceHandle) -> bool {
        self.trimmed.contains_key(&face)
    }
}

/// Labels every bounded face of the triangulation with a trimmed or
/// non-trimmed mark.
pub fn classify_regions<V: HasPosition>(
    cdt: &ConstrainedDelaunayTriangulation<V>,
) -> RegionClassification {
    let mesh = cdt.mesh();

    // Sort the directed edges of bounded faces into the three seed
    // categories.
    let mut unconstrained_hull = Vec::new();
    let mut constrained_hull = Vec::new();
    let mut constrained_interior = Vec::new();
    for edge in mesh.directed_primal_edges() {
        if !cdt.is_bounded(cdt.edge_face(edge)) {
            continue;
        }
        let mate_bounded = cdt.is_bounded(cdt.edge_face(edge.sym()));
        let constrained = mesh.is_constrained(edge);
        if !mate_bounded {
            if constrained {
                constrained_hull.push(edge);
            } else {
                unconstrained_hull.push(edge);
            }
        } else if constrained {
            constrained_interior.push(edge);
        }
    }

    let mut classification = RegionClassification::default();

    // Outer trimmed regions, entered through unconstrained hull edges.
    for &edge in &unconstrained_hull {
        let face = cdt.edge_face(edge);
        if !classification.is_visited(face) {
            flood_region(cdt, face, true, &mut classification);
        }
    }

    // Outer non-trimmed regions, entered through constraint edges on the
    // hull.
    for &edge in &constrained_hull {
        let face = cdt.edge_face(edge);
        if !classification.is_visited(face) {
            flood_region(cdt, face, false, &mut classification);
        }
    }

    // Interior regions: whenever a constraint edge separates an already
    // classified region from an unvisited one, the unvisited side gets the
    // opposite mark. Nested regions need several rounds.
    loop {
        let mut progress = false;
        for &edge in &constrained_interior {
            let face = cdt.edge_face(edge);
            if classification.is_visited(face) {
                continue;
            }
            let mate = cdt.edge_face(edge.sym());
            if let Some(&mate_trimmed) = classification.trimmed.get(&mate) {
                flood_region(cdt, face, !mate_trimmed, &mut classification);
                progress = true;
            }
        }
        if !progress {
            break;
        }
    }

    classification
}

/// Breadth-first flood across unconstrained interior edges, marking every
/// face of `start`'s region.
fn flood_region<V: HasPosition>(
    cdt: &ConstrainedDelaunayTriangulation<V>,
    start: FixedFaceHandle,
    trimmed: bool,
    classification: &mut RegionClassification,
) {
    debug_assert!(cdt.is_bounded(start));

    let mut queue = VecDeque::new();
    queue.push_back(start);
    classification.trimmed.insert(start, trimmed);

    while let Some(face) = queue.pop_front() {
        let first: FixedEdgeHandle = cdt.face_edge(face);
        let edges = [first, cdt.lnext(first), cdt.lnext(cdt.lnext(first))];
        debug_assert_eq!(cdt.lnext(edges[2]), first);

        for edge in edges {
            debug_assert_eq!(cdt.edge_face(edge), face);
            if cdt.is_constrained(edge) {
                continue;
            }
            let neighbor = cdt.edge_face(edge.sym());
            if cdt.is_bounded(neighbor) && !classification.is_visited(neighbor) {
                classification.trimmed.insert(neighbor, trimmed);
                queue.push_back(neighbor);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ConstrainedDelaunayTriangulation, Point2};

    #[test]
    fn test_unconstrained_triangulation_is_fully_trimmed() {
        // Without constraints there is a single region, flooded from the
        // hull and trimmed away.
        let cdt = ConstrainedDelaunayTriangulation::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 8.0),
            Point2::new(5.0, 3.0),
        ])
        .unwrap();
        let regions = classify_regions(&cdt);
        assert_eq!(regions.len(), cdt.num_bounded_faces());
        for face in cdt.faces().filter(|&face| cdt.is_bounded(face)) {
            assert!(regions.is_trimmed(face));
        }
    }

    #[test]
    fn test_constrained_outline_is_kept() {
        // A constrained square outline with one interior point; the whole
        // interior forms a single non-trimmed region.
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(4.0, 6.0),
        ];
        let segments = [[0, 1], [1, 2], [2, 3], [3, 0]];
        let cdt = ConstrainedDelaunayTriangulation::with_segments(points, &segments).unwrap();

        let regions = classify_regions(&cdt);
        for face in cdt.faces().filter(|&face| cdt.is_bounded(face)) {
            assert!(!regions.is_trimmed(face));
        }
    }

    #[test]
    fn test_hole_region_alternates() {
        // A constrained outer square with a constrained inner square: the
        // annulus is kept, the hole is trimmed.
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(3.0, 3.0),
            Point2::new(7.0, 3.0),
            Point2::new(7.0, 7.0),
            Point2::new(3.0, 7.0),
        ];
        let segments = [
            [0, 1],
            [1, 2],
            [2, 3],
            [3, 0],
            [4, 5],
            [5, 6],
            [6, 7],
            [7, 4],
        ];
        let cdt = ConstrainedDelaunayTriangulation::with_segments(points, &segments).unwrap();

        let regions = classify_regions(&cdt);
        let (trimmed, kept): (Vec<_>, Vec<_>) = cdt
            .faces()
            .filter(|&face| cdt.is_bounded(face))
            .partition(|&face| regions.is_trimmed(face));

        // The hole triangulates into two triangles; the annulus holds the
        // remaining eight.
        assert_eq!(trimmed.len(), 2);
        assert_eq!(kept.len(), 8);
        assert_eq!(cdt.num_bounded_faces(), 10);
    }

    #[test]
    fn test_diagonal_only_constraint_still_trims_everything() {
        // A constraint that does not close a loop against the hull leaves
        // both triangles reachable from unconstrained hull edges.
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let cdt = ConstrainedDelaunayTriangulation::with_segments(points, &[[0, 2]]).unwrap();

        let regions = classify_regions(&cdt);
        for face in cdt.faces().filter(|&face| cdt.is_bounded(face)) {
            assert!(regions.is_trimmed(face));
        }
    }
}
