//! Flat-array extraction of a triangulation's vertices, triangles and
//! edges, e.g. for feeding a mesh writer or a renderer.

use hashbrown::{HashMap, HashSet};

use crate::cdt::ConstrainedDelaunayTriangulation;
use crate::quadedge::{FixedEdgeHandle, FixedFaceHandle, FixedQuadEdgeHandle, FixedVertexHandle};
use crate::region::classify_regions;
use crate::HasPosition;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The role of an edge in the extracted mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeType {
    /// An interior, unconstrained edge.
    Regular,
    /// A constraint edge, interior or boundary.
    Constrained,
    /// An unconstrained edge with only one adjacent triangle.
    Boundary,
}

/// Dense index arrays describing a set of triangles of the triangulation.
///
/// `triangles` holds three indices into `vertices` per triangle, in
/// counterclockwise order; `edges` holds two indices per edge, with the
/// parallel `edge_types` array tagging each edge's role.
#[derive(Debug)]
pub struct Enumeration<'a, V> {
    /// The referenced vertices, in order of first appearance.
    pub vertices: Vec<&'a V>,
    /// Vertex index triples, one per triangle.
    pub triangles: Vec<usize>,
    /// Vertex index pairs, one per edge.
    pub edges: Vec<usize>,
    /// The role of each edge, parallel to `edges`.
    pub edge_types: Vec<EdgeType>,
}

impl<V> Enumeration<'_, V> {
    /// Number of emitted triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Number of emitted edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len() / 2
    }
}

/// Enumerates every bounded face of the triangulation.
pub fn enumerate_all_faces<V: HasPosition>(
    cdt: &ConstrainedDelaunayTriangulation<V>,
) -> Enumeration<'_, V> {
    enumerate(cdt, |_| true)
}

/// Enumerates only the bounded faces of non-trimmed regions (see
/// [`classify_regions`][crate::classify_regions]).
pub fn enumerate_untrimmed<V: HasPosition>(
    cdt: &ConstrainedDelaunayTriangulation<V>,
) -> Enumeration<'_, V> {
    let regions = classify_regions(cdt);
    enumerate(cdt, |face| !regions.is_trimmed(face))
}

fn enumerate<V: HasPosition>(
    cdt: &ConstrainedDelaunayTriangulation<V>,
    mut include: impl FnMut(FixedFaceHandle) -> bool,
) -> Enumeration<'_, V> {
    let mut collector = Collector::default();
    for face in cdt.faces() {
        if cdt.is_bounded(face) && include(face) {
            collector.visit_face(cdt, face);
        }
    }
    collector.into_arrays(cdt)
}

/// Accumulates faces, edges and vertices in traversal order. Vertices get
/// dense indices on first sighting; an edge is recorded once per
/// quad-edge.
#[derive(Default)]
struct Collector {
    vertex_indices: HashMap<FixedVertexHandle, usize>,
    vertex_order: Vec<FixedVertexHandle>,
    edges: Vec<FixedEdgeHandle>,
    seen_quads: HashSet<FixedQuadEdgeHandle>,
    faces: Vec<FixedFaceHandle>,
}

impl Collector {
    fn visit_face<V: HasPosition>(
        &mut self,
        cdt: &ConstrainedDelaunayTriangulation<V>,
        face: FixedFaceHandle,
    ) {
        let e1 = cdt.face_edge(face);
        let e2 = cdt.lnext(e1);
        let e3 = cdt.lnext(e2);
        debug_assert_eq!(cdt.lnext(e3), e1);

        for edge in [e1, e2, e3] {
            debug_assert_eq!(cdt.edge_face(edge), face);
            if self.seen_quads.insert(edge.quad()) {
                self.visit_edge(cdt, edge);
            }
        }
        self.faces.push(face);
    }

    fn visit_edge<V: HasPosition>(
        &mut self,
        cdt: &ConstrainedDelaunayTriangulation<V>,
        edge: FixedEdgeHandle,
    ) {
        self.register_vertex(cdt.edge_origin(edge));
        self.register_vertex(cdt.edge_dest(edge));
        self.edges.push(edge);
    }

    fn register_vertex(&mut self, vertex: FixedVertexHandle) {
        if let hashbrown::hash_map::Entry::Vacant(entry) = self.vertex_indices.entry(vertex) {
            entry.insert(self.vertex_order.len());
            self.vertex_order.push(vertex);
        }
    }

    fn into_arrays<V: HasPosition>(
        self,
        cdt: &ConstrainedDelaunayTriangulation<V>,
    ) -> Enumeration<'_, V> {
        let vertices = self
            .vertex_order
            .iter()
            .map(|&vertex| cdt.vertex_data(vertex))
            .collect();

        let mut edges = Vec::with_capacity(2 * self.edges.len());
        let mut edge_types = Vec::with_capacity(self.edges.len());
        for &edge in &self.edges {
            edges.push(self.vertex_indices[&cdt.edge_origin(edge)]);
            edges.push(self.vertex_indices[&cdt.edge_dest(edge)]);
            let edge_type = if cdt.is_constrained(edge) {
                EdgeType::Constrained
            } else if cdt.is_bounded(cdt.edge_face(edge.sym())) {
                EdgeType::Regular
            } else {
                EdgeType::Boundary
            };
            edge_types.push(edge_type);
        }

        let mut triangles = Vec::with_capacity(3 * self.faces.len());
        for &face in &self.faces {
            let edge = cdt.face_edge(face);
            triangles.push(self.vertex_indices[&cdt.edge_origin(edge)]);
            triangles.push(self.vertex_indices[&cdt.edge_origin(cdt.lnext(edge))]);
            triangles.push(self.vertex_indices[&cdt.edge_origin(cdt.lprev(edge))]);
        }

        Enumeration {
            vertices,
            triangles,
            edges,
            edge_types,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::predicates::is_left;
    use crate::{ConstrainedDelaunayTriangulation, Point2};

    #[test]
    fn test_single_triangle() {
        let cdt = ConstrainedDelaunayTriangulation::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 8.0),
        ])
        .unwrap();
        let mesh = enumerate_all_faces(&cdt);

        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.num_triangles(), 1);
        assert_eq!(mesh.num_edges(), 3);
        assert!(mesh
            .edge_types
            .iter()
            .all(|&edge_type| edge_type == EdgeType::Boundary));

        // Euler's formula over the bounded complex.
        assert_eq!(mesh.num_triangles() as isize - 3 + 3, 1);
    }

    #[test]
    fn test_triangles_are_ccw() {
        let cdt = ConstrainedDelaunayTriangulation::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 5.0),
            Point2::new(0.0, 5.0),
            Point2::new(5.0, 2.0),
        ])
        .unwrap();
        let mesh = enumerate_all_faces(&cdt);

        for triangle in mesh.triangles.chunks_exact(3) {
            let a = mesh.vertices[triangle[0]].position();
            let b = mesh.vertices[triangle[1]].position();
            let c = mesh.vertices[triangle[2]].position();
            assert!(is_left(a, b, c));
        }
    }

    #[test]
    fn test_constrained_diagonal_edge_types() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let cdt = ConstrainedDelaunayTriangulation::with_segments(points, &[[0, 2]]).unwrap();
        let mesh = enumerate_all_faces(&cdt);

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.num_edges(), 5);

        let constrained = mesh
            .edge_types
            .iter()
            .filter(|&&edge_type| edge_type == EdgeType::Constrained)
            .count();
        let boundary = mesh
            .edge_types
            .iter()
            .filter(|&&edge_type| edge_type == EdgeType::Boundary)
            .count();
        assert_eq!(constrained, 1);
        assert_eq!(boundary, 4);

        // The constraint edge connects the two diagonal corners.
        let index = mesh
            .edge_types
            .iter()
            .position(|&edge_type| edge_type == EdgeType::Constrained)
            .unwrap();
        let mut endpoints = [
            mesh.vertices[mesh.edges[2 * index]].position(),
            mesh.vertices[mesh.edges[2 * index + 1]].position(),
        ];
        endpoints.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(endpoints[0], Point2::new(0.0, 0.0));
        assert_eq!(endpoints[1], Point2::new(10.0, 10.0));
    }

    #[test]
    fn test_interior_edges_are_regular() {
        let cdt = ConstrainedDelaunayTriangulation::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(5.0, 5.0),
        ])
        .unwrap();
        let mesh = enumerate_all_faces(&cdt);

        assert_eq!(mesh.num_triangles(), 4);
        assert_eq!(mesh.num_edges(), 8);
        let regular = mesh
            .edge_types
            .iter()
            .filter(|&&edge_type| edge_type == EdgeType::Regular)
            .count();
        assert_eq!(regular, 4);
    }

    #[test]
    fn test_untrimmed_enumeration_drops_hole() {
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

        let all = enumerate_all_faces(&cdt);
        let kept = enumerate_untrimmed(&cdt);
        assert_eq!(all.num_triangles(), 10);
        assert_eq!(kept.num_triangles(), 8);
        // The annulus still references all eight vertices.
        assert_eq!(kept.vertices.len(), 8);

        // The hole's diagonal belongs to trimmed faces only and must not
        // be emitted.
        assert!(kept.num_edges() < all.num_edges());
    }

    #[test]
    fn test_vertex_indices_are_dense() {
        let cdt = ConstrainedDelaunayTriangulation::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(2.0, 7.0),
            Point2::new(8.0, 4.0),
        ])
        .unwrap();
        let mesh = enumerate_all_faces(&cdt);

        assert_eq!(mesh.vertices.len(), 6);
        for &index in mesh.triangles.iter().chain(&mesh.edges) {
            assert!(index < mesh.vertices.len());
        }
        // Every vertex is referenced by at least one triangle.
        for index in 0..mesh.vertices.len() {
            assert!(mesh.triangles.contains(&index));
        }
    }
}
