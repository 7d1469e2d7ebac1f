//! The quad-edge mesh: registries for vertices, quad-edges and faces, the
//! Guibas-Stolfi `splice` primitive and the derived navigation operators.
//!
//! The mesh stores topology only. All geometric decisions (where to insert,
//! what to flip) are made by the triangulation layer on top of it.

use super::arena::Arena;
use super::handles::{FixedEdgeHandle, FixedFaceHandle, FixedQuadEdgeHandle, FixedVertexHandle};
use crate::{HasPosition, Point2};

/// Geometric payload of a vertex.
///
/// The three vertices of the enclosing triangle exist only while the
/// triangulation is under construction and carry no user data; they are
/// removed before a triangulation is handed to the caller.
#[derive(Debug, Clone)]
pub(crate) enum VertexData<V> {
    Real(V),
    Sentinel(Point2<f64>),
}

#[derive(Debug, Clone)]
pub(crate) struct VertexEntry<V> {
    pub data: VertexData<V>,
    pub out_edge: Option<FixedEdgeHandle>,
}

#[derive(Debug, Clone)]
pub(crate) struct FaceEntry {
    pub edge: FixedEdgeHandle,
    pub bounded: bool,
}

/// One undirected edge plus its two dual directions.
///
/// `next` holds the counterclockwise origin successor of each of the four
/// rings. Origin vertices and left faces are only meaningful for the two
/// primal rings and are indexed by [`FixedEdgeHandle::primal_index`].
#[derive(Debug, Clone)]
pub(crate) struct QuadEdgeEntry {
    pub next: [FixedEdgeHandle; 4],
    pub origin: [Option<FixedVertexHandle>; 2],
    pub left_face: [Option<FixedFaceHandle>; 2],
    pub constrained: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct QuadEdgeMesh<V> {
    vertices: Arena<VertexEntry<V>>,
    quads: Arena<QuadEdgeEntry>,
    faces: Arena<FaceEntry>,
}

impl<V> Default for QuadEdgeMesh<V> {
    fn default() -> Self {
        QuadEdgeMesh {
            vertices: Arena::new(),
            quads: Arena::new(),
            faces: Arena::new(),
        }
    }
}

impl<V> QuadEdgeMesh<V> {
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_undirected_edges(&self) -> usize {
        self.quads.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Creates a fresh, disconnected quad-edge and returns its ring-0
    /// directed edge.
    ///
    /// The primal rings start as self-loops, the dual rings loop to each
    /// other: a fresh edge is its own connected component whose left and
    /// right face coincide.
    pub fn make_edge(&mut self) -> FixedEdgeHandle {
        let quad = FixedQuadEdgeHandle::new(0); // patched after insertion
        let placeholder = QuadEdgeEntry {
            next: [FixedEdgeHandle::new(quad, 0); 4],
            origin: [None, None],
            left_face: [None, None],
            constrained: false,
        };
        let index = self.quads.insert(placeholder);
        let quad = FixedQuadEdgeHandle::new(index);
        let e = |ring| FixedEdgeHandle::new(quad, ring);
        self.quads.get_mut(index).next = [e(0), e(3), e(2), e(1)];
        e(0)
    }

    /// Removes a quad-edge entry. The caller must already have spliced all
    /// four rings out of any larger cycles.
    pub fn remove_quad(&mut self, quad: FixedQuadEdgeHandle) {
        self.quads.remove(quad.0);
    }

    pub fn is_live_quad(&self, quad: FixedQuadEdgeHandle) -> bool {
        self.quads.contains(quad.0)
    }

    // -- vertices ----------------------------------------------------------

    pub fn add_vertex(&mut self, data: VertexData<V>) -> FixedVertexHandle {
        FixedVertexHandle::new(self.vertices.insert(VertexEntry {
            data,
            out_edge: None,
        }))
    }

    pub fn remove_vertex(&mut self, vertex: FixedVertexHandle) -> VertexEntry<V> {
        self.vertices.remove(vertex.0)
    }

    pub fn vertex(&self, vertex: FixedVertexHandle) -> &VertexEntry<V> {
        self.vertices.get(vertex.0)
    }

    pub fn set_out_edge(&mut self, vertex: FixedVertexHandle, edge: FixedEdgeHandle) {
        self.vertices.get_mut(vertex.0).out_edge = Some(edge);
    }

    pub fn vertex_handles(&self) -> impl Iterator<Item = FixedVertexHandle> + '_ {
        self.vertices.indices().map(FixedVertexHandle::new)
    }

    // -- faces -------------------------------------------------------------

    pub fn create_face(&mut self, edge: FixedEdgeHandle, bounded: bool) -> FixedFaceHandle {
        FixedFaceHandle::new(self.faces.insert(FaceEntry { edge, bounded }))
    }

    pub fn remove_face(&mut self, face: FixedFaceHandle) {
        self.faces.remove(face.0);
    }

    pub fn face(&self, face: FixedFaceHandle) -> &FaceEntry {
        self.faces.get(face.0)
    }

    pub fn set_face_edge(&mut self, face: FixedFaceHandle, edge: FixedEdgeHandle) {
        self.faces.get_mut(face.0).edge = edge;
    }

    pub fn face_handles(&self) -> impl Iterator<Item = FixedFaceHandle> + '_ {
        self.faces.indices().map(FixedFaceHandle::new)
    }

    // -- per-edge data -----------------------------------------------------

    fn entry(&self, edge: FixedEdgeHandle) -> &QuadEdgeEntry {
        self.quads.get(edge.quad().0)
    }

    fn entry_mut(&mut self, edge: FixedEdgeHandle) -> &mut QuadEdgeEntry {
        self.quads.get_mut(edge.quad().0)
    }

    /// Origin vertex of a primal edge.
    pub fn origin(&self, edge: FixedEdgeHandle) -> FixedVertexHandle {
        match self.entry(edge).origin[edge.primal_index()] {
            Some(vertex) => vertex,
            None => panic!("edge {edge:?} has no origin vertex"),
        }
    }

    /// Destination vertex of a primal edge.
    pub fn dest(&self, edge: FixedEdgeHandle) -> FixedVertexHandle {
        self.origin(edge.sym())
    }

    pub fn set_origin(&mut self, edge: FixedEdgeHandle, vertex: FixedVertexHandle) {
        let index = edge.primal_index();
        self.entry_mut(edge).origin[index] = Some(vertex);
    }

    pub fn set_endpoints(
        &mut self,
        edge: FixedEdgeHandle,
        origin: FixedVertexHandle,
        dest: FixedVertexHandle,
    ) {
        self.set_origin(edge, origin);
        self.set_origin(edge.sym(), dest);
    }

    /// Left face of a primal edge; `None` only transiently while a face is
    /// being torn down.
    pub fn left_face(&self, edge: FixedEdgeHandle) -> Option<FixedFaceHandle> {
        self.entry(edge).left_face[edge.primal_index()]
    }

    pub fn set_left_face(&mut self, edge: FixedEdgeHandle, face: Option<FixedFaceHandle>) {
        let index = edge.primal_index();
        self.entry_mut(edge).left_face[index] = face;
    }

    pub fn is_constrained(&self, edge: FixedEdgeHandle) -> bool {
        self.entry(edge).constrained
    }

    pub fn set_constrained(&mut self, edge: FixedEdgeHandle, constrained: bool) {
        self.entry_mut(edge).constrained = constrained;
    }

    /// The ring-0 directed edge of every live quad-edge.
    pub fn primal_edges(&self) -> impl Iterator<Item = FixedEdgeHandle> + '_ {
        self.quads
            .indices()
            .map(|index| FixedEdgeHandle::new(FixedQuadEdgeHandle::new(index), 0))
    }

    /// Both directed primal edges of every live quad-edge.
    pub fn directed_primal_edges(&self) -> impl Iterator<Item = FixedEdgeHandle> + '_ {
        self.primal_edges().flat_map(|edge| [edge, edge.sym()])
    }

    // -- navigation --------------------------------------------------------

    /// Next edge in a counterclockwise traverse of the origin star.
    pub fn onext(&self, edge: FixedEdgeHandle) -> FixedEdgeHandle {
        self.entry(edge).next[edge.ring() as usize]
    }

    fn set_next(&mut self, edge: FixedEdgeHandle, next: FixedEdgeHandle) {
        let ring = edge.ring() as usize;
        self.entry_mut(edge).next[ring] = next;
    }

    /// Next edge in a clockwise traverse of the origin star.
    pub fn oprev(&self, edge: FixedEdgeHandle) -> FixedEdgeHandle {
        self.onext(edge.rot()).rot()
    }

    /// Next edge in a counterclockwise traverse of the destination star.
    pub fn dnext(&self, edge: FixedEdgeHandle) -> FixedEdgeHandle {
        self.onext(edge.sym()).sym()
    }

    /// Next edge in a clockwise traverse of the destination star.
    pub fn dprev(&self, edge: FixedEdgeHandle) -> FixedEdgeHandle {
        self.onext(edge.rot_inv()).rot_inv()
    }

    /// Next edge in a counterclockwise traverse of the left face.
    pub fn lnext(&self, edge: FixedEdgeHandle) -> FixedEdgeHandle {
        self.onext(edge.rot_inv()).rot()
    }

    /// Previous edge in a counterclockwise traverse of the left face.
    pub fn lprev(&self, edge: FixedEdgeHandle) -> FixedEdgeHandle {
        self.onext(edge).sym()
    }

    /// Next edge in a counterclockwise traverse of the right face.
    pub fn rnext(&self, edge: FixedEdgeHandle) -> FixedEdgeHandle {
        self.onext(edge.rot()).rot_inv()
    }

    /// Previous edge in a counterclockwise traverse of the right face.
    pub fn rprev(&self, edge: FixedEdgeHandle) -> FixedEdgeHandle {
        self.onext(edge.sym())
    }

    /// The Guibas-Stolfi splice primitive.
    ///
    /// If `a` and `b` are part of the same origin ring, the ring is split
    /// in two; otherwise their two rings are merged into one. The dual
    /// rings through `a` and `b` undergo the inverse operation. This is the
    /// only operation that rewires `next` links.
    pub fn splice(&mut self, a: FixedEdgeHandle, b: FixedEdgeHandle) {
        let alpha = self.onext(a).rot();
        let beta = self.onext(b).rot();

        let b_onext = self.onext(b);
        let a_onext = self.onext(a);
        let beta_onext = self.onext(beta);
        let alpha_onext = self.onext(alpha);

        self.set_next(a, b_onext);
        self.set_next(b, a_onext);
        self.set_next(alpha, beta_onext);
        self.set_next(beta, alpha_onext);
    }
}

impl<V: HasPosition> QuadEdgeMesh<V> {
    /// Position of a vertex in the parameter plane, as `f64`.
    pub fn position(&self, vertex: FixedVertexHandle) -> Point2<f64> {
        match &self.vertex(vertex).data {
            VertexData::Real(data) => data.position().to_f64(),
            VertexData::Sentinel(position) => *position,
        }
    }

    /// User data of a vertex. Panics for the construction-time sentinel
    /// vertices, which never escape to callers.
    pub fn vertex_data(&self, vertex: FixedVertexHandle) -> &V {
        match &self.vertex(vertex).data {
            VertexData::Real(data) => data,
            VertexData::Sentinel(_) => panic!("sentinel vertices carry no user data"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Point2;

    fn sentinel(x: f64, y: f64) -> VertexData<Point2<f64>> {
        VertexData::Sentinel(Point2::new(x, y))
    }

    #[test]
    fn test_fresh_quad_loops() {
        let mut mesh: QuadEdgeMesh<Point2<f64>> = QuadEdgeMesh::default();
        let e = mesh.make_edge();

        // Primal rings are self-loops, dual rings loop to each other.
        assert_eq!(mesh.onext(e), e);
        assert_eq!(mesh.onext(e.sym()), e.sym());
        assert_eq!(mesh.onext(e.rot()), e.rot_inv());
        assert_eq!(mesh.onext(e.rot_inv()), e.rot());

        // A lone edge's left face cycle is e -> sym(e) -> e.
        assert_eq!(mesh.lnext(e), e.sym());
        assert_eq!(mesh.lnext(e.sym()), e);
    }

    #[test]
    fn test_splice_merges_origin_rings() {
        let mut mesh: QuadEdgeMesh<Point2<f64>> = QuadEdgeMesh::default();
        let a = mesh.make_edge();
        let b = mesh.make_edge();

        mesh.splice(a, b);

        // One ring of two edges around the shared origin.
        assert_eq!(mesh.onext(a), b);
        assert_eq!(mesh.onext(b), a);
        assert_eq!(mesh.oprev(a), b);

        // Splicing again splits the ring back apart.
        mesh.splice(a, b);
        assert_eq!(mesh.onext(a), a);
        assert_eq!(mesh.onext(b), b);
    }

    #[test]
    fn test_triangle_ring_walk() {
        // Build the edge cycle of a triangle the way the triangulation
        // bootstraps its enclosing triangle.
        let mut mesh: QuadEdgeMesh<Point2<f64>> = QuadEdgeMesh::default();
        let va = mesh.add_vertex(sentinel(0.0, 0.0));
        let vb = mesh.add_vertex(sentinel(1.0, 0.0));
        let vc = mesh.add_vertex(sentinel(0.0, 1.0));

        let ea = mesh.make_edge();
        mesh.set_endpoints(ea, va, vb);
        let eb = mesh.make_edge();
        mesh.set_endpoints(eb, vb, vc);
        mesh.splice(ea.sym(), eb);
        let ec = mesh.make_edge();
        mesh.set_endpoints(ec, vc, va);
        mesh.splice(eb.sym(), ec);
        mesh.splice(ec.sym(), ea);

        // Left face cycle has length three.
        assert_eq!(mesh.lnext(ea), eb);
        assert_eq!(mesh.lnext(eb), ec);
        assert_eq!(mesh.lnext(ec), ea);
        assert_eq!(mesh.lprev(ea), ec);

        // So does the right face cycle, in the opposite direction.
        assert_eq!(mesh.rnext(ea), ec);
        assert_eq!(mesh.rnext(ec), eb);
        assert_eq!(mesh.rnext(eb), ea);

        // Origin and destination relations.
        assert_eq!(mesh.origin(ea), va);
        assert_eq!(mesh.dest(ea), vb);
        assert_eq!(mesh.origin(eb), vb);
        assert_eq!(mesh.dest(ec), va);
        assert_eq!(mesh.origin(ea.sym()), vb);
    }

    #[test]
    fn test_constrained_flag_is_shared_by_all_rings() {
        let mut mesh: QuadEdgeMesh<Point2<f64>> = QuadEdgeMesh::default();
        let e = mesh.make_edge();
        assert!(!mesh.is_constrained(e));
        mesh.set_constrained(e.sym(), true);
        assert!(mesh.is_constrained(e));
        assert!(mesh.is_constrained(e.rot()));
        assert!(mesh.is_constrained(e.rot_inv()));
    }
}
