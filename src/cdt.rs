//! Constrained Delaunay triangulation of a planar straight-line graph.
//!
//! Construction is incremental: a large enclosing triangle is built first,
//! the input points are inserted one by one (restoring the Delaunay
//! property after each insertion by edge flips), then the constraint
//! segments are forced into the triangulation by swapping the edges they
//! cross away (Dyn, Goren & Rippa, "Transforming triangulations in
//! polygonal domains", CAGD 10(6), 1993). Finally the enclosing triangle
//! and everything outside the convex hull is removed.

use core::fmt;

use log::{debug, trace};
use smallvec::SmallVec;

use crate::predicates::{classify, is_left, is_left_or_on, Orientation};
use crate::quadedge::{FixedEdgeHandle, FixedFaceHandle, FixedVertexHandle, QuadEdgeMesh, VertexData};
use crate::{predicates, HasPosition, Point2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The error type reported by the triangulation constructors.
///
/// All variants describe invalid *input*; the triangulation is never left
/// in a partially built state. Violations of internal invariants are bugs
/// and abort via debug assertions instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CdtError {
    /// Fewer than three input points were given.
    InsufficientPoints,
    /// All input points lie on a single line.
    CollinearPoints,
    /// A segment endpoint index does not refer to an input point.
    SegmentIndexOutOfBounds,
    /// Two input segments intersect in their interiors, or name the same
    /// endpoint pair twice.
    CrossingSegments,
    /// An inserted point lies in the interior of a constraint edge.
    PointOnConstrainedEdge,
    /// A segment overlaps an existing constraint edge.
    DegenerateSegment,
}

impl fmt::Display for CdtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            CdtError::InsufficientPoints => "at least three input points are required",
            CdtError::CollinearPoints => "the input points are all collinear",
            CdtError::SegmentIndexOutOfBounds => {
                "a segment refers to a point index that is out of bounds"
            }
            CdtError::CrossingSegments => {
                "an input segment intersects the interior of another segment"
            }
            CdtError::PointOnConstrainedEdge => {
                "a point lies in the interior of a constraint edge"
            }
            CdtError::DegenerateSegment => "a segment overlaps an existing constraint edge",
        };
        message.fmt(f)
    }
}

impl std::error::Error for CdtError {}

/// A two-dimensional
/// [constrained Delaunay triangulation](https://en.wikipedia.org/wiki/Constrained_Delaunay_triangulation)
/// built on the quad-edge data structure.
///
/// The triangulation contains every input segment as a *constraint edge*;
/// every non-constrained edge satisfies the Delaunay property relative to
/// the constraints. Segments may share endpoints but must not cross or
/// overlap anywhere else.
///
/// The vertex type is anything implementing [`HasPosition`], so vertices
/// can carry arbitrary payload (for example the 3d position of a surface
/// sample) through the triangulation.
///
/// # Example
///
/// ```
/// use quadedge::{ConstrainedDelaunayTriangulation, Point2};
///
/// # fn main() -> Result<(), quadedge::CdtError> {
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(10.0, 10.0),
///     Point2::new(0.0, 10.0),
/// ];
/// let cdt = ConstrainedDelaunayTriangulation::with_segments(points, &[[0, 2]])?;
/// assert_eq!(cdt.num_vertices(), 4);
/// assert_eq!(cdt.num_constrained_edges(), 1);
/// # Ok(())
/// # }
/// ```
pub struct ConstrainedDelaunayTriangulation<V: HasPosition> {
    mesh: QuadEdgeMesh<V>,
    starting_edge: FixedEdgeHandle,
    max_coord: f64,
}

impl<V: HasPosition> ConstrainedDelaunayTriangulation<V> {
    /// Builds the Delaunay triangulation of a point set.
    ///
    /// Duplicate points are discarded; the first occurrence wins.
    pub fn new(points: Vec<V>) -> Result<Self, CdtError> {
        Self::build(points, &[])
    }

    /// Builds the constrained Delaunay triangulation of a point set and a
    /// set of segments. Each segment names the indices of its two
    /// endpoints in `points`.
    pub fn with_segments(points: Vec<V>, segments: &[[usize; 2]]) -> Result<Self, CdtError> {
        Self::build(points, segments)
    }

    fn build(points: Vec<V>, segments: &[[usize; 2]]) -> Result<Self, CdtError> {
        let positions: Vec<Point2<f64>> = points
            .iter()
            .map(|point| point.position().to_f64())
            .collect();

        check_point_consistency(&positions)?;
        check_segment_consistency(&positions, segments)?;

        let mut max = 0.0f64;
        for position in &positions {
            max = max.max(position.x.abs()).max(position.y.abs());
        }
        // The sentinel coordinate, also used by the modified in-circle
        // test to recognize enclosing-triangle vertices.
        let max_coord = max * 3.0;

        debug!(
            "triangulating {} points, {} segments (max_coord = {})",
            points.len(),
            segments.len(),
            max_coord
        );

        let mut cdt = Self::create_enclosing_triangle(max_coord);
        for point in points {
            cdt.insert_point(point)?;
        }
        for segment in segments {
            cdt.insert_segment(positions[segment[0]], positions[segment[1]])?;
        }
        cdt.remove_enclosing_triangle();

        #[cfg(any(test, fuzzing))]
        cdt.sanity_check();

        Ok(cdt)
    }

    // -- accessors ---------------------------------------------------------

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.mesh.num_vertices()
    }

    /// Number of undirected edges.
    pub fn num_undirected_edges(&self) -> usize {
        self.mesh.num_undirected_edges()
    }

    /// Number of faces, including the single unbounded face.
    pub fn num_faces(&self) -> usize {
        self.mesh.num_faces()
    }

    /// Number of bounded faces, i.e. triangles.
    pub fn num_bounded_faces(&self) -> usize {
        self.mesh
            .face_handles()
            .filter(|&face| self.mesh.face(face).bounded)
            .count()
    }

    /// Number of constraint edges.
    pub fn num_constrained_edges(&self) -> usize {
        self.mesh
            .primal_edges()
            .filter(|&edge| self.mesh.is_constrained(edge))
            .count()
    }

    /// The edge point location starts from.
    pub fn starting_edge(&self) -> FixedEdgeHandle {
        self.starting_edge
    }

    /// Three times the largest absolute input coordinate; the enclosing
    /// triangle was built from this value.
    pub fn max_coord(&self) -> f64 {
        self.max_coord
    }

    /// Iterates over all vertex handles.
    pub fn vertices(&self) -> impl Iterator<Item = FixedVertexHandle> + '_ {
        self.mesh.vertex_handles()
    }

    /// Iterates over one directed representative of every undirected edge.
    pub fn undirected_edges(&self) -> impl Iterator<Item = FixedEdgeHandle> + '_ {
        self.mesh.primal_edges()
    }

    /// Iterates over all face handles, including the unbounded face.
    pub fn faces(&self) -> impl Iterator<Item = FixedFaceHandle> + '_ {
        self.mesh.face_handles()
    }

    /// The payload of a vertex.
    pub fn vertex_data(&self, vertex: FixedVertexHandle) -> &V {
        self.mesh.vertex_data(vertex)
    }

    /// The position of a vertex, converted to `f64`.
    pub fn vertex_position(&self, vertex: FixedVertexHandle) -> Point2<f64> {
        self.mesh.position(vertex)
    }

    /// Origin vertex of a directed (primal) edge.
    pub fn edge_origin(&self, edge: FixedEdgeHandle) -> FixedVertexHandle {
        self.mesh.origin(edge)
    }

    /// Destination vertex of a directed (primal) edge.
    pub fn edge_dest(&self, edge: FixedEdgeHandle) -> FixedVertexHandle {
        self.mesh.dest(edge)
    }

    /// The face to the left of a directed edge.
    pub fn edge_face(&self, edge: FixedEdgeHandle) -> FixedFaceHandle {
        match self.mesh.left_face(edge) {
            Some(face) => face,
            None => panic!("edge {edge:?} has no left face"),
        }
    }

    /// Whether an edge is a constraint edge.
    pub fn is_constrained(&self, edge: FixedEdgeHandle) -> bool {
        self.mesh.is_constrained(edge)
    }

    /// Whether a face is bounded (a triangle).
    pub fn is_bounded(&self, face: FixedFaceHandle) -> bool {
        self.mesh.face(face).bounded
    }

    /// An edge on the boundary of a face.
    pub fn face_edge(&self, face: FixedFaceHandle) -> FixedEdgeHandle {
        self.mesh.face(face).edge
    }

    /// Next edge in a counterclockwise traverse of the origin star.
    pub fn onext(&self, edge: FixedEdgeHandle) -> FixedEdgeHandle {
        self.mesh.onext(edge)
    }

    /// Next edge in a clockwise traverse of the origin star.
    pub fn oprev(&self, edge: FixedEdgeHandle) -> FixedEdgeHandle {
        self.mesh.oprev(edge)
    }

    /// Next edge in a counterclockwise traverse of the left face.
    pub fn lnext(&self, edge: FixedEdgeHandle) -> FixedEdgeHandle {
        self.mesh.lnext(edge)
    }

    /// Previous edge in a counterclockwise traverse of the left face.
    pub fn lprev(&self, edge: FixedEdgeHandle) -> FixedEdgeHandle {
        self.mesh.lprev(edge)
    }

    /// Looks up the directed edge connecting two vertices, if one exists.
    pub fn get_edge_between(
        &self,
        from: FixedVertexHandle,
        to: FixedVertexHandle,
    ) -> Option<FixedEdgeHandle> {
        let start = self.mesh.vertex(from).out_edge?;
        let mut edge = start;
        loop {
            if self.mesh.dest(edge) == to {
                return Some(edge);
            }
            edge = self.mesh.onext(edge);
            if edge == start {
                return None;
            }
        }
    }

    /// Returns `true` if the two vertices are connected by a constraint
    /// edge.
    pub fn exists_constraint(&self, from: FixedVertexHandle, to: FixedVertexHandle) -> bool {
        self.get_edge_between(from, to)
            .is_some_and(|edge| self.mesh.is_constrained(edge))
    }

    pub(crate) fn mesh(&self) -> &QuadEdgeMesh<V> {
        &self.mesh
    }

    // -- geometry helpers --------------------------------------------------

    fn position(&self, vertex: FixedVertexHandle) -> Point2<f64> {
        self.mesh.position(vertex)
    }

    /// `true` if `p` lies strictly inside the right face of `e`.
    fn right_of(&self, p: Point2<f64>, edge: FixedEdgeHandle) -> bool {
        let origin = self.position(self.mesh.origin(edge));
        let dest = self.position(self.mesh.dest(edge));
        !is_left_or_on(origin, dest, p)
    }

    /// `true` if `p` lies on the closed edge `e` (on an endpoint or
    /// strictly between them).
    fn on_edge(&self, p: Point2<f64>, edge: FixedEdgeHandle) -> bool {
        let origin = self.position(self.mesh.origin(edge));
        let dest = self.position(self.mesh.dest(edge));
        matches!(
            classify(origin, dest, p),
            Orientation::Origin | Orientation::Destination | Orientation::Between
        )
    }

    /// The in-circle test, modified so that the enclosing triangle never
    /// influences the Delaunay topology of the real input (after the
    /// strategy in de Berg et al., "Computational Geometry", 3rd ed.,
    /// p. 204).
    ///
    /// Each of `a`, `b`, `c` gets a rank: 1 if its first coordinate sits on
    /// the sentinel magnitude, plus 2 if its second coordinate does. Real
    /// vertices have rank 0.
    fn in_circle(&self, a: Point2<f64>, b: Point2<f64>, c: Point2<f64>, d: Point2<f64>) -> bool {
        let rank = |p: Point2<f64>| {
            let mut rank = 0u8;
            if p.x.abs() == self.max_coord {
                rank = 1;
            }
            if p.y.abs() == self.max_coord {
                rank += 2;
            }
            rank
        };
        let rank_a = rank(a);
        let rank_b = rank(b);
        let rank_c = rank(c);

        if rank_a == 0 && rank_b == 0 && rank_c == 0 {
            return predicates::incircle(a, b, c, d) > 0.0;
        }

        if rank_b > rank_c && rank_b > rank_a {
            // Either the quadrilateral [a, b, c, d] is not strictly convex
            // or [a, c] lies on the convex hull of the real input; the edge
            // must not be flipped.
            return false;
        }

        // Flip exactly if [a, b, c, d] is strictly convex. Keeping the edge
        // incident to the lowest-ranked vertex keeps the flips terminating.
        is_left(b, c, d) && !is_left_or_on(b, a, d)
    }

    fn is_convex(&self, a: Point2<f64>, b: Point2<f64>, c: Point2<f64>, d: Point2<f64>) -> bool {
        is_left(b, c, d) && !is_left_or_on(b, a, d) && is_left(a, c, d)
    }

    /// `true` if `c` and `d` lie strictly on opposite sides of the line
    /// through `a -> b`, with `c` and `d` also separating `a` and `b`.
    fn cross_segment(&self, a: Point2<f64>, b: Point2<f64>, c: Point2<f64>, d: Point2<f64>) -> bool {
        if is_left(a, b, c) {
            return is_left(b, a, d);
        }
        if is_left(b, a, c) {
            return is_left(a, b, d);
        }
        false
    }

    // -- construction ------------------------------------------------------

    /// Creates the triangulation containing only the enclosing triangle
    /// `(max, 0), (0, max), (-max, -max)`: three edges, one bounded and
    /// one unbounded face.
    fn create_enclosing_triangle(max_coord: f64) -> Self {
        let mut mesh = QuadEdgeMesh::default();

        let va = mesh.add_vertex(VertexData::Sentinel(Point2::new(max_coord, 0.0)));
        let vb = mesh.add_vertex(VertexData::Sentinel(Point2::new(0.0, max_coord)));
        let vc = mesh.add_vertex(VertexData::Sentinel(Point2::new(-max_coord, -max_coord)));

        let ea = mesh.make_edge();
        mesh.set_endpoints(ea, va, vb);
        let eb = mesh.make_edge();
        mesh.set_endpoints(eb, vb, vc);
        mesh.splice(ea.sym(), eb);
        let ec = mesh.make_edge();
        mesh.set_endpoints(ec, vc, va);
        mesh.splice(eb.sym(), ec);
        mesh.splice(ec.sym(), ea);

        mesh.set_out_edge(va, ea);
        mesh.set_out_edge(vb, eb);
        mesh.set_out_edge(vc, ec);

        let inner = mesh.create_face(ea, true);
        mesh.set_left_face(ea, Some(inner));
        mesh.set_left_face(eb, Some(inner));
        mesh.set_left_face(ec, Some(inner));

        let outer = mesh.create_face(ea.sym(), false);
        mesh.set_left_face(ea.sym(), Some(outer));
        mesh.set_left_face(eb.sym(), Some(outer));
        mesh.set_left_face(ec.sym(), Some(outer));

        ConstrainedDelaunayTriangulation {
            mesh,
            starting_edge: ea,
            max_coord,
        }
    }

    /// Walks the triangulation from the starting edge towards `p` and
    /// returns an edge containing `p` or bounding a triangle containing
    /// it. All inputs lie strictly inside the enclosing triangle, so the
    /// walk terminates.
    fn locate(&self, p: Point2<f64>) -> FixedEdgeHandle {
        let mut edge = self.starting_edge;
        loop {
            if p == self.position(self.mesh.origin(edge)) || p == self.position(self.mesh.dest(edge))
            {
                return edge;
            }
            if self.right_of(p, edge) {
                edge = edge.sym();
            } else if !self.right_of(p, self.mesh.onext(edge)) {
                edge = self.mesh.onext(edge);
            } else if !self.right_of(p, self.mesh.dprev(edge)) {
                edge = self.mesh.dprev(edge);
            } else {
                return edge;
            }
        }
    }

    /// Inserts one point. Points coinciding with an existing vertex are
    /// discarded.
    fn insert_point(&mut self, point: V) -> Result<(), CdtError> {
        let p = point.position().to_f64();
        let edge = self.locate(p);

        if p == self.position(self.mesh.origin(edge)) || p == self.position(self.mesh.dest(edge)) {
            return Ok(());
        }

        let opposite = self.split_edge_or_triangle(point, p, edge)?;

        // `opposite` faces the new vertex across its triangle; the ring of
        // such edges is exactly the set of now-suspicious edges.
        self.restore_delaunay_after_insert(p, opposite);
        Ok(())
    }

    /// Connects `p` to the corners of the triangle containing it (or, if
    /// `p` lies on an edge, of the quadrilateral left after deleting that
    /// edge). Returns an edge opposite the new vertex.
    fn split_edge_or_triangle(
        &mut self,
        point: V,
        p: Point2<f64>,
        edge: FixedEdgeHandle,
    ) -> Result<FixedEdgeHandle, CdtError> {
        let mut edge = edge;
        if self.on_edge(p, edge) {
            if self.mesh.is_constrained(edge) {
                return Err(CdtError::PointOnConstrainedEdge);
            }
            // Remove the split edge; its two triangles merge into a
            // quadrilateral around p.
            edge = self.mesh.oprev(edge);
            self.delete_face(self.edge_face(edge));
            let doomed = self.mesh.onext(edge);
            self.delete_edge(doomed);
        }

        // First spoke, from the polygon corner at `edge`'s origin to p.
        let spoke = self.mesh.make_edge();
        let new_vertex = self.mesh.add_vertex(VertexData::Real(point));
        let origin = self.mesh.origin(edge);
        self.mesh.set_endpoints(spoke, origin, new_vertex);
        self.mesh.set_out_edge(new_vertex, spoke.sym());
        self.mesh.splice(spoke, edge);

        self.starting_edge = spoke;

        // Fan out the remaining spokes, creating one face per triangle.
        let mut spoke = spoke;
        loop {
            spoke = self.connect(edge, spoke.sym());
            edge = self.mesh.oprev(spoke);

            let face = self.mesh.create_face(spoke, true);
            self.mesh.set_left_face(spoke, Some(face));
            let lnext = self.mesh.lnext(spoke);
            self.mesh.set_left_face(lnext, Some(face));
            let lprev = self.mesh.lprev(spoke);
            self.mesh.set_left_face(lprev, Some(face));

            if self.mesh.lnext(edge) == self.starting_edge {
                break;
            }
        }

        // The last triangle recycles the face record of the polygon that
        // was split.
        let face = self.edge_face(edge);
        self.mesh.set_face_edge(face, edge);
        let lnext = self.mesh.lnext(edge);
        self.mesh.set_left_face(lnext, Some(face));
        let lprev = self.mesh.lprev(edge);
        self.mesh.set_left_face(lprev, Some(face));

        Ok(edge)
    }

    /// Adds an edge from the destination of `ea` to the origin of `eb`, so
    /// that all three share the same left face afterwards.
    fn connect(&mut self, ea: FixedEdgeHandle, eb: FixedEdgeHandle) -> FixedEdgeHandle {
        let new_edge = self.mesh.make_edge();
        let lnext = self.mesh.lnext(ea);
        self.mesh.splice(new_edge, lnext);
        self.mesh.splice(new_edge.sym(), eb);
        let origin = self.mesh.dest(ea);
        let dest = self.mesh.origin(eb);
        self.mesh.set_endpoints(new_edge, origin, dest);
        new_edge
    }

    /// Rotates `edge` counterclockwise inside the quadrilateral formed by
    /// its two adjacent triangles.
    fn swap(&mut self, edge: FixedEdgeHandle) {
        let ea = self.mesh.oprev(edge);
        let eb = self.mesh.oprev(edge.sym());

        // The endpoint stars must not enter through the edge being
        // detached.
        let ea_origin = self.mesh.origin(ea);
        self.mesh.set_out_edge(ea_origin, ea);
        let eb_origin = self.mesh.origin(eb);
        self.mesh.set_out_edge(eb_origin, eb);

        self.mesh.splice(edge, ea);
        self.mesh.splice(edge.sym(), eb);
        let ea_lnext = self.mesh.lnext(ea);
        self.mesh.splice(edge, ea_lnext);
        let eb_lnext = self.mesh.lnext(eb);
        self.mesh.splice(edge.sym(), eb_lnext);

        let origin = self.mesh.dest(ea);
        let dest = self.mesh.dest(eb);
        self.mesh.set_endpoints(edge, origin, dest);
    }

    /// After a swap, re-anchors the two face records on the rotated edge
    /// and repairs the face pointers of the quadrilateral's edges.
    fn repair_faces_after_swap(&mut self, edge: FixedEdgeHandle) {
        let face = self.edge_face(edge);
        self.mesh.set_face_edge(face, edge);
        let lprev = self.mesh.lprev(edge);
        self.mesh.set_left_face(lprev, Some(face));

        let sym_face = self.edge_face(edge.sym());
        self.mesh.set_face_edge(sym_face, edge.sym());
        let sym_lprev = self.mesh.lprev(edge.sym());
        self.mesh.set_left_face(sym_lprev, Some(sym_face));
    }

    /// Removes an edge, splicing it out of both endpoint stars. Endpoint
    /// vertices that lose their last edge are removed as well.
    fn delete_edge(&mut self, edge: FixedEdgeHandle) {
        let origin = self.mesh.origin(edge);
        let dest = self.mesh.dest(edge);

        let origin_orphaned = self.mesh.oprev(edge) == edge;
        if !origin_orphaned {
            let oprev = self.mesh.oprev(edge);
            self.mesh.set_out_edge(origin, oprev);
        }
        let dest_orphaned = self.mesh.dprev(edge) == edge;
        if !dest_orphaned {
            let sym_oprev = self.mesh.oprev(edge.sym());
            self.mesh.set_out_edge(dest, sym_oprev);
        }

        let oprev = self.mesh.oprev(edge);
        self.mesh.splice(edge, oprev);
        let sym_oprev = self.mesh.oprev(edge.sym());
        self.mesh.splice(edge.sym(), sym_oprev);

        self.mesh.remove_quad(edge.quad());

        if origin_orphaned {
            self.mesh.remove_vertex(origin);
        }
        if dest_orphaned {
            self.mesh.remove_vertex(dest);
        }
    }

    /// Removes a bounded face record, clearing the face pointers of its
    /// three edges.
    fn delete_face(&mut self, face: FixedFaceHandle) {
        debug_assert!(self.mesh.face(face).bounded);
        let edge = self.mesh.face(face).edge;
        self.mesh.set_left_face(edge, None);
        let lprev = self.mesh.lprev(edge);
        self.mesh.set_left_face(lprev, None);
        let lnext = self.mesh.lnext(edge);
        self.mesh.set_left_face(lnext, None);
        self.mesh.remove_face(face);
    }

    /// Restores the Delaunay property after `p` was inserted, walking
    /// clockwise around the boundary of `p`'s star and flipping every
    /// suspicious edge that fails the in-circle test.
    fn restore_delaunay_after_insert(&mut self, p: Point2<f64>, edge: FixedEdgeHandle) {
        let mut edge = edge;
        loop {
            let t = self.mesh.oprev(edge);
            let t_dest = self.position(self.mesh.dest(t));

            let flip = !self.mesh.is_constrained(edge)
                && self.right_of(t_dest, edge) // not a boundary edge
                && self.in_circle(
                    self.position(self.mesh.origin(edge)),
                    t_dest,
                    self.position(self.mesh.dest(edge)),
                    p,
                );
            if flip {
                self.swap(edge);
                self.repair_faces_after_swap(edge);
                edge = self.mesh.oprev(edge);
            } else if self.mesh.onext(edge) == self.starting_edge {
                return;
            } else {
                let onext = self.mesh.onext(edge);
                edge = self.mesh.lprev(onext);
            }
        }
    }

    // -- constraint insertion ----------------------------------------------

    /// Forces the segment `p1 -> p2` into the triangulation as a chain of
    /// constraint edges. Both endpoints must already be vertices.
    fn insert_segment(&mut self, p1: Point2<f64>, p2: Point2<f64>) -> Result<(), CdtError> {
        trace!("inserting segment ({}, {}) -> ({}, {})", p1.x, p1.y, p2.x, p2.y);

        let mut e1 = self.locate(p1);
        if p1 != self.position(self.mesh.origin(e1)) {
            e1 = e1.sym();
            debug_assert_eq!(p1, self.position(self.mesh.origin(e1)));
        }

        // Already an edge of the triangulation?
        if p2 == self.position(self.mesh.dest(e1)) {
            self.mesh.set_constrained(e1, true);
            return Ok(());
        }

        let mut e2 = self.locate(p2);
        if p2 != self.position(self.mesh.origin(e2)) {
            e2 = e2.sym();
            debug_assert_eq!(p2, self.position(self.mesh.origin(e2)));
        }

        // The segment may pass through intermediate vertices; handle one
        // sub-segment per iteration.
        loop {
            let mut crossed: SmallVec<[FixedEdgeHandle; 8]> = SmallVec::new();
            let reached = self.vertices_on_right_side(e1, e2, &mut crossed)?;

            if crossed.is_empty() {
                // The sub-segment is already an edge; `reached`'s in-face
                // predecessor connects the two vertices.
                let existing = self.mesh.lprev(reached);
                debug_assert_eq!(
                    self.position(self.mesh.origin(existing)),
                    self.position(self.mesh.origin(e1))
                );
                self.mesh.set_constrained(existing, true);
            } else {
                let mut swapped: SmallVec<[FixedEdgeHandle; 8]> = SmallVec::new();
                self.swap_edges_away_from_constraint(e1, reached, &mut crossed, &mut swapped);

                // The edge swapped last is the new constraint edge.
                let constraint = match swapped.pop() {
                    Some(edge) => edge,
                    None => panic!("constraint insertion did not produce a segment edge"),
                };
                self.mesh.set_constrained(constraint, true);
                self.restore_delaunay_for(&swapped);
            }

            if self.position(self.mesh.origin(reached)) == p2 {
                return Ok(());
            }
            e1 = reached;
        }
    }

    /// Walks across the triangulation along the segment from `e1`'s origin
    /// to `e2`'s origin, collecting one incident edge per "right side"
    /// vertex of the crossed edges. Returns an edge whose origin is the
    /// first vertex on the segment after `e1`'s origin.
    fn vertices_on_right_side(
        &self,
        e1: FixedEdgeHandle,
        e2: FixedEdgeHandle,
        crossed: &mut SmallVec<[FixedEdgeHandle; 8]>,
    ) -> Result<FixedEdgeHandle, CdtError> {
        let p = self.position(self.mesh.origin(e1));
        let q = self.position(self.mesh.origin(e2));

        let mut edge = self.closest_edge_on_right_side(e1, q);

        let mut last: Option<FixedVertexHandle> = None;
        loop {
            let s = self.position(self.mesh.dest(edge));
            let orient = classify(p, q, s);
            debug_assert!(!matches!(
                orient,
                Orientation::Behind | Orientation::Beyond | Orientation::Origin
            ));

            if matches!(orient, Orientation::Between | Orientation::Destination) {
                // The destination lies on the segment; the walk is done.
                return Ok(self.mesh.lnext(edge));
            }

            // For a destination on the right, the crossing edge is the one
            // following `edge` around its left face; otherwise it is `edge`
            // itself.
            if orient == Orientation::Right {
                edge = self.mesh.lnext(edge);
            }

            if self.mesh.is_constrained(edge) {
                return Err(CdtError::DegenerateSegment);
            }

            let right_vertex = self.mesh.origin(edge);
            if last != Some(right_vertex) {
                crossed.push(edge);
                last = Some(right_vertex);
            }

            let sym = edge.sym();
            edge = self.mesh.lnext(sym);
        }
    }

    /// Finds the edge out of `e`'s origin that makes the largest
    /// non-positive angle with the oriented segment towards `q`: the
    /// closest edge on the right side of the segment's supporting line.
    fn closest_edge_on_right_side(&self, e: FixedEdgeHandle, q: Point2<f64>) -> FixedEdgeHandle {
        let p = self.position(self.mesh.origin(e));
        let s = self.position(self.mesh.dest(e));

        let orient = classify(p, q, s);
        debug_assert!(!matches!(orient, Orientation::Beyond | Orientation::Origin));

        if matches!(orient, Orientation::Destination | Orientation::Between) {
            return e;
        }

        // A destination on the left of (or behind on) the supporting line
        // means the star is scanned clockwise, otherwise counterclockwise
        // until the closest right-side edge is found.
        let ccw = !matches!(orient, Orientation::Left | Orientation::Behind);

        let mut candidate = e;
        loop {
            candidate = if ccw {
                self.mesh.onext(candidate)
            } else {
                self.mesh.oprev(candidate)
            };

            let s = self.position(self.mesh.dest(candidate));
            let orient = classify(p, q, s);
            debug_assert!(!matches!(orient, Orientation::Beyond | Orientation::Origin));

            match orient {
                Orientation::Destination | Orientation::Between => return candidate,
                Orientation::Left if ccw => {
                    // Crossed from the right side over the supporting
                    // line; the previous edge was the closest.
                    return self.mesh.oprev(candidate);
                }
                Orientation::Right if !ccw => return candidate,
                _ => {}
            }
        }
    }

    /// Finds the two edges incident to `edge`'s origin that enclose all
    /// crossing edges incident to it (relative to the segment `p -> q`).
    fn find_enclosing_edges(
        &self,
        p: Point2<f64>,
        q: Point2<f64>,
        edge: FixedEdgeHandle,
    ) -> (FixedEdgeHandle, FixedEdgeHandle) {
        let s = self.position(self.mesh.origin(edge));
        debug_assert!(self.cross_segment(p, q, s, self.position(self.mesh.dest(edge))));

        let mut left = self.mesh.lprev(edge).sym();
        loop {
            debug_assert_eq!(self.position(self.mesh.origin(left)), s);
            let t = self.position(self.mesh.dest(left));
            if self.cross_segment(p, q, s, t) && left != edge {
                left = self.mesh.lprev(left).sym();
            } else {
                break;
            }
        }

        let mut right = self.mesh.lnext(edge.sym());
        loop {
            debug_assert_eq!(self.mesh.origin(right), self.mesh.origin(edge));
            let t = self.position(self.mesh.dest(right));
            if self.cross_segment(p, q, s, t) && right != edge {
                right = self.mesh.lnext(right.sym());
            } else {
                break;
            }
        }

        (left, right)
    }

    /// Swaps all edges crossing the segment from `e1`'s origin to `e2`'s
    /// origin away from it, following Dyn, Goren & Rippa: repeatedly pick
    /// a right-side vertex whose enclosing angle is below 180 degrees, then swap
    /// every swappable crossing edge incident to it until none remain.
    ///
    /// Edges whose swapped position no longer crosses the segment are
    /// appended to `swapped`; the last of them realizes the segment.
    fn swap_edges_away_from_constraint(
        &mut self,
        e1: FixedEdgeHandle,
        e2: FixedEdgeHandle,
        crossed: &mut SmallVec<[FixedEdgeHandle; 8]>,
        swapped: &mut SmallVec<[FixedEdgeHandle; 8]>,
    ) {
        debug_assert!(!crossed.is_empty());
        debug_assert!(swapped.is_empty());

        let p = self.position(self.mesh.origin(e1));
        let q = self.position(self.mesh.origin(e2));

        loop {
            // Find a vertex whose enclosing angle is smaller than 180 degrees;
            // the existence of one is guaranteed (Dyn-Goren-Rippa, lemmas
            // 2.2 and 2.3).
            let mut selection = None;
            for (index, &candidate) in crossed.iter().enumerate() {
                let (left, right) = self.find_enclosing_edges(p, q, candidate);
                let a = self.position(self.mesh.dest(left));
                let b = self.position(self.mesh.origin(right));
                let c = self.position(self.mesh.dest(right));
                if is_left(a, b, c) {
                    selection = Some((index, left, right));
                    break;
                }
            }
            let (index, left, right) = match selection {
                Some(selection) => selection,
                None => panic!("no swappable vertex while inserting a constraint"),
            };

            // Swap every crossing edge enclosed by `left` and `right`. A
            // swap can make a previously unswappable neighbor swappable,
            // so the sweep repeats until the pocket is empty.
            while left != self.mesh.lprev(right).sym() {
                let mut edge = self.mesh.lprev(right).sym();
                loop {
                    let a = self.position(self.mesh.origin(edge));
                    let c = self.position(self.mesh.dest(edge));
                    debug_assert!(self.cross_segment(p, q, a, c));

                    let b = self.position(self.mesh.origin(self.mesh.lprev(edge.sym())));
                    let d = self.position(self.mesh.origin(self.mesh.lprev(edge)));

                    if self.is_convex(a, b, c, d) {
                        let next = self.mesh.lnext(edge.sym());
                        self.swap(edge);
                        if !self.cross_segment(p, q, b, d) {
                            swapped.push(edge);
                        }
                        self.repair_faces_after_swap(edge);
                        edge = next;
                    }

                    edge = self.mesh.lprev(edge).sym();
                    if edge == left {
                        break;
                    }
                }
            }

            crossed.remove(index);
            if crossed.is_empty() {
                return;
            }
        }
    }

    /// Applies the in-circle test to each edge of a list of unconstrained
    /// interior edges and swaps the failures, restoring the constrained
    /// Delaunay property after a segment insertion.
    fn restore_delaunay_for(&mut self, edges: &[FixedEdgeHandle]) {
        for &edge in edges {
            debug_assert!(!self.mesh.is_constrained(edge));

            let t = self.mesh.oprev(edge);
            let opposite = self.position(self.mesh.dest(self.mesh.onext(edge)));
            let failed = self.in_circle(
                self.position(self.mesh.origin(edge)),
                self.position(self.mesh.dest(t)),
                self.position(self.mesh.dest(edge)),
                opposite,
            );
            if failed {
                self.swap(edge);
                self.repair_faces_after_swap(edge);
            }
        }
    }

    // -- enclosing triangle removal ----------------------------------------

    /// Removes the three sentinel vertices together with every triangle
    /// incident to them, leaving exactly the triangulation of the convex
    /// hull of the real input.
    fn remove_enclosing_triangle(&mut self) {
        let mut next = self.find_enclosing_triangle_edge();
        for _ in 0..3 {
            let current = next;
            next = self.mesh.onext(current.sym());
            self.remove_boundary_vertex(current);
        }
    }

    /// Locates an edge of the enclosing triangle via the sentinel at
    /// `(max_coord, 0)`.
    fn find_enclosing_triangle_edge(&self) -> FixedEdgeHandle {
        let corner = Point2::new(self.max_coord, 0.0);
        let mut edge = self.locate(corner);

        if self.position(self.mesh.origin(edge)).x != self.max_coord {
            edge = edge.sym();
            debug_assert_eq!(self.position(self.mesh.origin(edge)).x, self.max_coord);
        }

        // Rotate around the corner until the edge towards (0, max) is
        // found; that edge lies on the enclosing triangle.
        while self.position(self.mesh.dest(edge)).y != self.max_coord {
            edge = self.mesh.onext(edge);
        }
        edge
    }

    /// Removes all triangles incident to a sentinel vertex, then the
    /// vertex itself. `edge` is a boundary edge whose origin is the
    /// sentinel.
    fn remove_boundary_vertex(&mut self, edge: FixedEdgeHandle) {
        let mut current = edge;
        let last = self.mesh.oprev(edge);

        loop {
            let next = self.mesh.onext(current);

            if current == self.starting_edge || current.sym() == self.starting_edge {
                self.starting_edge = self.mesh.dprev(current);
            }

            if next == last {
                // Two boundary edges left: remove the final triangle and
                // the vertex.
                self.remove_boundary_triangle_and_vertex(current, last);
                return;
            }
            self.remove_boundary_triangle(current);
            current = next;
        }
    }

    /// Removes a triangle with exactly one boundary edge.
    fn remove_boundary_triangle(&mut self, edge: FixedEdgeHandle) {
        let bounded = self.edge_face(edge);
        debug_assert!(self.mesh.face(bounded).bounded);

        let outer = self.edge_face(edge.sym());
        debug_assert!(!self.mesh.face(outer).bounded);

        self.delete_face(bounded);

        let lprev = self.mesh.lprev(edge);
        self.mesh.set_left_face(lprev, Some(outer));
        let lnext = self.mesh.lnext(edge);
        self.mesh.set_left_face(lnext, Some(outer));

        if self.mesh.face(outer).edge == edge.sym() {
            self.mesh.set_face_edge(outer, lnext);
        }

        self.delete_edge(edge);
    }

    /// Removes a triangle with exactly two boundary edges, and with it the
    /// vertex the two edges share.
    fn remove_boundary_triangle_and_vertex(&mut self, e1: FixedEdgeHandle, e2: FixedEdgeHandle) {
        if e1 != e2 {
            let outer = self.edge_face(e1.sym());
            debug_assert!(self.mesh.face(self.edge_face(e1)).bounded);
            debug_assert!(!self.mesh.face(outer).bounded);

            self.delete_face(self.edge_face(e1));

            let lnext = self.mesh.lnext(e1);
            self.mesh.set_left_face(lnext, Some(outer));
            if self.mesh.face(outer).edge == e2 {
                self.mesh.set_face_edge(outer, lnext);
            }

            self.delete_edge(e1);
            self.delete_edge(e2);
        } else {
            // The vertex has a single incident edge.
            self.delete_edge(e1);
        }
    }

    // -- verification ------------------------------------------------------

    #[cfg(any(test, fuzzing))]
    pub(crate) fn sanity_check(&self) {
        use hashbrown::HashSet;

        assert!(self.mesh.is_live_quad(self.starting_edge.quad()));

        let mut bounded_faces = HashSet::new();
        for face in self.mesh.face_handles() {
            let entry = self.mesh.face(face);
            if entry.bounded {
                bounded_faces.insert(face);
                // Left face cycles of triangles have length three, and all
                // three edges point back at the face.
                let e0 = entry.edge;
                let e1 = self.mesh.lnext(e0);
                let e2 = self.mesh.lnext(e1);
                assert_eq!(self.mesh.lnext(e2), e0);
                for edge in [e0, e1, e2] {
                    assert_eq!(self.mesh.left_face(edge), Some(face));
                    assert_eq!(self.mesh.lprev(self.mesh.lnext(edge)), edge);
                }
            }
        }

        for edge in self.mesh.primal_edges() {
            for edge in [edge, edge.sym()] {
                assert_eq!(edge.sym().sym(), edge);
                assert_eq!(edge.rot().rot().rot().rot(), edge);
                // Rotating around the origin stays at the origin.
                assert_eq!(
                    self.mesh.origin(self.mesh.onext(edge)),
                    self.mesh.origin(edge)
                );
                assert_eq!(self.mesh.origin(edge.sym()), self.mesh.dest(edge));
            }

            // Unconstrained interior edges satisfy the Delaunay property.
            let interior = bounded_faces.contains(&self.edge_face(edge))
                && bounded_faces.contains(&self.edge_face(edge.sym()));
            if interior && !self.mesh.is_constrained(edge) {
                let t = self.mesh.oprev(edge);
                let opposite = self.position(self.mesh.dest(self.mesh.onext(edge)));
                assert!(
                    !self.in_circle(
                        self.position(self.mesh.origin(edge)),
                        self.position(self.mesh.dest(t)),
                        self.position(self.mesh.dest(edge)),
                        opposite,
                    ),
                    "an unconstrained interior edge violates the Delaunay property"
                );
            }
        }

        for vertex in self.mesh.vertex_handles() {
            let out_edge = self.mesh.vertex(vertex).out_edge;
            let out_edge = out_edge.expect("vertex without an incident edge");
            assert_eq!(self.mesh.origin(out_edge), vertex);
        }

        // Euler's formula for the full subdivision, unbounded face
        // included.
        let v = self.num_vertices() as isize;
        let e = self.num_undirected_edges() as isize;
        let f = self.num_faces() as isize;
        assert_eq!(v - e + f, 2, "Euler characteristic violated");
    }
}

fn check_point_consistency(positions: &[Point2<f64>]) -> Result<(), CdtError> {
    if positions.len() < 3 {
        return Err(CdtError::InsufficientPoints);
    }

    let p = positions[0];
    let q = positions[1];
    let collinear_with_first_two = positions[2..]
        .iter()
        .all(|&s| predicates::is_collinear(p, q, s));
    if collinear_with_first_two {
        return Err(CdtError::CollinearPoints);
    }
    Ok(())
}

fn check_segment_consistency(
    positions: &[Point2<f64>],
    segments: &[[usize; 2]],
) -> Result<(), CdtError> {
    for segment in segments {
        if segment[0] >= positions.len() || segment[1] >= positions.len() {
            return Err(CdtError::SegmentIndexOutOfBounds);
        }
    }

    for (i, a) in segments.iter().enumerate() {
        let (a0, a1) = (positions[a[0]], positions[a[1]]);
        for b in &segments[..i] {
            let (b0, b1) = (positions[b[0]], positions[b[1]]);

            let res1 = classify(a0, a1, b0);
            let res2 = classify(a0, a1, b1);

            let opposite_sides = matches!(
                (res1, res2),
                (Orientation::Left, Orientation::Right) | (Orientation::Right, Orientation::Left)
            );
            if opposite_sides {
                // Segment b's endpoints straddle a's supporting line; the
                // segments cross if a's endpoints do not both avoid b's
                // interior side.
                match classify(b0, b1, a0) {
                    Orientation::Between => return Err(CdtError::CrossingSegments),
                    Orientation::Left => {
                        if matches!(
                            classify(b0, b1, a1),
                            Orientation::Right | Orientation::Between
                        ) {
                            return Err(CdtError::CrossingSegments);
                        }
                    }
                    Orientation::Right => {
                        if matches!(
                            classify(b0, b1, a1),
                            Orientation::Left | Orientation::Between
                        ) {
                            return Err(CdtError::CrossingSegments);
                        }
                    }
                    _ => {}
                }
            } else if matches!(
                (res1, res2),
                (Orientation::Origin, Orientation::Destination)
                    | (Orientation::Destination, Orientation::Origin)
            ) {
                // The same segment was given twice (possibly reversed).
                return Err(CdtError::CrossingSegments);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Point2;
    use rand::distributions::{Distribution, Uniform};
    use rand::SeedableRng;

    const SEED: &[u8; 32] = b"dVx1zAgkWyRu9bCnEfTq73mPLh5sJoK0";

    fn random_points(size: usize, range: f64, seed: &[u8; 32]) -> Vec<Point2<f64>> {
        let mut rng = rand::rngs::StdRng::from_seed(*seed);
        let range = Uniform::new(-range, range);
        (0..size)
            .map(|_| Point2::new(range.sample(&mut rng), range.sample(&mut rng)))
            .collect()
    }

    fn find_vertex<V: crate::HasPosition>(
        cdt: &ConstrainedDelaunayTriangulation<V>,
        position: Point2<f64>,
    ) -> FixedVertexHandle {
        cdt.vertices()
            .find(|&vertex| cdt.vertex_position(vertex) == position)
            .expect("vertex not found")
    }

    #[test]
    fn test_minimal_triangle() -> Result<(), CdtError> {
        let cdt = ConstrainedDelaunayTriangulation::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 8.0),
        ])?;
        assert_eq!(cdt.num_vertices(), 3);
        assert_eq!(cdt.num_undirected_edges(), 3);
        assert_eq!(cdt.num_bounded_faces(), 1);
        assert_eq!(cdt.num_faces(), 2);
        assert_eq!(cdt.num_constrained_edges(), 0);
        Ok(())
    }

    #[test]
    fn test_rectangle_diagonal_is_delaunay() -> Result<(), CdtError> {
        // For a 10 x 5 rectangle, both diagonals give a valid Delaunay
        // triangulation; exactly one of them must be present.
        let cdt = ConstrainedDelaunayTriangulation::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 5.0),
            Point2::new(0.0, 5.0),
        ])?;
        assert_eq!(cdt.num_vertices(), 4);
        assert_eq!(cdt.num_undirected_edges(), 5);
        assert_eq!(cdt.num_bounded_faces(), 2);

        let v0 = find_vertex(&cdt, Point2::new(0.0, 0.0));
        let v1 = find_vertex(&cdt, Point2::new(10.0, 0.0));
        let v2 = find_vertex(&cdt, Point2::new(10.0, 5.0));
        let v3 = find_vertex(&cdt, Point2::new(0.0, 5.0));
        let first_diagonal = cdt.get_edge_between(v0, v2).is_some();
        let second_diagonal = cdt.get_edge_between(v1, v3).is_some();
        assert!(first_diagonal != second_diagonal);
        Ok(())
    }

    #[test]
    fn test_constrained_diagonal() -> Result<(), CdtError> {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let cdt = ConstrainedDelaunayTriangulation::with_segments(points, &[[0, 2]])?;

        assert_eq!(cdt.num_constrained_edges(), 1);
        let v0 = find_vertex(&cdt, Point2::new(0.0, 0.0));
        let v2 = find_vertex(&cdt, Point2::new(10.0, 10.0));
        assert!(cdt.exists_constraint(v0, v2));
        assert!(cdt.exists_constraint(v2, v0));
        Ok(())
    }

    #[test]
    fn test_collinear_input_rejected() {
        let result = ConstrainedDelaunayTriangulation::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ]);
        assert_eq!(result.err(), Some(CdtError::CollinearPoints));
    }

    #[test]
    fn test_insufficient_points_rejected() {
        let result =
            ConstrainedDelaunayTriangulation::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]);
        assert_eq!(result.err(), Some(CdtError::InsufficientPoints));
    }

    #[test]
    fn test_crossing_segments_rejected() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
            Point2::new(10.0, 10.0),
        ];
        let result =
            ConstrainedDelaunayTriangulation::with_segments(points, &[[0, 3], [1, 2]]);
        assert_eq!(result.err(), Some(CdtError::CrossingSegments));
    }

    #[test]
    fn test_duplicate_segment_rejected() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 8.0),
        ];
        let result =
            ConstrainedDelaunayTriangulation::with_segments(points, &[[0, 1], [1, 0]]);
        assert_eq!(result.err(), Some(CdtError::CrossingSegments));
    }

    #[test]
    fn test_segment_index_out_of_bounds() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 8.0),
        ];
        let result = ConstrainedDelaunayTriangulation::with_segments(points, &[[0, 3]]);
        assert_eq!(result.err(), Some(CdtError::SegmentIndexOutOfBounds));
    }

    #[test]
    fn test_duplicate_points_are_discarded() -> Result<(), CdtError> {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 8.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 0.0),
        ];
        let cdt = ConstrainedDelaunayTriangulation::new(points)?;
        assert_eq!(cdt.num_vertices(), 3);
        assert_eq!(cdt.num_bounded_faces(), 1);
        Ok(())
    }

    #[test]
    fn test_point_on_edge_is_split_in() -> Result<(), CdtError> {
        // The fourth point lies exactly on an edge of the first triangle.
        let cdt = ConstrainedDelaunayTriangulation::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 8.0),
            Point2::new(5.0, 0.0),
        ])?;
        assert_eq!(cdt.num_vertices(), 4);
        assert_eq!(cdt.num_bounded_faces(), 2);
        Ok(())
    }

    #[test]
    fn test_near_cocircular_robustness() -> Result<(), CdtError> {
        // Four near-cocircular corners plus a center point one ulp off the
        // circumcircle; construction must terminate with a consistent
        // topology.
        let eps = 2f64.powi(-52);
        let cdt = ConstrainedDelaunayTriangulation::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.5, 0.5 + eps),
        ])?;
        assert_eq!(cdt.num_vertices(), 5);
        assert_eq!(cdt.num_bounded_faces(), 4);
        Ok(())
    }

    #[test]
    fn test_euler_formula_random() -> Result<(), CdtError> {
        let points = random_points(300, 50.0, SEED);
        let cdt = ConstrainedDelaunayTriangulation::new(points)?;
        let v = cdt.num_vertices() as isize;
        let e = cdt.num_undirected_edges() as isize;
        let f = cdt.num_faces() as isize;
        assert_eq!(v - e + f, 2);
        Ok(())
    }

    #[test]
    fn test_constraints_survive_in_random_triangulation() -> Result<(), CdtError> {
        // A convex polygon ring plus random interior points; every ring
        // segment must come out constrained.
        let mut points = Vec::new();
        let n = 12;
        for i in 0..n {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
            points.push(Point2::new(30.0 * angle.cos(), 30.0 * angle.sin()));
        }
        let interior = random_points(80, 20.0, SEED);
        points.extend(interior);

        let segments: Vec<[usize; 2]> = (0..n).map(|i| [i, (i + 1) % n]).collect();
        let cdt = ConstrainedDelaunayTriangulation::with_segments(points.clone(), &segments)?;

        for segment in &segments {
            let from = find_vertex(&cdt, points[segment[0]].to_f64());
            let to = find_vertex(&cdt, points[segment[1]].to_f64());
            assert!(cdt.exists_constraint(from, to));
        }
        Ok(())
    }

    #[test]
    fn test_constraint_through_many_crossings() -> Result<(), CdtError> {
        // A horizontal constraint that crosses a vertical strip of edges.
        let mut points = vec![Point2::new(-50.0, 0.0), Point2::new(50.0, 0.0)];
        for i in 0..10 {
            let x = -45.0 + 10.0 * i as f64;
            points.push(Point2::new(x, 13.0));
            points.push(Point2::new(x, -13.0));
        }
        let cdt = ConstrainedDelaunayTriangulation::with_segments(points, &[[0, 1]])?;

        let from = find_vertex(&cdt, Point2::new(-50.0, 0.0));
        let to = find_vertex(&cdt, Point2::new(50.0, 0.0));
        assert!(cdt.exists_constraint(from, to));
        Ok(())
    }

    #[test]
    fn test_constraint_through_collinear_vertex() -> Result<(), CdtError> {
        // The segment passes exactly through an intermediate vertex and
        // must come out as two constraint edges.
        let points = vec![
            Point2::new(-10.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 8.0),
            Point2::new(0.0, -8.0),
        ];
        let cdt = ConstrainedDelaunayTriangulation::with_segments(points, &[[0, 2]])?;

        let left = find_vertex(&cdt, Point2::new(-10.0, 0.0));
        let middle = find_vertex(&cdt, Point2::new(0.0, 0.0));
        let right = find_vertex(&cdt, Point2::new(10.0, 0.0));
        assert!(cdt.exists_constraint(left, middle));
        assert!(cdt.exists_constraint(middle, right));
        assert_eq!(cdt.num_constrained_edges(), 2);
        Ok(())
    }

    #[test]
    fn test_bulk_random_insertions() -> Result<(), CdtError> {
        // sanity_check runs at the end of every construction.
        for (size, seed) in [
            (10usize, b"0rNmPqXcVbAzSdFgHjKl12345678901a"),
            (100, b"1aBcDeFgHiJkLmNoPqRsTuVwXyZ01234"),
            (1000, SEED),
        ] {
            let points = random_points(size, 100.0, seed);
            let cdt = ConstrainedDelaunayTriangulation::new(points)?;
            assert!(cdt.num_vertices() <= size);
            assert!(cdt.num_bounded_faces() >= 1);
        }
        Ok(())
    }

    #[test]
    fn test_grid_input() -> Result<(), CdtError> {
        // Many exactly-collinear and cocircular subsets.
        let mut points = Vec::new();
        for x in 0..8 {
            for y in 0..8 {
                points.push(Point2::new(x as f64, y as f64));
            }
        }
        let cdt = ConstrainedDelaunayTriangulation::new(points)?;
        assert_eq!(cdt.num_vertices(), 64);
        // A triangulated 7x7 square grid has 2 * 49 triangles.
        assert_eq!(cdt.num_bounded_faces(), 98);
        Ok(())
    }

    #[test]
    fn test_f32_points() -> Result<(), CdtError> {
        let cdt = ConstrainedDelaunayTriangulation::new(vec![
            Point2::new(0.0f32, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(2.0, 3.0),
            Point2::new(2.0, 1.0),
        ])?;
        assert_eq!(cdt.num_vertices(), 4);
        assert_eq!(cdt.num_bounded_faces(), 3);
        Ok(())
    }
}
