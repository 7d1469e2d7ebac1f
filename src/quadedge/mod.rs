//! The augmented quad-edge data structure underlying the triangulation.
//!
//! Every undirected edge is stored as a *quad-edge*: four directed edges,
//! two primal (the edge and its reverse) and two dual (crossing the edge in
//! both directions), as described by Guibas and Stolfi ("Primitives for the
//! manipulation of general subdivisions and the computation of Voronoi
//! diagrams", ACM TOG 4(2), 1985). The structure is augmented with explicit
//! face records and a constrained flag per quad-edge.

mod arena;
mod handles;
mod mesh;

pub use handles::{FixedEdgeHandle, FixedFaceHandle, FixedQuadEdgeHandle, FixedVertexHandle};

pub(crate) use mesh::{QuadEdgeMesh, VertexData};
