//! # quadedge
//!
//! Constrained Delaunay triangulations of planar straight-line graphs,
//! built on the Guibas-Stolfi quad-edge data structure, together with a
//! surface-aware Poisson-disk sampler.
//!
//! - The [`ConstrainedDelaunayTriangulation`] constructors triangulate a
//!   point set, optionally forcing a set of non-crossing segments into the
//!   result as constraint edges. All geometric decisions use adaptive
//!   precision predicates ([`predicates`]), so degenerate input cannot
//!   corrupt the topology.
//! - [`classify_regions`] partitions the triangles into regions bounded by
//!   constraint edges, alternately marked as trimmed or kept.
//! - [`enumerate_all_faces`] and [`enumerate_untrimmed`] flatten a
//!   triangulation into dense vertex/triangle/edge index arrays.
//! - [`PoissonDiskSampler`] generates well-spaced samples of a parametric
//!   [`Surface`] patch under its first-fundamental-form metric; the
//!   resulting [`SamplePoint`]s can be triangulated directly.
//!
//! # Example
//!
//! ```
//! use quadedge::{ConstrainedDelaunayTriangulation, enumerate_all_faces, Point2};
//!
//! # fn main() -> Result<(), quadedge::CdtError> {
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let cdt = ConstrainedDelaunayTriangulation::with_segments(points, &[[0, 1]])?;
//! let mesh = enumerate_all_faces(&cdt);
//! assert_eq!(mesh.num_triangles(), 2);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cdt;
mod enumeration;
mod point;
pub mod predicates;
mod quadedge;
mod region;
mod sampler;

pub use cdt::{CdtError, ConstrainedDelaunayTriangulation};
pub use enumeration::{enumerate_all_faces, enumerate_untrimmed, EdgeType, Enumeration};
pub use point::{HasPosition, Point2, Scalar};
pub use predicates::Orientation;
pub use quadedge::{FixedEdgeHandle, FixedFaceHandle, FixedQuadEdgeHandle, FixedVertexHandle};
pub use region::{classify_regions, RegionClassification};
pub use sampler::{metric_distance, PoissonDiskSampler, SamplePoint, Surface};
