//! Typed, copyable handles into the triangulation's registries.
//!
//! A directed edge handle packs the owning quad-edge's index together with a
//! ring id in `0..4`: ids 0 and 2 are the two primal directions of the
//! undirected edge, ids 1 and 3 the two dual directions crossing it. Because
//! the four directed edges of a quad-edge share one registry entry,
//! `sym`/`rot`/`rot_inv` are pure id arithmetic and never touch the arena.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! entity_handle {
    ($(#[$attr:meta])* $name:ident, $debug_tag:expr) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name(pub(crate) u32);

        impl $name {
            #[inline]
            pub(crate) fn new(index: u32) -> Self {
                Self(index)
            }

            /// The handle's index into its registry.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $debug_tag, self.0)
            }
        }
    };
}

entity_handle!(
    /// A handle to a vertex of the triangulation.
    FixedVertexHandle,
    "VertexHandle"
);

entity_handle!(
    /// A handle to a face of the triangulation. Exactly one face is
    /// unbounded while the triangulation is being built.
    FixedFaceHandle,
    "FaceHandle"
);

entity_handle!(
    /// A handle to a quad-edge, i.e. an undirected edge of the
    /// triangulation together with its two dual directions.
    FixedQuadEdgeHandle,
    "QuadEdgeHandle"
);

/// A handle to one of the four directed edges of a quad-edge.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedEdgeHandle(u32);

impl FixedEdgeHandle {
    #[inline]
    pub(crate) fn new(quad: FixedQuadEdgeHandle, ring: u8) -> Self {
        debug_assert!(ring < 4);
        FixedEdgeHandle((quad.0 << 2) | u32::from(ring))
    }

    /// The quad-edge owning this directed edge.
    #[inline]
    pub fn quad(self) -> FixedQuadEdgeHandle {
        FixedQuadEdgeHandle(self.0 >> 2)
    }

    /// The ring id in `0..4`.
    #[inline]
    pub fn ring(self) -> u8 {
        (self.0 & 3) as u8
    }

    /// This edge with its direction reversed (ring 0 <-> 2, 1 <-> 3).
    #[inline]
    #[must_use]
    pub fn sym(self) -> Self {
        FixedEdgeHandle(self.0 ^ 2)
    }

    /// The dual of this edge, rotated 90 degrees counterclockwise.
    #[inline]
    #[must_use]
    pub fn rot(self) -> Self {
        FixedEdgeHandle((self.0 & !3) | ((self.0 + 1) & 3))
    }

    /// The dual of this edge, rotated 90 degrees clockwise.
    #[inline]
    #[must_use]
    pub fn rot_inv(self) -> Self {
        FixedEdgeHandle((self.0 & !3) | ((self.0 + 3) & 3))
    }

    /// `true` for the two primal directions (rings 0 and 2).
    #[inline]
    pub fn is_primal(self) -> bool {
        self.0 & 1 == 0
    }

    /// Index of this primal direction within its quad-edge: 0 for ring 0,
    /// 1 for ring 2.
    #[inline]
    pub(crate) fn primal_index(self) -> usize {
        debug_assert!(self.is_primal());
        ((self.0 >> 1) & 1) as usize
    }

    /// The ring-0 representative of this edge's quad-edge.
    #[inline]
    #[must_use]
    pub fn normalized(self) -> Self {
        FixedEdgeHandle(self.0 & !3)
    }
}

impl fmt::Debug for FixedEdgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeHandle({}:{})", self.0 >> 2, self.0 & 3)
    }
}
