//! # Identifier module
//!
//! ## Description
//! Stable integer identifiers for vertices and arcs, and the per-graph monotonic
//! counters that hand them out. Each graph owns its own counters rather than sharing a
//! single process-wide one: uniqueness only ever needs to hold *within* a single graph,
//! so a per-graph counter avoids a cross-thread synchronization hazard without giving up
//! anything callers rely on (see `DESIGN.md` for the Open Question this resolves).
use std::fmt::Display;

use crate::identity_set::IdentityKey;





// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *
// * VERTEX ID                                                                         *
// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *



/// # Vertex identifier
///
/// ## Description
/// An opaque handle to a vertex stored in a [`Graph`](crate::Graph). Two `VertexId`
/// values compare equal iff they were assigned to the same vertex; this is exactly the
/// "identity equality" invariant 5 requires — ids are never reused while the vertex they
/// name is live.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VertexId(pub(crate) u64);

impl IdentityKey for VertexId {
    #[inline]
    fn identity(&self) -> u64 {
        self.0
    }
}

impl Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}





// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *
// * ARC ID                                                                            *
// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *



/// # Arc identifier
///
/// ## Description
/// An opaque handle to an arc stored in a [`Graph`](crate::Graph). See [`VertexId`] for
/// the identity-equality rationale; arcs draw from an independent counter.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ArcId(pub(crate) u64);

impl IdentityKey for ArcId {
    #[inline]
    fn identity(&self) -> u64 {
        self.0
    }
}

impl Display for ArcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}





// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *
// * ID ALLOCATOR                                                                      *
// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *



/// A single monotonic counter. A graph owns two: one for vertex ids, one for arc ids.
#[derive(Clone, Debug, Default)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn next(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}
