//! # Policy module
//!
//! ## Description
//! Distinct graph families (tree graphs, multigraphs, simple digraphs, ...) could each be
//! given their own Rust type, but that would mean duplicating every query and mutation
//! method across a whole hierarchy. Instead this crate collapses the family into a single
//! runtime value, [`GraphPolicy`], consulted by every mutating [`Graph`](crate::Graph)
//! method before it commits — one concrete `Graph` type, configured rather than
//! subclassed.
use bitflags::bitflags;

bitflags! {
    /// Which arc shapes a graph accepts. All flags set is the most permissive policy and
    /// is what [`Graph::new`](crate::Graph::new) uses by default.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct Shape: u8 {
        /// Arcs may have more than one source or destination vertex.
        const HYPER_ARCS = 0b0000_0001;
        /// Arcs may have an empty source or destination set.
        const HALF_ARCS = 0b0000_0010;
        /// Two distinct arcs may share the same source and destination sets.
        const MULTI_ARCS = 0b0000_0100;
        /// An arc's source and destination sets may be equal (a self-loop, generalized).
        const REFLEXIVE_ARCS = 0b0000_1000;
    }
}

/// # Graph policy
///
/// ## Description
/// The set of structural constraints a [`Graph`](crate::Graph) enforces on every
/// mutation. The default policy (see [`GraphPolicy::default`]) allows everything the core
/// data model can represent; restricting it is how callers get tree-policy or
/// simple-graph behavior without a distinct Rust type per graph family.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GraphPolicy {
    shape: Shape,
    forbid_cycles: bool,
    require_connected: bool,
}

impl GraphPolicy {
    /// # Construct a permissive policy
    ///
    /// ## Returns
    /// A [`GraphPolicy`] allowing hyper-arcs, half-arcs, multi-arcs and reflexive arcs,
    /// with no acyclicity or connectedness constraint.
    pub fn permissive() -> Self {
        GraphPolicy { shape: Shape::all(), forbid_cycles: false, require_connected: false }
    }

    /// A policy suited to plain directed simple graphs: no hyper-arcs, no half-arcs, no
    /// parallel arcs, no self-loops.
    pub fn simple_digraph() -> Self {
        GraphPolicy { shape: Shape::empty(), forbid_cycles: false, require_connected: false }
    }

    /// `simple_digraph` plus acyclicity and connectedness — the policy a tree graph
    /// needs: no cycles, and every vertex reachable from the rest of the graph.
    pub fn tree() -> Self {
        GraphPolicy { shape: Shape::empty(), forbid_cycles: true, require_connected: true }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_forbid_cycles(mut self, forbid_cycles: bool) -> Self {
        self.forbid_cycles = forbid_cycles;
        self
    }

    /// When set, a vertex/arc removal that would split a currently-connected graph into
    /// more than one weakly-connected component is rejected with `PolicyViolated` and
    /// rolled back in full (see `graph.rs`'s module docs for the rollback mechanism).
    pub fn with_require_connected(mut self, require_connected: bool) -> Self {
        self.require_connected = require_connected;
        self
    }

    #[inline]
    pub fn allows_hyper_arcs(&self) -> bool {
        self.shape.contains(Shape::HYPER_ARCS)
    }

    #[inline]
    pub fn allows_half_arcs(&self) -> bool {
        self.shape.contains(Shape::HALF_ARCS)
    }

    #[inline]
    pub fn allows_multi_arcs(&self) -> bool {
        self.shape.contains(Shape::MULTI_ARCS)
    }

    #[inline]
    pub fn allows_reflexive_arcs(&self) -> bool {
        self.shape.contains(Shape::REFLEXIVE_ARCS)
    }

    #[inline]
    pub fn forbids_cycles(&self) -> bool {
        self.forbid_cycles
    }

    #[inline]
    pub fn require_connected(&self) -> bool {
        self.require_connected
    }
}

impl Default for GraphPolicy {
    fn default() -> Self {
        GraphPolicy::permissive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissive_allows_everything() {
        let policy = GraphPolicy::permissive();
        assert!(policy.allows_hyper_arcs());
        assert!(policy.allows_half_arcs());
        assert!(policy.allows_multi_arcs());
        assert!(policy.allows_reflexive_arcs());
        assert!(!policy.forbids_cycles());
    }

    #[test]
    fn tree_policy_forbids_shape_and_cycles() {
        let policy = GraphPolicy::tree();
        assert!(!policy.allows_hyper_arcs());
        assert!(policy.forbids_cycles());
        assert!(policy.require_connected());
    }
}
