//! # Vertex module
//!
//! ## Description
//! A vertex's owned storage ([`VertexData`]) and the borrowing read-handle
//! ([`Vertex`]) returned by [`Graph::vertex`](crate::Graph::vertex) for adjacency
//! queries. Mutations that create or destroy vertices/arcs go through [`Graph`]
//! directly (see its module docs) rather than through this handle, since they need
//! `&mut Graph` and a borrowing read-handle can't alias that the way a model built on
//! mutable back-references between objects would.
use std::collections::{HashSet, VecDeque};

use itertools::Itertools;

use crate::{
    arc::ArcData,
    graph::Graph,
    identity_set::{IdentityKey, IdentitySet},
    ids::{ArcId, VertexId},
};

// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *
// * VERTEX DATA                                                                       *
// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *

/// Owned per-vertex storage, kept in the graph's vertex master set.
#[derive(Clone)]
pub(crate) struct VertexData<V> {
    pub(crate) id: u64,
    pub(crate) label: Option<V>,
    pub(crate) incoming: IdentitySet<ArcId>,
    pub(crate) outgoing: IdentitySet<ArcId>,
}

impl<V> VertexData<V> {
    pub(crate) fn new(id: u64, label: Option<V>) -> Self {
        VertexData { id, label, incoming: IdentitySet::new(), outgoing: IdentitySet::new() }
    }
}

impl<V> IdentityKey for VertexData<V> {
    #[inline]
    fn identity(&self) -> u64 {
        self.id
    }
}

// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *
// * VERTEX HANDLE                                                                     *
// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *

/// # Vertex
///
/// ## Description
/// A borrowing read-handle to a vertex attached to a [`Graph`]. Obtained from
/// [`Graph::vertex`]; valid for as long as the borrow of the graph it came from.
#[derive(Clone, Copy)]
pub struct Vertex<'g, V, A> {
    id: VertexId,
    graph: &'g Graph<V, A>,
}

impl<'g, V, A> Vertex<'g, V, A> {
    pub(crate) fn new(id: VertexId, graph: &'g Graph<V, A>) -> Self {
        Vertex { id, graph }
    }

    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    fn data(&self) -> &VertexData<V> {
        self.graph.vertex_data(self.id).expect("Vertex handle outlived its vertex")
    }

    /// ## Returns
    /// The vertex's label, or `None` if it has none.
    pub fn label(&self) -> Option<&V> {
        self.data().label.as_ref()
    }

    /// ## Returns
    /// The number of arcs that have this vertex in their destination set.
    pub fn degree_in(&self) -> usize {
        self.data().incoming.len()
    }

    /// ## Returns
    /// The number of arcs that have this vertex in their source set.
    pub fn degree_out(&self) -> usize {
        self.data().outgoing.len()
    }

    pub(crate) fn outgoing_arcs(&self) -> &IdentitySet<ArcId> {
        &self.data().outgoing
    }

    pub(crate) fn incoming_arcs(&self) -> &IdentitySet<ArcId> {
        &self.data().incoming
    }

    /// # Structural hash
    ///
    /// ## Description
    /// A 32-bit fingerprint of this vertex's label and the shape of the graph reachable
    /// from it, independent of vertex ids. Two vertices (possibly in different graphs)
    /// with equal structural hashes are candidates for the same role under
    /// [`Graph::eq`](crate::Graph); unequal hashes prove they cannot play the same role.
    pub fn structural_hash(&self) -> i32
    where
        V: std::hash::Hash,
        A: std::hash::Hash,
    {
        crate::hash::structural_hash_vertex(self.graph, self.id)
    }

    /// # Adjacent vertices
    ///
    /// ## Description
    /// Returns a fresh snapshot of every vertex reachable in one directed hop from this
    /// one: the union of destinations over this vertex's outgoing arcs.
    ///
    /// ## Returns
    /// A set not backed by the graph — later mutation of the graph does not change it.
    pub fn adjacent_vertices(&self) -> HashSet<VertexId> {
        let mut result = HashSet::new();
        for arc_id in self.data().outgoing.iter() {
            if let Some(arc) = self.graph.arc_data(*arc_id) {
                for destination in arc.destination.iter() {
                    result.insert(*destination);
                }
            }
        }
        result
    }

    /// # Adjacency test
    ///
    /// ## Description
    /// Tests whether `other` is reachable from `self` via a single arc, iterating over
    /// whichever of `self`'s outgoing arcs or `other`'s incoming arcs is smaller, since
    /// an arc appears in both sets iff it connects the two vertices in that direction.
    ///
    /// ## Complexity
    /// Time: O(min(out-degree(self), in-degree(other))).
    pub fn is_adjacent(&self, other: VertexId) -> bool {
        let Some(other_data) = self.graph.vertex_data(other) else { return false };
        let my_out = &self.data().outgoing;
        let their_in = &other_data.incoming;
        let (smaller, larger) =
            if my_out.len() <= their_in.len() { (my_out, their_in) } else { (their_in, my_out) };
        smaller.iter().any(|arc_id| larger.contains(arc_id.identity()))
    }

    /// # Reachability
    ///
    /// ## Description
    /// Breadth-first search over outgoing arcs. A vertex trivially reaches itself with a
    /// zero-length path.
    pub fn can_reach(&self, other: VertexId) -> bool {
        self.bfs_path(other).is_some()
    }

    /// # Shortest path
    ///
    /// ## Description
    /// Breadth-first search over outgoing arcs, returning the shortest arc list (by arc
    /// count, not weight) from `self` to `other`. A self-path is the empty list.
    ///
    /// ## Returns
    /// `None` if `other` is unreachable from `self`.
    pub fn path_to(&self, other: VertexId) -> Option<Vec<ArcId>> {
        self.bfs_path(other)
    }

    fn bfs_path(&self, target: VertexId) -> Option<Vec<ArcId>> {
        if self.id == target {
            return Some(Vec::new());
        }
        // predecessor[v] = (arc used to reach v, vertex it was reached from)
        let mut predecessor: std::collections::HashMap<VertexId, (ArcId, VertexId)> =
            std::collections::HashMap::new();
        let mut visited: HashSet<VertexId> = HashSet::new();
        visited.insert(self.id);
        let mut queue: VecDeque<VertexId> = VecDeque::new();
        queue.push_back(self.id);
        while let Some(current) = queue.pop_front() {
            let Some(current_data) = self.graph.vertex_data(current) else { continue };
            for arc_id in current_data.outgoing.iter() {
                let Some(arc) = self.graph.arc_data(*arc_id) else { continue };
                for next in arc.destination.iter() {
                    if visited.insert(*next) {
                        predecessor.insert(*next, (*arc_id, current));
                        if *next == target {
                            return Some(reconstruct_path(&predecessor, target));
                        }
                        queue.push_back(*next);
                    }
                }
            }
        }
        None
    }

    /// # Rendering
    ///
    /// ## Description
    /// `<uid>: <labelText>\n<outArcUid>[,<outArcUid>]*`, per the stringification rules.
    pub fn render(&self) -> String
    where
        V: std::fmt::Display,
    {
        let label_text = match self.label() {
            Some(label) => format!("{}", label),
            None => "null".to_string(),
        };
        let arcs_text = self.data().outgoing.iter().map(|a| a.0).sorted_unstable().join(",");
        format!("{}: {}\n{}", self.id, label_text, arcs_text)
    }
}

fn reconstruct_path(
    predecessor: &std::collections::HashMap<VertexId, (ArcId, VertexId)>,
    target: VertexId,
) -> Vec<ArcId> {
    let mut path = Vec::new();
    let mut current = target;
    while let Some((arc_id, previous)) = predecessor.get(&current) {
        path.push(*arc_id);
        current = *previous;
    }
    path.reverse();
    path
}
