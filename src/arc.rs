//! # Arc module
//!
//! ## Description
//! An arc's owned storage ([`ArcData`]) and the borrowing read-handle ([`Arc`]) returned
//! by [`Graph::arc`](crate::Graph::arc). As with [`Vertex`](crate::vertex::Vertex),
//! endpoint mutation (`add_to_source`, `remove_from_destination`, ...) lives on [`Graph`]
//! rather than on this handle.
use itertools::Itertools;

use crate::{
    graph::Graph,
    identity_set::{IdentityKey, IdentitySet},
    ids::{ArcId, VertexId},
};

// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *
// * ARC DATA                                                                          *
// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *

/// Owned per-arc storage, kept in the graph's arc master set.
#[derive(Clone)]
pub(crate) struct ArcData<A> {
    pub(crate) id: u64,
    pub(crate) label: Option<A>,
    pub(crate) source: IdentitySet<VertexId>,
    pub(crate) destination: IdentitySet<VertexId>,
}

impl<A> ArcData<A> {
    pub(crate) fn new(id: u64, label: Option<A>) -> Self {
        ArcData { id, label, source: IdentitySet::new(), destination: IdentitySet::new() }
    }
}

impl<A> IdentityKey for ArcData<A> {
    #[inline]
    fn identity(&self) -> u64 {
        self.id
    }
}

// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *
// * ARC HANDLE                                                                        *
// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *

/// # Arc
///
/// ## Description
/// A borrowing read-handle to an arc attached to a [`Graph`]. Obtained from
/// [`Graph::arc`]; valid for as long as the borrow of the graph it came from.
#[derive(Clone, Copy)]
pub struct Arc<'g, V, A> {
    id: ArcId,
    graph: &'g Graph<V, A>,
}

impl<'g, V, A> Arc<'g, V, A> {
    pub(crate) fn new(id: ArcId, graph: &'g Graph<V, A>) -> Self {
        Arc { id, graph }
    }

    #[inline]
    pub fn id(&self) -> ArcId {
        self.id
    }

    fn data(&self) -> &ArcData<A> {
        self.graph.arc_data(self.id).expect("Arc handle outlived its arc")
    }

    /// ## Returns
    /// The arc's label, or `None` if it has none.
    pub fn label(&self) -> Option<&A> {
        self.data().label.as_ref()
    }

    pub fn source_size(&self) -> usize {
        self.data().source.len()
    }

    pub fn destination_size(&self) -> usize {
        self.data().destination.len()
    }

    pub(crate) fn source_vertices(&self) -> &IdentitySet<VertexId> {
        &self.data().source
    }

    pub(crate) fn destination_vertices(&self) -> &IdentitySet<VertexId> {
        &self.data().destination
    }

    /// Structural hash; see [`Vertex::structural_hash`](crate::vertex::Vertex::structural_hash).
    pub fn structural_hash(&self) -> i32
    where
        V: std::hash::Hash,
        A: std::hash::Hash,
    {
        crate::hash::structural_hash_arc(self.graph, self.id)
    }

    /// # Directedness
    ///
    /// ## Description
    /// A half-arc (empty source or destination) is always directed. Otherwise an arc is
    /// directed unless some arc in the graph has this arc's destination as its source
    /// and this arc's source as its destination — i.e. unless its reverse is also
    /// present.
    pub fn is_directed(&self) -> bool {
        let data = self.data();
        if data.source.is_empty() || data.destination.is_empty() {
            return true;
        }
        !self.graph.has_reverse_arc(self.id)
    }

    /// # Reflexivity
    ///
    /// ## Description
    /// `true` iff this arc's source and destination sets are equal (as sets of vertex
    /// ids).
    pub fn is_reflexive(&self) -> bool {
        let data = self.data();
        if data.source.len() != data.destination.len() {
            return false;
        }
        data.source.iter().all(|v| data.destination.contains(v.0))
    }

    /// # Rendering
    ///
    /// ## Description
    /// `arc (<uid>): {<srcUid>[,<srcUid>]*} --<labelText>-> {<dstUid>[,<dstUid>]*}`, per
    /// the stringification rules.
    pub fn render(&self) -> String
    where
        A: std::fmt::Display,
    {
        let data = self.data();
        let label_text = match &data.label {
            Some(label) => format!("{}", label),
            None => "null".to_string(),
        };
        let source_ids = data.source.iter().map(|v| v.0).sorted_unstable().join(",");
        let destination_ids = data.destination.iter().map(|v| v.0).sorted_unstable().join(",");
        format!("arc ({}): {{{}}} --{}-> {{{}}}", self.id, source_ids, label_text, destination_ids)
    }
}
