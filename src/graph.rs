//! # Graph module
//!
//! ## Description
//! [`Graph`] is the sole owner of vertex and arc storage. It exposes the full
//! add/remove/query surface, coordinates the cascade semantics removing a vertex
//! triggers, and is the type the isomorphism engine (`isomorphism.rs`) reads to decide
//! `PartialEq`.
//!
//! Mutations that touch more than one element (cascading vertex removal, bulk removal)
//! are transactional: before mutating, the graph clones itself; if a post-condition the
//! active [`GraphPolicy`] requires turns out violated, the clone replaces the
//! in-progress graph and the call returns `PolicyViolated`. This is a coarser
//! stand-in for a per-primitive-edit undo trail — a full-graph snapshot instead — chosen
//! because a whole `Graph` clone is cheap at the scale this crate targets and is
//! dramatically harder to get wrong than hand-rolled inverse edits.
use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;

use crate::arc::{Arc, ArcData};
use crate::error::{ErrorKind, HypergraphError, HypergraphResult};
use crate::identity_set::IdentitySet;
use crate::ids::{ArcId, IdAllocator, VertexId};
use crate::policy::GraphPolicy;
use crate::vertex::{Vertex, VertexData};

/// Below this argument-collection size, membership against it is checked by linear scan
/// rather than by building a `HashSet` first — building the set costs more than the scan
/// it would save until the argument collection is large enough to amortize it.
const LINEAR_SCAN_THRESHOLD: usize = 16;

// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *
// * GRAPH                                                                             *
// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *

/// # Graph
///
/// ## Description
/// A mutable, in-memory labeled directed hypergraph. `V` is the vertex label type, `A`
/// the arc label type; both may be any application type and are optional per element.
#[derive(Clone)]
pub struct Graph<V, A> {
    pub(crate) vertices: IdentitySet<VertexData<V>>,
    pub(crate) arcs: IdentitySet<ArcData<A>>,
    vertex_ids: IdAllocator,
    arc_ids: IdAllocator,
    policy: GraphPolicy,
}

impl<V, A> Default for Graph<V, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, A> Graph<V, A> {
    /// ## Returns
    /// A new, empty graph under the permissive default policy (see
    /// [`GraphPolicy::default`]).
    pub fn new() -> Self {
        Self::with_policy(GraphPolicy::default())
    }

    /// ## Returns
    /// A new, empty graph under the given policy.
    pub fn with_policy(policy: GraphPolicy) -> Self {
        Graph {
            vertices: IdentitySet::new(),
            arcs: IdentitySet::new(),
            vertex_ids: IdAllocator::default(),
            arc_ids: IdAllocator::default(),
            policy,
        }
    }

    #[inline]
    pub fn policy(&self) -> GraphPolicy {
        self.policy
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    #[inline]
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains(id.0)
    }

    #[inline]
    pub fn contains_arc(&self, id: ArcId) -> bool {
        self.arcs.contains(id.0)
    }

    pub(crate) fn vertex_data(&self, id: VertexId) -> Option<&VertexData<V>> {
        self.vertices.get(id.0)
    }

    pub(crate) fn vertex_data_mut(&mut self, id: VertexId) -> Option<&mut VertexData<V>> {
        self.vertices.get_mut(id.0)
    }

    pub(crate) fn arc_data(&self, id: ArcId) -> Option<&ArcData<A>> {
        self.arcs.get(id.0)
    }

    pub(crate) fn arc_data_mut(&mut self, id: ArcId) -> Option<&mut ArcData<A>> {
        self.arcs.get_mut(id.0)
    }

    /// ## Returns
    /// A read handle to the vertex, or `None` if `id` does not name a vertex currently
    /// in this graph.
    pub fn vertex(&self, id: VertexId) -> Option<Vertex<'_, V, A>> {
        self.contains_vertex(id).then(|| Vertex::new(id, self))
    }

    /// ## Returns
    /// A read handle to the arc, or `None` if `id` does not name an arc currently in
    /// this graph.
    pub fn arc(&self, id: ArcId) -> Option<Arc<'_, V, A>> {
        self.contains_arc(id).then(|| Arc::new(id, self))
    }

    /// # Live vertex view
    ///
    /// ## Description
    /// An iterator over every vertex currently in the graph, backed by the graph's
    /// master set: the underlying [`IdentitySet`] iterator is fail-fast, so
    /// structurally mutating the graph while this iterator is live panics on its next
    /// step (see `identity_set.rs`).
    pub fn vertices(&self) -> impl Iterator<Item = Vertex<'_, V, A>> + '_ {
        self.vertices.iter().map(move |data| Vertex::new(VertexId(data.id), self))
    }

    /// Live arc view; see [`vertices`](Self::vertices).
    pub fn arcs(&self) -> impl Iterator<Item = Arc<'_, V, A>> + '_ {
        self.arcs.iter().map(move |data| Arc::new(ArcId(data.id), self))
    }

    /// # Add vertex
    ///
    /// ## Returns
    /// The id of the newly created, isolated vertex.
    pub fn add_vertex(&mut self, label: Option<V>) -> VertexId {
        let id = self.vertex_ids.next();
        self.vertices.add(VertexData::new(id, label));
        VertexId(id)
    }

    /// # Add arc
    ///
    /// ## Description
    /// Creates an arc from `sources` to `destinations`. Both may contain zero (half-arc),
    /// one, or many (hyper-arc) vertices, subject to the graph's [`GraphPolicy`]. All
    /// validation happens before any mutation, so a rejected call leaves the graph
    /// untouched without needing a snapshot.
    ///
    /// ## Failure
    /// `NotInGraph` if any endpoint is not a vertex of this graph. `PolicyViolated` if
    /// the requested shape (hyper/half/multi/reflexive) is disallowed by the policy, or
    /// if the policy forbids cycles and this arc would close one.
    pub fn add_arc(
        &mut self,
        sources: impl IntoIterator<Item = VertexId>,
        destinations: impl IntoIterator<Item = VertexId>,
        label: Option<A>,
    ) -> HypergraphResult<ArcId> {
        const FUNCTION_PATH: &str = "Graph::add_arc";
        let source_set: HashSet<VertexId> = sources.into_iter().collect();
        let destination_set: HashSet<VertexId> = destinations.into_iter().collect();
        for vertex in source_set.iter().chain(destination_set.iter()) {
            if !self.contains_vertex(*vertex) {
                return Err(HypergraphError::new(
                    FUNCTION_PATH,
                    ErrorKind::NotInGraph,
                    format!("vertex {} is not a member of this graph", vertex),
                ));
            }
        }
        if (source_set.len() > 1 || destination_set.len() > 1) && !self.policy.allows_hyper_arcs()
        {
            return Err(HypergraphError::new(
                FUNCTION_PATH,
                ErrorKind::PolicyViolated,
                "this graph's policy forbids hyper-arcs",
            ));
        }
        if (source_set.is_empty() || destination_set.is_empty())
            && !self.policy.allows_half_arcs()
        {
            return Err(HypergraphError::new(
                FUNCTION_PATH,
                ErrorKind::PolicyViolated,
                "this graph's policy forbids half-arcs",
            ));
        }
        if !source_set.is_empty()
            && source_set == destination_set
            && !self.policy.allows_reflexive_arcs()
        {
            return Err(HypergraphError::new(
                FUNCTION_PATH,
                ErrorKind::PolicyViolated,
                "this graph's policy forbids reflexive arcs",
            ));
        }
        if !self.policy.allows_multi_arcs()
            && self.has_arc_with_endpoints(&source_set, &destination_set)
        {
            return Err(HypergraphError::new(
                FUNCTION_PATH,
                ErrorKind::PolicyViolated,
                "this graph's policy forbids multi-arcs",
            ));
        }
        if self.policy.forbids_cycles() && self.would_close_cycle(&source_set, &destination_set) {
            return Err(HypergraphError::new(
                FUNCTION_PATH,
                ErrorKind::PolicyViolated,
                "this graph's policy forbids cycles",
            ));
        }
        let id = self.arc_ids.next();
        let arc_id = ArcId(id);
        let mut data = ArcData::new(id, label);
        for vertex in &source_set {
            data.source.add(*vertex);
        }
        for vertex in &destination_set {
            data.destination.add(*vertex);
        }
        self.arcs.add(data);
        for vertex in &source_set {
            self.vertex_data_mut(*vertex).expect("validated above").outgoing.add(arc_id);
        }
        for vertex in &destination_set {
            self.vertex_data_mut(*vertex).expect("validated above").incoming.add(arc_id);
        }
        Ok(arc_id)
    }

    fn has_arc_with_endpoints(
        &self,
        source_set: &HashSet<VertexId>,
        destination_set: &HashSet<VertexId>,
    ) -> bool {
        self.arcs.iter().any(|candidate| {
            identity_set_equals_hashset(&candidate.source, source_set)
                && identity_set_equals_hashset(&candidate.destination, destination_set)
        })
    }

    fn would_close_cycle(
        &self,
        source_set: &HashSet<VertexId>,
        destination_set: &HashSet<VertexId>,
    ) -> bool {
        destination_set.iter().any(|destination| {
            source_set.iter().any(|source| {
                self.vertex(*destination).map(|v| v.can_reach(*source)).unwrap_or(false)
            })
        })
    }

    /// # Remove vertex
    ///
    /// ## Description
    /// Removes `id` and cascades arc removal per invariant 4: an arc that would become
    /// empty on both sides, or empty on a side the policy disallows, is removed too.
    ///
    /// ## Returns
    /// `true` iff `id` was present (and hence removed); `false` if it was already absent.
    pub fn remove_vertex(&mut self, id: VertexId) -> HypergraphResult<bool>
    where
        V: Clone,
        A: Clone,
    {
        if !self.contains_vertex(id) {
            return Ok(false);
        }
        let require_connected = self.policy.require_connected() && self.is_weakly_connected();
        let snapshot = require_connected.then(|| self.clone());
        self.remove_vertex_uncommitted(id);
        if require_connected && !self.is_weakly_connected() {
            *self = snapshot.expect("snapshot taken when require_connected is true");
            return Err(HypergraphError::new(
                "Graph::remove_vertex",
                ErrorKind::PolicyViolated,
                "removing this vertex would disconnect the graph",
            ));
        }
        Ok(true)
    }

    /// # Remove arc
    ///
    /// ## Returns
    /// `true` iff `id` was present (and hence removed); `false` if it was already absent.
    pub fn remove_arc(&mut self, id: ArcId) -> HypergraphResult<bool>
    where
        V: Clone,
        A: Clone,
    {
        if !self.contains_arc(id) {
            return Ok(false);
        }
        let require_connected = self.policy.require_connected() && self.is_weakly_connected();
        let snapshot = require_connected.then(|| self.clone());
        self.remove_arc_uncommitted(id);
        if require_connected && !self.is_weakly_connected() {
            *self = snapshot.expect("snapshot taken when require_connected is true");
            return Err(HypergraphError::new(
                "Graph::remove_arc",
                ErrorKind::PolicyViolated,
                "removing this arc would disconnect the graph",
            ));
        }
        Ok(true)
    }

    /// Bulk removal of vertices. All requested vertices are removed as one transaction:
    /// if the policy ends up violated, none of them are.
    pub fn remove_all_vertices(
        &mut self,
        ids: impl IntoIterator<Item = VertexId>,
    ) -> HypergraphResult<HashSet<VertexId>>
    where
        V: Clone,
        A: Clone,
    {
        let requested: Vec<VertexId> = ids.into_iter().collect();
        let require_connected = self.policy.require_connected() && self.is_weakly_connected();
        let snapshot = require_connected.then(|| self.clone());

        let selected = self.select_present_vertices(&requested);
        for id in &selected {
            self.remove_vertex_uncommitted(*id);
        }

        if require_connected && !self.is_weakly_connected() {
            *self = snapshot.expect("snapshot taken when require_connected is true");
            return Err(HypergraphError::new(
                "Graph::remove_all_vertices",
                ErrorKind::PolicyViolated,
                "removing this set of vertices would disconnect the graph",
            ));
        }
        Ok(selected)
    }

    /// Bulk removal of arcs. Same all-or-nothing transaction semantics as
    /// [`remove_all_vertices`](Self::remove_all_vertices).
    pub fn remove_all_arcs(
        &mut self,
        ids: impl IntoIterator<Item = ArcId>,
    ) -> HypergraphResult<HashSet<ArcId>>
    where
        V: Clone,
        A: Clone,
    {
        let requested: Vec<ArcId> = ids.into_iter().collect();
        let require_connected = self.policy.require_connected() && self.is_weakly_connected();
        let snapshot = require_connected.then(|| self.clone());

        let selected = self.select_present_arcs(&requested);
        for id in &selected {
            self.remove_arc_uncommitted(*id);
        }

        if require_connected && !self.is_weakly_connected() {
            *self = snapshot.expect("snapshot taken when require_connected is true");
            return Err(HypergraphError::new(
                "Graph::remove_all_arcs",
                ErrorKind::PolicyViolated,
                "removing this set of arcs would disconnect the graph",
            ));
        }
        Ok(selected)
    }

    /// Picks the shorter side to drive the scan: if the request names fewer vertices
    /// than the graph holds, probe each requested id against the graph directly;
    /// otherwise walk the graph's own (smaller) vertex set and test membership in the
    /// request, using a linear scan for small requests and a `HashSet` once the request
    /// is large enough that hashing pays for itself.
    fn select_present_vertices(&self, requested: &[VertexId]) -> HashSet<VertexId> {
        if requested.len() <= self.vertices.len() {
            requested.iter().copied().filter(|id| self.contains_vertex(*id)).collect()
        } else if requested.len() <= LINEAR_SCAN_THRESHOLD {
            self.vertices
                .iter()
                .map(|data| VertexId(data.id))
                .filter(|id| requested.contains(id))
                .collect()
        } else {
            let wanted: HashSet<VertexId> = requested.iter().copied().collect();
            self.vertices
                .iter()
                .map(|data| VertexId(data.id))
                .filter(|id| wanted.contains(id))
                .collect()
        }
    }

    fn select_present_arcs(&self, requested: &[ArcId]) -> HashSet<ArcId> {
        if requested.len() <= self.arcs.len() {
            requested.iter().copied().filter(|id| self.contains_arc(*id)).collect()
        } else if requested.len() <= LINEAR_SCAN_THRESHOLD {
            self.arcs.iter().map(|data| ArcId(data.id)).filter(|id| requested.contains(id)).collect()
        } else {
            let wanted: HashSet<ArcId> = requested.iter().copied().collect();
            self.arcs
                .iter()
                .map(|data| ArcId(data.id))
                .filter(|id| wanted.contains(id))
                .collect()
        }
    }

    /// Label-matched bulk vertex removal (`null` matches `null`).
    pub fn remove_all_vertices_by_label(
        &mut self,
        label: Option<&V>,
    ) -> HypergraphResult<HashSet<VertexId>>
    where
        V: PartialEq + Clone,
        A: Clone,
    {
        let matching = self.vertices_by_label(label);
        self.remove_all_vertices(matching)
    }

    /// Label-matched bulk arc removal (`null` matches `null`).
    pub fn remove_all_arcs_by_label(
        &mut self,
        label: Option<&A>,
    ) -> HypergraphResult<HashSet<ArcId>>
    where
        A: PartialEq + Clone,
        V: Clone,
    {
        let matching = self.arcs_by_label(label);
        self.remove_all_arcs(matching)
    }

    fn remove_vertex_uncommitted(&mut self, id: VertexId) {
        let Some(data) = self.vertex_data(id) else { return };
        let mut touched: HashSet<ArcId> = HashSet::new();
        touched.extend(data.outgoing.iter().copied());
        touched.extend(data.incoming.iter().copied());
        for arc_id in touched {
            let (source_empty, destination_empty) = {
                let Some(arc) = self.arc_data_mut(arc_id) else { continue };
                arc.source.remove(id.0);
                arc.destination.remove(id.0);
                (arc.source.is_empty(), arc.destination.is_empty())
            };
            let must_cascade = (source_empty && destination_empty)
                || (!self.policy.allows_half_arcs() && (source_empty || destination_empty));
            if must_cascade {
                self.remove_arc_uncommitted(arc_id);
            }
        }
        self.vertices.remove(id.0);
    }

    fn remove_arc_uncommitted(&mut self, id: ArcId) {
        if let Some(data) = self.arc_data(id) {
            let sources: Vec<VertexId> = data.source.iter().copied().collect();
            let destinations: Vec<VertexId> = data.destination.iter().copied().collect();
            for vertex in sources {
                if let Some(vd) = self.vertex_data_mut(vertex) {
                    vd.outgoing.remove(id.0);
                }
            }
            for vertex in destinations {
                if let Some(vd) = self.vertex_data_mut(vertex) {
                    vd.incoming.remove(id.0);
                }
            }
        }
        self.arcs.remove(id.0);
    }

    /// # Empty the graph
    ///
    /// ## Description
    /// Removes every vertex and arc and resets both id counters, so ids freed by this
    /// clear may be reassigned to the next vertices/arcs added.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.arcs.clear();
        self.vertex_ids.reset();
        self.arc_ids.reset();
    }

    /// ## Returns
    /// A fresh (non-backed) set of vertices whose label compares equal to `label`
    /// (`None` matches vertices with no label).
    pub fn vertices_by_label(&self, label: Option<&V>) -> HashSet<VertexId>
    where
        V: PartialEq,
    {
        self.vertices
            .iter()
            .filter(|data| data.label.as_ref() == label)
            .map(|data| VertexId(data.id))
            .collect()
    }

    /// ## Returns
    /// A fresh (non-backed) set of arcs whose label compares equal to `label`.
    pub fn arcs_by_label(&self, label: Option<&A>) -> HashSet<ArcId>
    where
        A: PartialEq,
    {
        self.arcs
            .iter()
            .filter(|data| data.label.as_ref() == label)
            .map(|data| ArcId(data.id))
            .collect()
    }

    /// ## Returns
    /// A fresh set of every distinct label currently borne by some vertex (`None` is
    /// included if any vertex is unlabeled).
    pub fn vertex_labels(&self) -> Vec<Option<&V>>
    where
        V: PartialEq,
    {
        let mut labels: Vec<Option<&V>> = Vec::new();
        for data in self.vertices.iter() {
            let label = data.label.as_ref();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }

    /// ## Returns
    /// A fresh set of every distinct label currently borne by some arc.
    pub fn arc_labels(&self) -> Vec<Option<&A>>
    where
        A: PartialEq,
    {
        let mut labels: Vec<Option<&A>> = Vec::new();
        for data in self.arcs.iter() {
            let label = data.label.as_ref();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }

    /// # Set vertex label
    pub fn set_vertex_label(&mut self, id: VertexId, label: Option<V>) -> HypergraphResult<()> {
        match self.vertex_data_mut(id) {
            Some(data) => {
                data.label = label;
                Ok(())
            }
            None => Err(HypergraphError::new(
                "Graph::set_vertex_label",
                ErrorKind::NotInGraph,
                format!("vertex {} is not a member of this graph", id),
            )),
        }
    }

    /// # Set arc label
    pub fn set_arc_label(&mut self, id: ArcId, label: Option<A>) -> HypergraphResult<()> {
        match self.arc_data_mut(id) {
            Some(data) => {
                data.label = label;
                Ok(())
            }
            None => Err(HypergraphError::new(
                "Graph::set_arc_label",
                ErrorKind::NotInGraph,
                format!("arc {} is not a member of this graph", id),
            )),
        }
    }

    /// # Connect two vertices
    ///
    /// ## Description
    /// Ensures `from` is adjacent to `to`: if an arc from `from` to `to` already exists,
    /// returns it unchanged; otherwise creates a new singleton-source/singleton-
    /// destination arc between them.
    ///
    /// ## Returns
    /// The arc id and whether it was newly created.
    ///
    /// ## Failure
    /// `NotInGraph` if either vertex is not attached to this graph.
    pub fn connect(&mut self, from: VertexId, to: VertexId) -> HypergraphResult<(ArcId, bool)> {
        const FUNCTION_PATH: &str = "Graph::connect";
        if !self.contains_vertex(from) {
            return Err(HypergraphError::new(
                FUNCTION_PATH,
                ErrorKind::NotInGraph,
                format!("vertex {} is not a member of this graph", from),
            ));
        }
        if !self.contains_vertex(to) {
            return Err(HypergraphError::new(
                FUNCTION_PATH,
                ErrorKind::NotInGraph,
                format!("vertex {} is not a member of this graph", to),
            ));
        }
        if let Some(existing) = self.find_arc_between(from, to) {
            return Ok((existing, false));
        }
        let arc_id = self.add_arc([from], [to], None)?;
        Ok((arc_id, true))
    }

    fn find_arc_between(&self, from: VertexId, to: VertexId) -> Option<ArcId> {
        let data = self.vertex_data(from)?;
        data.outgoing.iter().find(|arc_id| {
            self.arc_data(**arc_id).map(|arc| arc.destination.contains(to.0)).unwrap_or(false)
        }).copied()
    }

    /// Adds `vertex` to `arc`'s source set. Rejected under a policy that forbids
    /// hyper-arcs if it would grow the source set past one vertex.
    pub fn arc_add_to_source(&mut self, arc: ArcId, vertex: VertexId) -> HypergraphResult<bool> {
        self.arc_add_to_side(arc, vertex, true)
    }

    /// Adds `vertex` to `arc`'s destination set.
    pub fn arc_add_to_destination(
        &mut self,
        arc: ArcId,
        vertex: VertexId,
    ) -> HypergraphResult<bool> {
        self.arc_add_to_side(arc, vertex, false)
    }

    fn arc_add_to_side(
        &mut self,
        arc: ArcId,
        vertex: VertexId,
        source_side: bool,
    ) -> HypergraphResult<bool> {
        const FUNCTION_PATH: &str = "Graph::arc_add_to_side";
        if !self.contains_arc(arc) {
            return Err(HypergraphError::new(
                FUNCTION_PATH,
                ErrorKind::NotInGraph,
                format!("arc {} is not a member of this graph", arc),
            ));
        }
        if !self.contains_vertex(vertex) {
            return Err(HypergraphError::new(
                FUNCTION_PATH,
                ErrorKind::NotInGraph,
                format!("vertex {} is not a member of this graph", vertex),
            ));
        }
        let data = self.arc_data(arc).expect("checked above");
        let side = if source_side { &data.source } else { &data.destination };
        if side.contains(vertex.0) {
            return Ok(false);
        }
        if side.len() + 1 > 1 && !self.policy.allows_hyper_arcs() {
            return Err(HypergraphError::new(
                FUNCTION_PATH,
                ErrorKind::PolicyViolated,
                "this graph's policy forbids hyper-arcs",
            ));
        }
        let data = self.arc_data_mut(arc).expect("checked above");
        if source_side {
            data.source.add(vertex);
        } else {
            data.destination.add(vertex);
        }
        let vertex_data = self.vertex_data_mut(vertex).expect("checked above");
        if source_side {
            vertex_data.outgoing.add(arc);
        } else {
            vertex_data.incoming.add(arc);
        }
        Ok(true)
    }

    /// Removes `vertex` from `arc`'s source set. Rejects the call under
    /// [`GraphPolicy::allows_half_arcs`] `== false` if it would leave the source set
    /// empty.
    pub fn arc_remove_from_source(
        &mut self,
        arc: ArcId,
        vertex: VertexId,
    ) -> HypergraphResult<bool> {
        self.arc_remove_from_side(arc, vertex, true)
    }

    /// Removes `vertex` from `arc`'s destination set.
    pub fn arc_remove_from_destination(
        &mut self,
        arc: ArcId,
        vertex: VertexId,
    ) -> HypergraphResult<bool> {
        self.arc_remove_from_side(arc, vertex, false)
    }

    fn arc_remove_from_side(
        &mut self,
        arc: ArcId,
        vertex: VertexId,
        source_side: bool,
    ) -> HypergraphResult<bool> {
        const FUNCTION_PATH: &str = "Graph::arc_remove_from_side";
        let Some(data) = self.arc_data(arc) else {
            return Err(HypergraphError::new(
                FUNCTION_PATH,
                ErrorKind::NotInGraph,
                format!("arc {} is not a member of this graph", arc),
            ));
        };
        let side = if source_side { &data.source } else { &data.destination };
        if !side.contains(vertex.0) {
            return Ok(false);
        }
        if side.len() == 1 && !self.policy.allows_half_arcs() {
            return Err(HypergraphError::new(
                FUNCTION_PATH,
                ErrorKind::PolicyViolated,
                "this graph's policy forbids half-arcs",
            ));
        }
        let data = self.arc_data_mut(arc).expect("checked above");
        if source_side {
            data.source.remove(vertex.0);
        } else {
            data.destination.remove(vertex.0);
        }
        if let Some(vertex_data) = self.vertex_data_mut(vertex) {
            if source_side {
                vertex_data.outgoing.remove(arc.0);
            } else {
                vertex_data.incoming.remove(arc.0);
            }
        }
        Ok(true)
    }

    pub(crate) fn has_reverse_arc(&self, arc_id: ArcId) -> bool {
        let Some(data) = self.arc_data(arc_id) else { return false };
        let source_ids: HashSet<u64> = data.source.iter().map(|v| v.0).collect();
        let destination_ids: HashSet<u64> = data.destination.iter().map(|v| v.0).collect();
        self.arcs.iter().any(|other| {
            other.id != data.id
                && other.source.len() == destination_ids.len()
                && other.destination.len() == source_ids.len()
                && other.source.iter().all(|v| destination_ids.contains(&v.0))
                && other.destination.iter().all(|v| source_ids.contains(&v.0))
        })
    }

    /// Weak (direction-ignoring) connectivity, used by [`GraphPolicy::require_connected`].
    /// An empty graph is vacuously connected.
    fn is_weakly_connected(&self) -> bool {
        let Some(start) = self.vertices.iter().next() else { return true };
        let mut visited: HashSet<u64> = HashSet::new();
        visited.insert(start.id);
        let mut stack = vec![start.id];
        while let Some(current) = stack.pop() {
            let Some(data) = self.vertices.get(current) else { continue };
            let mut neighbours: Vec<u64> = Vec::new();
            for arc_id in data.outgoing.iter().chain(data.incoming.iter()) {
                if let Some(arc) = self.arc_data(*arc_id) {
                    neighbours.extend(arc.source.iter().map(|v| v.0));
                    neighbours.extend(arc.destination.iter().map(|v| v.0));
                }
            }
            for neighbour in neighbours {
                if visited.insert(neighbour) {
                    stack.push(neighbour);
                }
            }
        }
        visited.len() == self.vertices.len()
    }
}

fn identity_set_equals_hashset(set: &IdentitySet<VertexId>, other: &HashSet<VertexId>) -> bool {
    set.len() == other.len() && set.iter().all(|v| other.contains(v))
}

impl<V: fmt::Display, A> fmt::Display for Graph<V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .vertices
            .iter()
            .map(|data| data.id)
            .sorted_unstable()
            .map(|id| self.vertex(VertexId(id)).expect("id from own vertex set").render())
            .join("\n");
        f.write_str(&rendered)
    }
}
