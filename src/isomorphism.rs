//! # Isomorphism module
//!
//! ## Description
//! Structural equality for [`Graph`]: two graphs are equal iff there is a bijection
//! between their vertices (and the induced bijection between their arcs) that
//! preserves labels and incidence. Three stages, cheapest first:
//!
//! - **Stage A.** Compute a 64-bit canonical hash per vertex and per arc
//!   (`hash.rs`'s layered BFS walk).
//! - **Stage B.** Bucket each side's elements by that hash. If the two graphs don't
//!   produce the same bucket keys with the same per-key sizes, they cannot be
//!   isomorphic and the search never starts.
//! - **Stage C.** A VF2-style backtracking search for a vertex bijection, restricted
//!   to candidates sharing a hash bucket, with an incremental adjacency-consistency
//!   check at each tentative assignment. This crate runs that backtracking as plain
//!   recursion rather than the hand-rolled frontier/cursor stack a language without a
//!   real call stack would need — recursion already undoes a failed branch's mapping
//!   entries on return, which is what that explicit stack exists to simulate; see
//!   `DESIGN.md`.
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use crate::graph::Graph;
use crate::hash::{canonical_hash_arc, canonical_hash_vertex, LabelCache};
use crate::ids::{ArcId, VertexId};

fn hash_all_vertices<V: Hash, A: Hash>(
    graph: &Graph<V, A>,
    cache: &mut LabelCache,
) -> HashMap<VertexId, i64> {
    graph.vertices().map(|v| (v.id(), canonical_hash_vertex(graph, v.id(), cache))).collect()
}

fn hash_all_arcs<V: Hash, A: Hash>(
    graph: &Graph<V, A>,
    cache: &mut LabelCache,
) -> HashMap<ArcId, i64> {
    graph.arcs().map(|a| (a.id(), canonical_hash_arc(graph, a.id(), cache))).collect()
}

fn bucket_by_hash<Id: Eq + Hash + Copy>(hashes: &HashMap<Id, i64>) -> HashMap<i64, Vec<Id>> {
    let mut buckets: HashMap<i64, Vec<Id>> = HashMap::new();
    for (&id, &hash) in hashes {
        buckets.entry(hash).or_default().push(id);
    }
    buckets
}

fn buckets_match<Id>(left: &HashMap<i64, Vec<Id>>, right: &HashMap<i64, Vec<Id>>) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter().all(|(key, group)| right.get(key).is_some_and(|other| other.len() == group.len()))
}

/// Whether the already-mapped vertices are consistent with tentatively pairing `x`
/// with `y`: for every previously matched pair `(x', y')`, adjacency between `x`/`x'`
/// in `g1` must match adjacency between `y`/`y'` in `g2`, in both directions.
fn consistent_with_mapping<V, A>(
    g1: &Graph<V, A>,
    g2: &Graph<V, A>,
    x: VertexId,
    y: VertexId,
    mapping: &HashMap<VertexId, VertexId>,
) -> bool {
    let vx = g1.vertex(x).expect("x came from g1's own vertex list");
    let vy = g2.vertex(y).expect("y came from g2's own bucket, itself built from g2's vertices");
    for (&other_x, &other_y) in mapping {
        let forward_in_g1 = vx.is_adjacent(other_x);
        let forward_in_g2 = vy.is_adjacent(other_y);
        if forward_in_g1 != forward_in_g2 {
            return false;
        }
        let backward_in_g1 = g1.vertex(other_x).expect("mapped vertex").is_adjacent(x);
        let backward_in_g2 = g2.vertex(other_y).expect("mapped vertex").is_adjacent(y);
        if backward_in_g1 != backward_in_g2 {
            return false;
        }
    }
    true
}

fn backtrack<V, A>(
    g1: &Graph<V, A>,
    g2: &Graph<V, A>,
    order: &[VertexId],
    index: usize,
    vertex_hash_1: &HashMap<VertexId, i64>,
    buckets_2: &HashMap<i64, Vec<VertexId>>,
    mapping: &mut HashMap<VertexId, VertexId>,
    used: &mut HashSet<VertexId>,
) -> bool
where
    V: PartialEq,
    A: PartialEq,
{
    if index == order.len() {
        return verify_arc_bijection(g1, g2, mapping);
    }
    let x = order[index];
    let vx = g1.vertex(x).expect("x came from g1's own vertex list");
    let hash = vertex_hash_1[&x];
    let Some(candidates) = buckets_2.get(&hash) else { return false };
    for &y in candidates {
        if used.contains(&y) {
            continue;
        }
        let vy = g2.vertex(y).expect("y came from g2's own bucket");
        if vx.label() != vy.label() {
            continue;
        }
        if vx.degree_in() != vy.degree_in() || vx.degree_out() != vy.degree_out() {
            continue;
        }
        if !consistent_with_mapping(g1, g2, x, y, mapping) {
            continue;
        }
        mapping.insert(x, y);
        used.insert(y);
        if backtrack(g1, g2, order, index + 1, vertex_hash_1, buckets_2, mapping, used) {
            return true;
        }
        mapping.remove(&x);
        used.remove(&y);
    }
    false
}

fn vertex_set_eq(
    identity_side: &crate::identity_set::IdentitySet<VertexId>,
    mapped_side: &HashSet<VertexId>,
) -> bool {
    if identity_side.len() != mapped_side.len() {
        return false;
    }
    identity_side.iter().all(|v| mapped_side.contains(v))
}

/// Once every vertex is mapped, confirm the mapping induces a genuine arc bijection:
/// every arc of `g1`, with its endpoints carried through `mapping`, must correspond to
/// exactly one not-yet-claimed arc of `g2` with an equal label and the same endpoint
/// images.
fn verify_arc_bijection<V, A>(
    g1: &Graph<V, A>,
    g2: &Graph<V, A>,
    mapping: &HashMap<VertexId, VertexId>,
) -> bool
where
    A: PartialEq,
{
    let mut claimed: HashSet<ArcId> = HashSet::new();
    for arc in g1.arcs() {
        let mapped_source: HashSet<VertexId> =
            arc.source_vertices().iter().map(|v| mapping[v]).collect();
        let mapped_destination: HashSet<VertexId> =
            arc.destination_vertices().iter().map(|v| mapping[v]).collect();
        let found = g2.arcs().find(|candidate| {
            !claimed.contains(&candidate.id())
                && candidate.label() == arc.label()
                && vertex_set_eq(candidate.source_vertices(), &mapped_source)
                && vertex_set_eq(candidate.destination_vertices(), &mapped_destination)
        });
        match found {
            Some(candidate) => {
                claimed.insert(candidate.id());
            }
            None => return false,
        }
    }
    true
}

pub(crate) fn graphs_isomorphic<V, A>(g1: &Graph<V, A>, g2: &Graph<V, A>) -> bool
where
    V: Hash + PartialEq,
    A: Hash + PartialEq,
{
    if g1.num_vertices() != g2.num_vertices() || g1.num_arcs() != g2.num_arcs() {
        return false;
    }

    let mut cache = LabelCache::new();
    let vertex_hash_1 = hash_all_vertices(g1, &mut cache);
    let vertex_hash_2 = hash_all_vertices(g2, &mut cache);
    let vertex_buckets_1 = bucket_by_hash(&vertex_hash_1);
    let vertex_buckets_2 = bucket_by_hash(&vertex_hash_2);
    if !buckets_match(&vertex_buckets_1, &vertex_buckets_2) {
        return false;
    }

    let arc_hash_1 = hash_all_arcs(g1, &mut cache);
    let arc_hash_2 = hash_all_arcs(g2, &mut cache);
    let arc_buckets_1 = bucket_by_hash(&arc_hash_1);
    let arc_buckets_2 = bucket_by_hash(&arc_hash_2);
    if !buckets_match(&arc_buckets_1, &arc_buckets_2) {
        return false;
    }

    // Smaller buckets first: fewer candidates per vertex means earlier pruning.
    let mut order: Vec<VertexId> = vertex_hash_1.keys().copied().collect();
    order.sort_by_key(|id| vertex_buckets_1[&vertex_hash_1[id]].len());

    let mut mapping = HashMap::new();
    let mut used = HashSet::new();
    backtrack(g1, g2, &order, 0, &vertex_hash_1, &vertex_buckets_2, &mut mapping, &mut used)
}

impl<V, A> Graph<V, A>
where
    V: Hash,
    A: Hash,
{
    /// # Canonical digest
    ///
    /// ## Description
    /// An order-independent fingerprint of the whole graph: the XOR of every vertex's
    /// and every arc's canonical hash. Equal graphs (per [`PartialEq`]) always share a
    /// digest; unequal graphs usually don't, though a collision is possible since XOR
    /// discards ordering information hash-bucket matching would otherwise use.
    pub fn canonical_digest(&self) -> u64 {
        let mut cache = LabelCache::new();
        let mut digest: u64 = 0;
        for vertex in self.vertices() {
            digest ^= canonical_hash_vertex(self, vertex.id(), &mut cache) as u64;
        }
        for arc in self.arcs() {
            digest ^= canonical_hash_arc(self, arc.id(), &mut cache) as u64;
        }
        digest
    }
}

impl<V, A> PartialEq for Graph<V, A>
where
    V: Hash + PartialEq,
    A: Hash + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        graphs_isomorphic(self, other)
    }
}

impl<V, A> Eq for Graph<V, A>
where
    V: Hash + PartialEq,
    A: Hash + PartialEq,
{
}

impl<V, A> Hash for Graph<V, A>
where
    V: Hash,
    A: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_digest().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph<&'static str, ()> {
        let mut graph: Graph<&'static str, ()> = Graph::new();
        let a = graph.add_vertex(Some("a"));
        let b = graph.add_vertex(Some("b"));
        let c = graph.add_vertex(Some("c"));
        graph.add_arc([a], [b], None).unwrap();
        graph.add_arc([b], [c], None).unwrap();
        graph.add_arc([c], [a], None).unwrap();
        graph
    }

    #[test]
    fn relabeled_triangle_is_isomorphic() {
        let g1 = triangle();
        let mut g2: Graph<&'static str, ()> = Graph::new();
        let x = g2.add_vertex(Some("b"));
        let y = g2.add_vertex(Some("c"));
        let z = g2.add_vertex(Some("a"));
        g2.add_arc([x], [y], None).unwrap();
        g2.add_arc([y], [z], None).unwrap();
        g2.add_arc([z], [x], None).unwrap();
        assert_eq!(g1, g2);
    }

    #[test]
    fn different_vertex_count_is_not_isomorphic() {
        let g1 = triangle();
        let mut g2: Graph<&'static str, ()> = Graph::new();
        g2.add_vertex(Some("a"));
        g2.add_vertex(Some("b"));
        assert_ne!(g1, g2);
    }

    #[test]
    fn hyper_arc_breaks_isomorphism_with_plain_arcs() {
        let g1 = triangle();
        let mut g2: Graph<&'static str, ()> = Graph::new();
        let a = g2.add_vertex(Some("a"));
        let b = g2.add_vertex(Some("b"));
        let c = g2.add_vertex(Some("c"));
        g2.add_arc([a, b], [c], None).unwrap();
        assert_ne!(g1, g2);
    }

    #[test]
    fn empty_graphs_are_isomorphic() {
        let g1: Graph<&'static str, ()> = Graph::new();
        let g2: Graph<&'static str, ()> = Graph::new();
        assert_eq!(g1, g2);
    }
}
