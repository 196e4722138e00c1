//! # Hash module
//!
//! ## Description
//! The layered forward/backward BFS walk shared by the isomorphism engine's Stage A
//! canonical hash (`isomorphism.rs`) and the single-element structural hash exposed on
//! [`Vertex`](crate::vertex::Vertex)/[`Arc`](crate::arc::Arc). Both start the same walk
//! from a single element (treating it as its own depth-1 layer), alternate vertex/arc
//! layers outward, accumulate a term per visited element, bitwise-invert after the
//! forward pass, then subtract an identical backward pass walked against the opposite
//! incidence direction.
//!
//! All arithmetic below is wrapping: the accumulator is a plain `i64`, and overflow in
//! any term (label hash mixed with degree terms shifted up to bit 48) is expected and
//! intentional, not a bug to guard against.
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use crate::arc::ArcData;
use crate::graph::Graph;
use crate::ids::{ArcId, VertexId};
use crate::vertex::VertexData;

const VERTEX_BASE: i64 = 31;
const ARC_BASE: i64 = 127;

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// Per-equality-call memoization of label hashes, keyed by the address of the label
/// storage slot that produced them, so the same vertex/arc label is never rehashed when
/// revisited by both the forward and backward passes of one walk; see module docs on
/// why address identity stands in for object identity here.
pub(crate) type LabelCache = HashMap<usize, i64>;

fn label_hash<T: Hash>(cache: &mut LabelCache, label: Option<&T>) -> i64 {
    match label {
        None => 0,
        Some(value) => {
            let key = value as *const T as usize;
            if let Some(existing) = cache.get(&key) {
                return *existing;
            }
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            let code = hasher.finish() as i64;
            cache.insert(key, code);
            code
        }
    }
}

fn vertex_term<V: Hash>(cache: &mut LabelCache, data: &VertexData<V>, k: u32) -> i64 {
    let label = label_hash(cache, data.label.as_ref());
    let out_degree = data.outgoing.len() as i64;
    let in_degree = data.incoming.len() as i64;
    label
        .wrapping_mul(VERTEX_BASE.wrapping_pow(k))
        .wrapping_add(out_degree.wrapping_pow(k).wrapping_shl(32))
        .wrapping_add(in_degree.wrapping_pow(k).wrapping_shl(48))
}

fn arc_term<A: Hash>(cache: &mut LabelCache, data: &ArcData<A>, k: u32) -> i64 {
    let label = label_hash(cache, data.label.as_ref());
    let source_size = data.source.len() as i64;
    let destination_size = data.destination.len() as i64;
    label
        .wrapping_mul(ARC_BASE.wrapping_pow(k))
        .wrapping_add(source_size.wrapping_pow(k).wrapping_shl(32))
        .wrapping_add(destination_size.wrapping_pow(k).wrapping_shl(48))
}

/// Walks outward from `start`, treating it as a depth-1 vertex layer, alternating with
/// arc layers. `direction` selects which incidence side feeds the next layer (outgoing
/// arcs / destination endpoints going forward, incoming arcs / source endpoints going
/// backward). Returns the plain sum of terms (sign and inversion are applied by the
/// caller).
fn walk_from_vertex<V: Hash, A: Hash>(
    graph: &Graph<V, A>,
    start: VertexId,
    direction: Direction,
    cache: &mut LabelCache,
) -> i64 {
    let mut sum: i64 = 0;
    let mut visited_vertices: HashSet<VertexId> = HashSet::new();
    let mut visited_arcs: HashSet<ArcId> = HashSet::new();
    visited_vertices.insert(start);
    let mut current_vertices = vec![start];
    let mut k: u32 = 1;
    loop {
        for vertex_id in &current_vertices {
            if let Some(data) = graph.vertex_data(*vertex_id) {
                sum = sum.wrapping_add(vertex_term(cache, data, k));
            }
        }
        k += 1;
        let mut arc_layer = Vec::new();
        for vertex_id in &current_vertices {
            let Some(data) = graph.vertex_data(*vertex_id) else { continue };
            let arcs = match direction {
                Direction::Forward => &data.outgoing,
                Direction::Backward => &data.incoming,
            };
            for arc_id in arcs.iter() {
                if visited_arcs.insert(*arc_id) {
                    arc_layer.push(*arc_id);
                }
            }
        }
        if arc_layer.is_empty() {
            break;
        }
        for arc_id in &arc_layer {
            if let Some(data) = graph.arc_data(*arc_id) {
                sum = sum.wrapping_add(arc_term(cache, data, k));
            }
        }
        k += 1;
        let mut vertex_layer = Vec::new();
        for arc_id in &arc_layer {
            let Some(data) = graph.arc_data(*arc_id) else { continue };
            let endpoints = match direction {
                Direction::Forward => &data.destination,
                Direction::Backward => &data.source,
            };
            for vertex_id in endpoints.iter() {
                if visited_vertices.insert(*vertex_id) {
                    vertex_layer.push(*vertex_id);
                }
            }
        }
        if vertex_layer.is_empty() {
            break;
        }
        current_vertices = vertex_layer;
    }
    sum
}

/// Mirror of [`walk_from_vertex`] seeded by a single arc instead.
fn walk_from_arc<V: Hash, A: Hash>(
    graph: &Graph<V, A>,
    start: ArcId,
    direction: Direction,
    cache: &mut LabelCache,
) -> i64 {
    let mut sum: i64 = 0;
    let mut visited_vertices: HashSet<VertexId> = HashSet::new();
    let mut visited_arcs: HashSet<ArcId> = HashSet::new();
    visited_arcs.insert(start);
    let mut current_arcs = vec![start];
    let mut k: u32 = 1;
    loop {
        for arc_id in &current_arcs {
            if let Some(data) = graph.arc_data(*arc_id) {
                sum = sum.wrapping_add(arc_term(cache, data, k));
            }
        }
        k += 1;
        let mut vertex_layer = Vec::new();
        for arc_id in &current_arcs {
            let Some(data) = graph.arc_data(*arc_id) else { continue };
            let endpoints = match direction {
                Direction::Forward => &data.destination,
                Direction::Backward => &data.source,
            };
            for vertex_id in endpoints.iter() {
                if visited_vertices.insert(*vertex_id) {
                    vertex_layer.push(*vertex_id);
                }
            }
        }
        if vertex_layer.is_empty() {
            break;
        }
        for vertex_id in &vertex_layer {
            if let Some(data) = graph.vertex_data(*vertex_id) {
                sum = sum.wrapping_add(vertex_term(cache, data, k));
            }
        }
        k += 1;
        let mut arc_layer = Vec::new();
        for vertex_id in &vertex_layer {
            let Some(data) = graph.vertex_data(*vertex_id) else { continue };
            let arcs = match direction {
                Direction::Forward => &data.outgoing,
                Direction::Backward => &data.incoming,
            };
            for arc_id in arcs.iter() {
                if visited_arcs.insert(*arc_id) {
                    arc_layer.push(*arc_id);
                }
            }
        }
        if arc_layer.is_empty() {
            break;
        }
        current_arcs = arc_layer;
    }
    sum
}

/// Forward pass summed and inverted, backward pass subtracted — the two-phase
/// accumulation shared by the canonical hash and the structural hash, abstracted over
/// what "one phase" walks.
fn combine(forward_sum: i64, backward_sum: i64) -> i64 {
    let inverted = !forward_sum;
    inverted.wrapping_sub(backward_sum)
}

pub(crate) fn canonical_hash_vertex<V: Hash, A: Hash>(
    graph: &Graph<V, A>,
    id: VertexId,
    cache: &mut LabelCache,
) -> i64 {
    let forward = walk_from_vertex(graph, id, Direction::Forward, cache);
    let backward = walk_from_vertex(graph, id, Direction::Backward, cache);
    combine(forward, backward)
}

pub(crate) fn canonical_hash_arc<V: Hash, A: Hash>(
    graph: &Graph<V, A>,
    id: ArcId,
    cache: &mut LabelCache,
) -> i64 {
    let forward = walk_from_arc(graph, id, Direction::Forward, cache);
    let backward = walk_from_arc(graph, id, Direction::Backward, cache);
    combine(forward, backward)
}

/// # Structural hash of a vertex
///
/// ## Description
/// The same layered walk used internally by the isomorphism engine, exposed as a
/// 32-bit value (the low 32 bits of the 64-bit accumulator — declaring the
/// accumulator itself as 32-bit would make the degree terms' `<<32`/`<<48` shifts land
/// out of range, so this crate computes at 64 bits throughout and narrows only the
/// final result; see `DESIGN.md`). An unattached, unlabeled vertex always
/// hashes to `-1` (the forward and backward passes both collapse to the zero term,
/// and bitwise-inverting zero is `-1`); see `DESIGN.md` for why a labeled unattached
/// vertex is not a similarly simple closed form.
pub fn structural_hash_vertex<V: Hash, A: Hash>(graph: &Graph<V, A>, id: VertexId) -> i32 {
    let mut cache = LabelCache::new();
    canonical_hash_vertex(graph, id, &mut cache) as i32
}

/// Structural hash of an arc; see [`structural_hash_vertex`].
pub fn structural_hash_arc<V: Hash, A: Hash>(graph: &Graph<V, A>, id: ArcId) -> i32 {
    let mut cache = LabelCache::new();
    canonical_hash_arc(graph, id, &mut cache) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn unattached_labeled_vertex_matches_mechanical_formula() {
        let mut graph: Graph<i32, i32> = Graph::new();
        let v = graph.add_vertex(Some(5));
        let mut cache = LabelCache::new();
        let label_code = label_hash(&mut cache, Some(&5i32));
        let term = label_code.wrapping_mul(VERTEX_BASE);
        // No arcs means the forward and backward passes both see exactly one term:
        // the seed vertex itself at depth 1, identical in both directions.
        let expected = combine(term, term);
        assert_eq!(canonical_hash_vertex(&graph, v, &mut LabelCache::new()), expected);
    }

    #[test]
    fn unattached_unlabeled_vertex_hashes_to_minus_one() {
        let mut graph: Graph<i32, i32> = Graph::new();
        let v = graph.add_vertex(None);
        assert_eq!(canonical_hash_vertex(&graph, v, &mut LabelCache::new()), -1);
        assert_eq!(structural_hash_vertex(&graph, v), -1);
    }

    #[test]
    fn structural_hash_is_stable_across_calls() {
        let mut graph: Graph<i32, i32> = Graph::new();
        let a = graph.add_vertex(Some(1));
        let b = graph.add_vertex(Some(2));
        graph.add_arc([a], [b], Some(9)).unwrap();
        let first = structural_hash_vertex(&graph, a);
        let second = structural_hash_vertex(&graph, a);
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_labels_usually_differ() {
        let mut graph: Graph<i32, i32> = Graph::new();
        let a = graph.add_vertex(Some(1));
        let b = graph.add_vertex(Some(2));
        assert_ne!(structural_hash_vertex(&graph, a), structural_hash_vertex(&graph, b));
    }
}
