use hypergraph::{Graph, GraphPolicy};

/// Scenario 1: two independently built 3-vertex triangles (A→B, B→C, A→C) must compare
/// equal, and every pair of vertices playing the same structural role must share a
/// canonical hash (approximated here via the public structural hash, since the
/// canonical hash itself is crate-internal).
#[test]
fn triangle_graphs_built_independently_are_equal() {
    let mut g1: Graph<&'static str, ()> = Graph::new();
    let a1 = g1.add_vertex(Some("A"));
    let b1 = g1.add_vertex(Some("B"));
    let c1 = g1.add_vertex(Some("C"));
    g1.add_arc([a1], [b1], None).unwrap();
    g1.add_arc([b1], [c1], None).unwrap();
    g1.add_arc([a1], [c1], None).unwrap();

    let mut g2: Graph<&'static str, ()> = Graph::new();
    let a2 = g2.add_vertex(Some("A"));
    let b2 = g2.add_vertex(Some("B"));
    let c2 = g2.add_vertex(Some("C"));
    g2.add_arc([a2], [b2], None).unwrap();
    g2.add_arc([b2], [c2], None).unwrap();
    g2.add_arc([a2], [c2], None).unwrap();

    assert_eq!(g1, g2);
    assert_eq!(g1.vertex(a1).unwrap().structural_hash(), g2.vertex(a2).unwrap().structural_hash());
    assert_eq!(g1.vertex(b1).unwrap().structural_hash(), g2.vertex(b2).unwrap().structural_hash());
    assert_eq!(g1.vertex(c1).unwrap().structural_hash(), g2.vertex(c2).unwrap().structural_hash());
}

/// Scenario 2: a 4-cycle and the same cycle with vertices relabeled {3,4,1,2} (cyclic
/// rotation, preserving cycle order) must be equal.
#[test]
fn rotated_four_cycle_is_isomorphic() {
    let mut g: Graph<i32, ()> = Graph::new();
    let v1 = g.add_vertex(Some(1));
    let v2 = g.add_vertex(Some(2));
    let v3 = g.add_vertex(Some(3));
    let v4 = g.add_vertex(Some(4));
    g.add_arc([v1], [v2], None).unwrap();
    g.add_arc([v2], [v3], None).unwrap();
    g.add_arc([v3], [v4], None).unwrap();
    g.add_arc([v4], [v1], None).unwrap();

    let mut g_rotated: Graph<i32, ()> = Graph::new();
    let w3 = g_rotated.add_vertex(Some(3));
    let w4 = g_rotated.add_vertex(Some(4));
    let w1 = g_rotated.add_vertex(Some(1));
    let w2 = g_rotated.add_vertex(Some(2));
    g_rotated.add_arc([w3], [w4], None).unwrap();
    g_rotated.add_arc([w4], [w1], None).unwrap();
    g_rotated.add_arc([w1], [w2], None).unwrap();
    g_rotated.add_arc([w2], [w3], None).unwrap();

    assert_eq!(g, g_rotated);
}

/// Scenario 3: mutating a graph while a live `vertices()` view is in progress must
/// panic on the view's next step rather than silently continuing.
///
/// No safe caller can build this scenario directly: the borrow checker already refuses
/// a `&mut graph` call while `iter` (borrowed from `graph`) is still live, which is
/// exactly the guarantee `ConcurrentlyModified` exists to enforce at runtime in
/// languages without one. The raw pointer below exists only to drive the panic path
/// itself under test.
#[test]
#[should_panic]
fn mutating_during_live_iteration_panics() {
    let mut graph: Graph<(), ()> = Graph::new();
    graph.add_vertex(None);
    graph.add_vertex(None);
    let graph_ptr: *mut Graph<(), ()> = &mut graph;
    let mut iter = graph.vertices();
    iter.next();
    unsafe {
        (*graph_ptr).add_vertex(None);
    }
    iter.next();
}

/// Scenario 4: under a tree policy, an arc that would close a cycle is rejected with
/// the graph left exactly as it was.
#[test]
fn tree_policy_rejects_cycle_closing_arc() {
    let mut graph: Graph<(), ()> = Graph::with_policy(GraphPolicy::tree());
    let root = graph.add_vertex(None);
    let child = graph.add_vertex(None);
    let grandchild = graph.add_vertex(None);
    graph.add_arc([root], [child], None).unwrap();
    graph.add_arc([child], [grandchild], None).unwrap();

    let vertices_before = graph.num_vertices();
    let arcs_before = graph.num_arcs();
    let result = graph.add_arc([grandchild], [root], None);

    assert!(result.is_err());
    assert_eq!(graph.num_vertices(), vertices_before);
    assert_eq!(graph.num_arcs(), arcs_before);
}

/// Scenario 5: a hyper-arc `{a,b}->{c}` and a differently-shaped arc `{a}->{b,c}` with
/// matching labels must compare unequal — the degree mismatch is caught at hashing.
#[test]
fn hyper_arc_shape_mismatch_breaks_equality() {
    let mut g1: Graph<&'static str, &'static str> = Graph::new();
    let a1 = g1.add_vertex(Some("a"));
    let b1 = g1.add_vertex(Some("b"));
    let c1 = g1.add_vertex(Some("c"));
    g1.add_arc([a1, b1], [c1], Some("label")).unwrap();

    let mut g2: Graph<&'static str, &'static str> = Graph::new();
    let a2 = g2.add_vertex(Some("a"));
    let b2 = g2.add_vertex(Some("b"));
    let c2 = g2.add_vertex(Some("c"));
    g2.add_arc([a2], [b2, c2], Some("label")).unwrap();

    assert_ne!(g1, g2);
}

/// Scenario 6: a reflexive arc a->a is reflexive, `a` trivially reaches itself, and its
/// self-path is empty.
#[test]
fn reflexive_arc_behaves_as_a_self_loop() {
    let mut graph: Graph<(), ()> = Graph::new();
    let a = graph.add_vertex(None);
    let arc_id = graph.add_arc([a], [a], None).unwrap();

    assert!(graph.arc(arc_id).unwrap().is_reflexive());
    let vertex_a = graph.vertex(a).unwrap();
    assert!(vertex_a.can_reach(a));
    assert_eq!(vertex_a.path_to(a), Some(Vec::new()));
}
