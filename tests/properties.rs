use hypergraph::{Graph, GraphPolicy, VertexId};

#[test]
fn num_vertices_and_arcs_match_iterator_counts() {
    let mut graph: Graph<&'static str, &'static str> = Graph::new();
    let a = graph.add_vertex(Some("a"));
    let b = graph.add_vertex(Some("b"));
    graph.add_arc([a], [b], Some("ab")).unwrap();
    assert_eq!(graph.num_vertices(), graph.vertices().count());
    assert_eq!(graph.num_arcs(), graph.arcs().count());
}

#[test]
fn incidence_sets_stay_consistent_with_arc_endpoints() {
    let mut graph: Graph<&'static str, ()> = Graph::new();
    let a = graph.add_vertex(Some("a"));
    let b = graph.add_vertex(Some("b"));
    let arc_id = graph.add_arc([a], [b], None).unwrap();

    let vertex_a = graph.vertex(a).unwrap();
    let vertex_b = graph.vertex(b).unwrap();
    assert!(vertex_a.adjacent_vertices().contains(&b));
    assert_eq!(vertex_a.degree_out(), 1);
    assert_eq!(vertex_b.degree_in(), 1);

    let arc = graph.arc(arc_id).unwrap();
    assert_eq!(arc.source_size(), 1);
    assert_eq!(arc.destination_size(), 1);
}

#[test]
fn a_vertex_trivially_reaches_itself() {
    let mut graph: Graph<(), ()> = Graph::new();
    let v = graph.add_vertex(None);
    let vertex = graph.vertex(v).unwrap();
    assert!(vertex.can_reach(v));
    assert_eq!(vertex.path_to(v), Some(Vec::new()));
}

#[test]
fn can_reach_agrees_with_path_to_presence() {
    let mut graph: Graph<(), ()> = Graph::new();
    let a = graph.add_vertex(None);
    let b = graph.add_vertex(None);
    let c = graph.add_vertex(None);
    graph.add_arc([a], [b], None).unwrap();

    let va = graph.vertex(a).unwrap();
    assert!(va.can_reach(b));
    assert!(va.path_to(b).is_some());
    assert!(!va.can_reach(c));
    assert!(va.path_to(c).is_none());
}

#[test]
fn add_then_remove_vertex_restores_count_without_touching_arcs() {
    let mut graph: Graph<(), &'static str> = Graph::new();
    let a = graph.add_vertex(None);
    let b = graph.add_vertex(None);
    graph.add_arc([a], [b], Some("ab")).unwrap();
    let before_arcs = graph.num_arcs();

    let isolated = graph.add_vertex(None);
    let before_vertices = graph.num_vertices();
    assert!(graph.remove_vertex(isolated).unwrap());
    assert_eq!(graph.num_vertices(), before_vertices - 1);
    assert_eq!(graph.num_arcs(), before_arcs);
}

#[test]
fn add_then_remove_arc_restores_incidence() {
    let mut graph: Graph<(), &'static str> = Graph::new();
    let a = graph.add_vertex(None);
    let b = graph.add_vertex(None);
    let arc_id = graph.add_arc([a], [b], Some("ab")).unwrap();
    assert_eq!(graph.num_arcs(), 1);
    assert!(graph.remove_arc(arc_id).unwrap());
    assert_eq!(graph.num_arcs(), 0);
    assert_eq!(graph.vertex(a).unwrap().degree_out(), 0);
    assert_eq!(graph.vertex(b).unwrap().degree_in(), 0);
}

#[test]
fn clear_is_idempotent() {
    let mut graph: Graph<&'static str, ()> = Graph::new();
    graph.add_vertex(Some("a"));
    graph.clear();
    assert_eq!(graph.num_vertices(), 0);
    graph.clear();
    assert_eq!(graph.num_vertices(), 0);
}

#[test]
fn equals_is_reflexive_on_a_clone() {
    let mut graph: Graph<&'static str, ()> = Graph::new();
    let a = graph.add_vertex(Some("a"));
    let b = graph.add_vertex(Some("b"));
    graph.add_arc([a], [b], None).unwrap();
    let clone = graph.clone();
    assert_eq!(graph, clone);
}

#[test]
fn empty_graphs_are_equal() {
    let g1: Graph<&'static str, ()> = Graph::new();
    let g2: Graph<&'static str, ()> = Graph::new();
    assert_eq!(g1, g2);
}

#[test]
fn single_isolated_vertex_graphs_are_equal_regardless_of_label_identity() {
    let mut g1: Graph<String, ()> = Graph::new();
    g1.add_vertex(Some(String::from("same text")));
    let mut g2: Graph<String, ()> = Graph::new();
    g2.add_vertex(Some(String::from("same text")));
    assert_eq!(g1, g2);
}

#[test]
fn half_arc_is_always_directed() {
    let mut graph: Graph<(), ()> = Graph::new();
    let a = graph.add_vertex(None);
    let arc_id = graph.add_arc([a], std::iter::empty::<VertexId>(), None).unwrap();
    assert!(graph.arc(arc_id).unwrap().is_directed());
}

#[test]
fn removing_shared_vertex_cascades_only_arcs_left_empty() {
    let mut graph: Graph<(), ()> = Graph::new();
    let a = graph.add_vertex(None);
    let b = graph.add_vertex(None);
    let c = graph.add_vertex(None);
    // arc1 has two sources, only one of which is being removed: it survives.
    let arc1 = graph.add_arc([a, b], [c], None).unwrap();
    // arc2 has `a` as its only source: removing `a` empties it and it cascades away.
    let arc2 = graph.add_arc([a], [c], None).unwrap();

    graph.remove_vertex(a).unwrap();

    assert!(graph.contains_arc(arc1));
    assert!(!graph.contains_arc(arc2));
}

#[test]
fn tree_policy_rejects_a_closing_arc_and_leaves_counts_untouched() {
    let mut graph: Graph<(), ()> = Graph::with_policy(GraphPolicy::tree());
    let a = graph.add_vertex(None);
    let b = graph.add_vertex(None);
    let c = graph.add_vertex(None);
    graph.add_arc([a], [b], None).unwrap();
    graph.add_arc([b], [c], None).unwrap();

    let vertices_before = graph.num_vertices();
    let arcs_before = graph.num_arcs();
    let result = graph.add_arc([c], [a], None);
    assert!(result.is_err());
    assert_eq!(graph.num_vertices(), vertices_before);
    assert_eq!(graph.num_arcs(), arcs_before);
}
