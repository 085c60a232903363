mod common;

use airnav_lib::{load_graph_from_path, save_graph_to_path, Graph, Node};
use tempfile::tempdir;

use common::{key, square_graph};

#[test]
fn fixture_dump_loads() {
    let graph = square_graph();
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.segment_count(), 5);
    assert_eq!(graph.edge_cost(&key("A"), &key("C")), Some(5.0));
    assert!(graph.neighbours(&key("E")).is_empty());
}

#[test]
fn saved_graph_reloads_with_same_shape() {
    let mut graph = Graph::new("triangle");
    graph.add_node(Node::planar("P", -1.5, 2.25)).unwrap();
    graph.add_node(Node::planar("Q", 4.0, 0.125)).unwrap();
    graph.add_node(Node::planar("R", 0.0, -7.0)).unwrap();
    graph.add_named_segment("PQ", &key("P"), &key("Q")).unwrap();
    graph.add_named_segment("QR", &key("Q"), &key("R")).unwrap();

    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("triangle.txt");
    save_graph_to_path(&graph, &path).expect("save");
    let reloaded = load_graph_from_path(&path).expect("load");

    assert_eq!(reloaded.node_count(), graph.node_count());
    for node in graph.nodes() {
        let copy = reloaded.node(&node.key).expect("node survives");
        assert_eq!(copy.position, node.position);
    }
    assert_eq!(reloaded.segment_count(), graph.segment_count());
    for segment in graph.segments() {
        let copy = reloaded
            .segment_between(&segment.origin, &segment.destination)
            .expect("segment survives");
        assert_eq!(copy.name, segment.name);
        assert!((copy.cost - segment.cost).abs() < 1e-12);
    }
}
