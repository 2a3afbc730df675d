//! Integration tests for dependency-graph construction and ordering

use rill_compiler::{CompileError, DependencyGraph};
use rill_core::{IrNode, NodeId, NodeKind, TypeDescriptor};
use std::sync::Arc;

fn click_type() -> TypeDescriptor {
    TypeDescriptor::object("com.acme.Click".to_string(), vec![], vec![])
}

fn external(id: u32, name: &str) -> Arc<IrNode> {
    IrNode::external_stream(NodeId(id), name.to_string(), click_type())
}

fn sorted_ids(graph: &DependencyGraph) -> Vec<u32> {
    graph
        .topological_sort()
        .unwrap()
        .iter()
        .map(|node| node.id.0)
        .collect()
}

#[test]
fn test_chain_sorts_in_declaration_order() -> anyhow::Result<()> {
    let source = external(1, "source");
    let mapped = IrNode::map(NodeId(2), "mapped".to_string(), click_type(), &source);
    let filtered = IrNode::filter(NodeId(3), "filtered".to_string(), click_type(), &mapped);
    let selected = IrNode::select(NodeId(4), "selected".to_string(), click_type(), &filtered);

    let nodes = vec![source, mapped, filtered, selected];
    let graph = DependencyGraph::build(&[NodeId(4)], &nodes)?;

    assert_eq!(sorted_ids(&graph), vec![1, 2, 3, 4]);
    Ok(())
}

#[test]
fn test_single_dependency_scenario() {
    let node1 = external(1, "node1");
    let node2 = IrNode::map(NodeId(2), "node2".to_string(), click_type(), &node1);

    let nodes = vec![node1, node2];
    let graph = DependencyGraph::build(&[NodeId(2)], &nodes).unwrap();

    assert_eq!(sorted_ids(&graph), vec![1, 2]);
}

#[test]
fn test_join_scenario() {
    let node1 = external(1, "node1");
    let node2 = external(2, "node2");
    let node3 = IrNode::join(
        NodeId(3),
        "node3".to_string(),
        TypeDescriptor::joined_streams(click_type(), click_type()),
        &node1,
        &node2,
    );
    let node4 = IrNode::select(NodeId(4), "node4".to_string(), click_type(), &node3);

    let nodes = vec![node1, node2, node3, node4];
    let graph = DependencyGraph::build(&[NodeId(4)], &nodes).unwrap();

    assert_eq!(sorted_ids(&graph), vec![1, 2, 3, 4]);
}

#[test]
fn test_reused_input_scenario() -> anyhow::Result<()> {
    // node5 joins node2 with node4, so node2 feeds both joins. The sort
    // discovers node2 first, before the walk ever reaches node1.
    let node1 = external(1, "node1");
    let node2 = external(2, "node2");
    let node3 = IrNode::join(
        NodeId(3),
        "node3".to_string(),
        TypeDescriptor::joined_streams(click_type(), click_type()),
        &node1,
        &node2,
    );
    let node4 = IrNode::select(NodeId(4), "node4".to_string(), click_type(), &node3);
    let node5 = IrNode::join(
        NodeId(5),
        "node5".to_string(),
        TypeDescriptor::joined_streams(click_type(), click_type()),
        &node2,
        &node4,
    );
    let node6 = IrNode::select(NodeId(6), "node6".to_string(), click_type(), &node5);

    let nodes = vec![node1, node2, node3, node4, node5, node6];
    let graph = DependencyGraph::build(&[NodeId(6)], &nodes)?;

    assert_eq!(sorted_ids(&graph), vec![2, 1, 3, 4, 5, 6]);
    Ok(())
}

#[test]
fn test_every_edge_respects_the_order() {
    // Wider DAG with fan-out and fan-in at several depths.
    let source_a = external(10, "source_a");
    let source_b = external(20, "source_b");
    let map_a = IrNode::map(NodeId(11), "map_a".to_string(), click_type(), &source_a);
    let map_b = IrNode::flat_map(NodeId(21), "map_b".to_string(), click_type(), &source_b);
    let joined = IrNode::join(
        NodeId(30),
        "joined".to_string(),
        TypeDescriptor::joined_streams(click_type(), click_type()),
        &map_a,
        &map_b,
    );
    let grouped = IrNode::group_by(NodeId(31), "grouped".to_string(), click_type(), &joined);
    let reduced = IrNode::reduce(NodeId(32), "reduced".to_string(), click_type(), &grouped);
    let side = IrNode::filter(NodeId(12), "side".to_string(), click_type(), &map_a);

    let nodes = vec![
        source_a, source_b, map_a, map_b, joined, grouped, reduced, side,
    ];
    let graph = DependencyGraph::build(&[NodeId(32), NodeId(12)], &nodes).unwrap();
    let order = sorted_ids(&graph);

    assert_eq!(order.len(), graph.len());
    let position = |id: u32| order.iter().position(|&n| n == id).unwrap();
    for node in graph.nodes() {
        for dep in &node.dependencies {
            assert!(
                position(dep.0) < position(node.id.0),
                "dependency {} must precede node {}",
                dep.0,
                node.id.0
            );
        }
    }
}

#[test]
fn test_sort_is_deterministic() {
    let node1 = external(1, "node1");
    let node2 = external(2, "node2");
    let node3 = IrNode::join(
        NodeId(3),
        "node3".to_string(),
        TypeDescriptor::joined_streams(click_type(), click_type()),
        &node1,
        &node2,
    );
    let node4 = IrNode::select(NodeId(4), "node4".to_string(), click_type(), &node3);
    let nodes = vec![node1, node2, node3, node4];

    let first = DependencyGraph::build(&[NodeId(4)], &nodes).unwrap();
    let reference = sorted_ids(&first);

    for _ in 0..10 {
        let graph = DependencyGraph::build(&[NodeId(4)], &nodes).unwrap();
        assert_eq!(sorted_ids(&graph), reference);
    }
}

#[test]
fn test_duplicate_outputs_are_deduplicated() {
    let node1 = external(1, "node1");
    let node2 = IrNode::map(NodeId(2), "node2".to_string(), click_type(), &node1);

    let nodes = vec![node1, node2];
    let graph = DependencyGraph::build(&[NodeId(2), NodeId(2), NodeId(1)], &nodes).unwrap();

    assert_eq!(graph.roots(), &[NodeId(2), NodeId(1)]);
    assert_eq!(sorted_ids(&graph), vec![1, 2]);
}

#[test]
fn test_cycle_is_reported_not_looped() {
    let a = Arc::new(IrNode::new(
        NodeId(1),
        "a".to_string(),
        NodeKind::Map,
        click_type(),
        vec![NodeId(2)],
    ));
    let b = Arc::new(IrNode::new(
        NodeId(2),
        "b".to_string(),
        NodeKind::Map,
        click_type(),
        vec![NodeId(1)],
    ));

    let graph = DependencyGraph::build(&[NodeId(1)], &[a, b]).unwrap();
    let result = graph.topological_sort();
    assert!(matches!(result, Err(CompileError::GraphCycle(_))));
}

#[test]
fn test_sub_graph_replaces_middle_with_stand_in() {
    let source = external(1, "source");
    let middle = IrNode::map(NodeId(2), "middle".to_string(), click_type(), &source);
    let sink = IrNode::select(NodeId(3), "sink".to_string(), click_type(), &middle);

    let nodes = vec![source, middle.clone(), sink.clone()];
    let graph = DependencyGraph::build_sub_graph(&[NodeId(3)], &[NodeId(2)], &nodes).unwrap();

    // The stand-in keeps id, name, and output type but drops its upstream.
    let stand_in = graph.node(NodeId(2)).unwrap();
    assert_eq!(stand_in.id, middle.id);
    assert_eq!(stand_in.name, middle.name);
    assert_eq!(stand_in.output, middle.output);
    assert_eq!(stand_in.kind, NodeKind::Boundary);
    assert!(stand_in.dependencies.is_empty());

    // Downstream structure is unchanged.
    let downstream = graph.node(NodeId(3)).unwrap();
    assert_eq!(downstream.dependencies, sink.dependencies);
    assert!(!graph.contains(NodeId(1)));

    assert_eq!(sorted_ids(&graph), vec![2, 3]);
}
