//! Sub-graph extraction example
//!
//! This example demonstrates:
//! - Splitting a pipeline at a boundary node
//! - Compiling the downstream half with a truncated stand-in input
//! - Comparing the full and truncated execution orders

use rill_compiler::DependencyGraph;
use rill_core::{IrNode, NodeId, TypeDescriptor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Sub-Graph Example ===\n");

    let click_type = TypeDescriptor::object("com.acme.Click".to_string(), vec![], vec![]);

    // Two sources joined, then enriched and projected.
    let clicks = IrNode::external_stream(NodeId(1), "clicks".to_string(), click_type.clone());
    let users = IrNode::external_stream(NodeId(2), "users".to_string(), click_type.clone());
    let joined = IrNode::join(
        NodeId(3),
        "joined".to_string(),
        TypeDescriptor::joined_streams(click_type.clone(), click_type.clone()),
        &clicks,
        &users,
    );
    let enriched = IrNode::map(NodeId(4), "enriched".to_string(), click_type.clone(), &joined);
    let report = IrNode::select(NodeId(5), "report".to_string(), click_type.clone(), &enriched);

    let nodes = vec![clicks, users, joined, enriched, report];

    let full = DependencyGraph::build(&[NodeId(5)], &nodes)?;
    println!("Full pipeline ({} nodes):", full.len());
    for node in full.topological_sort()? {
        println!("  {} {} ({:?})", node.id, node.name, node.kind);
    }

    // Split at the join: everything upstream is replaced by a stand-in the
    // runtime feeds externally.
    let partial = DependencyGraph::build_sub_graph(&[NodeId(5)], &[NodeId(3)], &nodes)?;
    println!("\nDownstream of the join ({} nodes):", partial.len());
    for node in partial.topological_sort()? {
        println!("  {} {} ({:?})", node.id, node.name, node.kind);
    }

    Ok(())
}
