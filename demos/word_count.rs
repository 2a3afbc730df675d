//! Word-count pipeline example
//!
//! This example demonstrates:
//! - Building IR nodes for a socket-fed word-count pipeline
//! - Resolving the dependency graph and its execution order
//! - Lifting configuration values and record schemas into source fragments

use rill_compiler::{DependencyGraph, Lifter};
use rill_core::{ConfigValue, FieldDescriptor, IrNode, NodeId, TypeDescriptor, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Word Count Example ===\n");

    let line_type = TypeDescriptor::basic("String".to_string());
    let count_type = TypeDescriptor::tuple(
        "scala.Tuple2".to_string(),
        vec![
            TypeDescriptor::basic("String".to_string()),
            TypeDescriptor::numeric("Int".to_string()),
        ],
        vec![
            FieldDescriptor::new(
                "word".to_string(),
                TypeDescriptor::basic("String".to_string()),
            ),
            FieldDescriptor::new(
                "count".to_string(),
                TypeDescriptor::numeric("Int".to_string()),
            ),
        ],
    );

    // Build the pipeline: socket lines, split into words, count per word.
    let lines = IrNode::external_stream(NodeId(1), "lines".to_string(), line_type);
    let words = IrNode::flat_map(
        NodeId(2),
        "words".to_string(),
        TypeDescriptor::basic("String".to_string()),
        &lines,
    );
    let grouped = IrNode::group_by(NodeId(3), "grouped".to_string(), count_type.clone(), &words);
    let counts = IrNode::reduce(NodeId(4), "counts".to_string(), count_type.clone(), &grouped);

    let nodes = vec![lines, words, grouped, counts];
    let graph = DependencyGraph::build(&[NodeId(4)], &nodes)?;

    println!("Resolved {} nodes\n", graph.len());

    println!("Execution order:");
    for node in graph.topological_sort()? {
        println!("  {} {} ({:?})", node.id, node.name, node.kind);
    }

    // Lift the source configuration and the output schema.
    let lifter = Lifter::new();

    let source = Value::Config(ConfigValue::SocketSource {
        host: "localhost".to_string(),
        port: 9000,
        delimiter: '\n',
    });
    println!("\nSource configuration:");
    println!("  {}", lifter.lift(&source)?);

    println!("\nOutput schema:");
    println!("  {}", lifter.lift_schema(&count_type)?);

    Ok(())
}
