//! Dependency graph construction and ordering
//!
//! A `DependencyGraph` is the closure of a set of requested outputs over the
//! declared upstream references of immutable IR nodes. It is built once per
//! compile request and only read afterwards. Ordering is deterministic:
//! downstream consumers diff generated programs, so two builds over equal
//! graphs must produce byte-identical node sequences.

use crate::error::{CompileError, Result};
use rill_core::{IrNode, NodeId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// The reachable subgraph induced by a set of requested outputs
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Requested outputs in caller order, deduplicated
    roots: Vec<NodeId>,

    /// Reachable nodes by id
    nodes: HashMap<NodeId, Arc<IrNode>>,

    /// Per-node dependency ids, restricted to the reachable set
    dependencies: HashMap<NodeId, Vec<NodeId>>,
}

impl DependencyGraph {
    /// Build the closure of `outputs` over the declared dependency lists of
    /// `nodes`. A shared upstream node is visited once regardless of fan-in.
    pub fn build(outputs: &[NodeId], nodes: &[Arc<IrNode>]) -> Result<Self> {
        Self::build_inner(outputs, &[], nodes)
    }

    /// Build the closure of `outputs`, but stop descending past any node in
    /// `boundary_inputs`, substituting a truncated stand-in (same id, name,
    /// and output type, no dependencies) so the sub-graph can be compiled
    /// standalone. Boundary entries not reachable from `outputs` are
    /// ignored; callers may conservatively over-specify boundaries.
    pub fn build_sub_graph(
        outputs: &[NodeId],
        boundary_inputs: &[NodeId],
        nodes: &[Arc<IrNode>],
    ) -> Result<Self> {
        Self::build_inner(outputs, boundary_inputs, nodes)
    }

    fn build_inner(
        outputs: &[NodeId],
        boundary_inputs: &[NodeId],
        universe: &[Arc<IrNode>],
    ) -> Result<Self> {
        let by_id: HashMap<NodeId, &Arc<IrNode>> =
            universe.iter().map(|node| (node.id, node)).collect();
        let boundary: HashSet<NodeId> = boundary_inputs.iter().copied().collect();

        let mut roots = Vec::new();
        for &id in outputs {
            if !roots.contains(&id) {
                roots.push(id);
            }
        }

        let mut nodes = HashMap::new();
        let mut dependencies = HashMap::new();
        let mut pending: Vec<NodeId> = roots.iter().rev().copied().collect();

        while let Some(id) = pending.pop() {
            if nodes.contains_key(&id) {
                continue;
            }

            let node = *by_id.get(&id).ok_or(CompileError::UnknownOutput(id))?;

            if boundary.contains(&id) {
                nodes.insert(id, Arc::new(IrNode::boundary(node)));
                dependencies.insert(id, Vec::new());
                continue;
            }

            for &dep in &node.dependencies {
                if !by_id.contains_key(&dep) {
                    return Err(CompileError::MissingDependency {
                        node: node.name.clone(),
                        dependency: dep,
                    });
                }
                if !nodes.contains_key(&dep) {
                    pending.push(dep);
                }
            }

            nodes.insert(id, Arc::clone(node));
            dependencies.insert(id, node.dependencies.clone());
        }

        log::debug!(
            "dependency graph closed over {} nodes from {} requested outputs",
            nodes.len(),
            roots.len()
        );

        Ok(Self {
            roots,
            nodes,
            dependencies,
        })
    }

    /// Order the graph so every dependency precedes its dependents.
    ///
    /// The order is the classic discovery-order post-order: a depth-first
    /// walk starting at the roots in caller-supplied order, descending each
    /// node's dependency list left-to-right, emitting a node the first time
    /// all of its dependencies have been emitted. Not numeric-id order and
    /// not Kahn-queue order; those are valid topological orders but do not
    /// reproduce across implementations for graphs with joins.
    ///
    /// Streaming pipelines are feed-forward by construction, so reaching a
    /// node already on the unfinished exploration path is a
    /// program-construction defect reported as [`CompileError::GraphCycle`].
    pub fn topological_sort(&self) -> Result<Vec<Arc<IrNode>>> {
        let mut sorted = Vec::with_capacity(self.nodes.len());
        let mut emitted: HashSet<NodeId> = HashSet::with_capacity(self.nodes.len());
        let mut on_path: HashSet<NodeId> = HashSet::new();

        for &root in &self.roots {
            if emitted.contains(&root) {
                continue;
            }

            // Iterative post-order; each frame tracks the next dependency
            // slot to descend into.
            let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
            on_path.insert(root);

            while let Some((id, slot)) = stack.pop() {
                let deps = self.dependencies_of(id)?;

                if slot < deps.len() {
                    stack.push((id, slot + 1));
                    let dep = deps[slot];

                    if emitted.contains(&dep) {
                        continue;
                    }
                    if on_path.contains(&dep) {
                        return Err(CompileError::GraphCycle(self.node(dep)?.name.clone()));
                    }

                    on_path.insert(dep);
                    stack.push((dep, 0));
                } else {
                    sorted.push(Arc::clone(self.node(id)?));
                    emitted.insert(id);
                    on_path.remove(&id);
                }
            }
        }

        Ok(sorted)
    }

    /// Requested outputs in caller order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> Result<&Arc<IrNode>> {
        self.nodes.get(&id).ok_or(CompileError::UnknownOutput(id))
    }

    /// Dependency ids of a node, restricted to the reachable set
    pub fn dependencies_of(&self, id: NodeId) -> Result<&[NodeId]> {
        self.dependencies
            .get(&id)
            .map(Vec::as_slice)
            .ok_or(CompileError::UnknownOutput(id))
    }

    /// All reachable nodes, in no particular order
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<IrNode>> {
        self.nodes.values()
    }

    /// Whether a node id is in the reachable set
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of reachable nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
