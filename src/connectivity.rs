//! Graph view of a truss used to explain unsolvable models.
//!
//! A reduced stiffness matrix is singular either because supports leave a
//! rigid-body motion or mechanism free, or because part of the structure is
//! not attached to the rest. The second case shows up directly in the element
//! graph, so it is reported alongside [`SolveError::SingularSystem`].
//!
//! [`SolveError::SingularSystem`]: crate::SolveError::SingularSystem

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::problem::TrussProblem;

/// Undirected node/element graph of a truss.
#[derive(Debug)]
pub struct Connectivity {
    /// Nodes are truss nodes in input order, edges carry the zero-based element index.
    graph: UnGraph<(), usize>,
}

impl Connectivity {
    /// Build the graph from a problem whose element references are valid.
    #[must_use]
    pub fn of(problem: &TrussProblem) -> Self {
        let mut graph = UnGraph::with_capacity(problem.node_count(), problem.element_count());
        for _ in &problem.nodes {
            graph.add_node(());
        }
        for (index, element) in problem.elements.iter().enumerate() {
            graph.add_edge(
                NodeIndex::new(element.start - 1),
                NodeIndex::new(element.end - 1),
                index,
            );
        }
        Self { graph }
    }

    /// Number of connected pieces, counting unconnected nodes individually.
    #[must_use]
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    /// One-based numbers of nodes that no element touches.
    #[must_use]
    pub fn unconnected_nodes(&self) -> Vec<usize> {
        self.graph
            .node_indices()
            .filter(|&node| self.graph.neighbors(node).next().is_none())
            .map(|node| node.index() + 1)
            .collect()
    }
}
