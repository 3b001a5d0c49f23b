//! Error types for topology construction.

use std::fmt;

/// Errors arising from graph topology construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// Attempted to construct a topology with zero nodes.
    EmptyGraph,
    /// An edge endpoint refers to a node outside the node set.
    NodeOutOfRange {
        /// The offending node index.
        node: usize,
        /// The number of nodes in the topology.
        node_count: usize,
    },
    /// An edge connects a node to itself.
    SelfLoop {
        /// The looping node.
        node: usize,
    },
    /// The same undirected edge was supplied twice.
    DuplicateEdge {
        /// One endpoint.
        a: usize,
        /// The other endpoint.
        b: usize,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGraph => write!(f, "topology must have at least one node"),
            Self::NodeOutOfRange { node, node_count } => {
                write!(f, "edge endpoint {node} out of range for {node_count} nodes")
            }
            Self::SelfLoop { node } => write!(f, "self-loop on node {node}"),
            Self::DuplicateEdge { a, b } => write!(f, "duplicate edge ({a}, {b})"),
        }
    }
}

impl std::error::Error for GraphError {}
