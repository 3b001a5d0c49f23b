//! Immutable graph topology with per-node adjacency lists.

use crate::error::GraphError;

/// An immutable undirected graph topology.
///
/// Built once from an edge list, then shared read-only (typically
/// behind an `Arc`) across every snapshot of a network run. Neighbour
/// lists are kept sorted so iteration order is deterministic.
///
/// # Examples
///
/// ```
/// use orrery_graph::Topology;
///
/// let t = Topology::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
/// assert_eq!(t.node_count(), 3);
/// assert_eq!(t.neighbours(1), &[0, 2]);
/// assert_eq!(t.degree(0), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Topology {
    /// Build a topology from `node_count` nodes and an undirected
    /// edge list.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyGraph`] for zero nodes,
    /// [`GraphError::NodeOutOfRange`] for an endpoint `>= node_count`,
    /// [`GraphError::SelfLoop`] for an edge `(i, i)`, and
    /// [`GraphError::DuplicateEdge`] when the same undirected edge
    /// appears twice.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        if node_count == 0 {
            return Err(GraphError::EmptyGraph);
        }
        let mut adjacency = vec![Vec::new(); node_count];
        for &(a, b) in edges {
            for node in [a, b] {
                if node >= node_count {
                    return Err(GraphError::NodeOutOfRange { node, node_count });
                }
            }
            if a == b {
                return Err(GraphError::SelfLoop { node: a });
            }
            if adjacency[a].contains(&b) {
                return Err(GraphError::DuplicateEdge { a, b });
            }
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }
        Ok(Self {
            adjacency,
            edge_count: edges.len(),
        })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// The sorted neighbour set of node `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= node_count()`; node indices come from
    /// iteration over the topology itself.
    pub fn neighbours(&self, i: usize) -> &[usize] {
        &self.adjacency[i]
    }

    /// Degree of node `i`.
    pub fn degree(&self, i: usize) -> usize {
        self.adjacency[i].len()
    }

    /// Iterate over node indices.
    pub fn nodes(&self) -> impl Iterator<Item = usize> {
        0..self.adjacency.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_edges_builds_sorted_adjacency() {
        let t = Topology::from_edges(4, &[(2, 0), (0, 1), (3, 0)]).unwrap();
        assert_eq!(t.neighbours(0), &[1, 2, 3]);
        assert_eq!(t.neighbours(2), &[0]);
        assert_eq!(t.edge_count(), 3);
    }

    #[test]
    fn rejects_empty_graph() {
        assert_eq!(Topology::from_edges(0, &[]), Err(GraphError::EmptyGraph));
    }

    #[test]
    fn rejects_out_of_range_endpoint() {
        assert_eq!(
            Topology::from_edges(2, &[(0, 2)]),
            Err(GraphError::NodeOutOfRange {
                node: 2,
                node_count: 2,
            })
        );
    }

    #[test]
    fn rejects_self_loop() {
        assert_eq!(
            Topology::from_edges(2, &[(1, 1)]),
            Err(GraphError::SelfLoop { node: 1 })
        );
    }

    #[test]
    fn rejects_duplicate_edge() {
        assert_eq!(
            Topology::from_edges(3, &[(0, 1), (1, 0)]),
            Err(GraphError::DuplicateEdge { a: 1, b: 0 })
        );
    }

    #[test]
    fn isolated_nodes_have_empty_neighbourhoods() {
        let t = Topology::from_edges(3, &[(0, 1)]).unwrap();
        assert_eq!(t.degree(2), 0);
        assert_eq!(t.neighbours(2), &[] as &[usize]);
    }

    proptest! {
        #[test]
        fn arbitrary_valid_edge_lists_build_symmetric_adjacency(
            n in 2usize..12,
            // One flag per unordered pair; 11 nodes need at most 55.
            mask in prop::collection::vec(any::<bool>(), 66),
        ) {
            let mut edges = Vec::new();
            let mut pair = 0;
            for a in 0..n {
                for b in (a + 1)..n {
                    if mask[pair] {
                        edges.push((a, b));
                    }
                    pair += 1;
                }
            }
            let t = Topology::from_edges(n, &edges).unwrap();
            prop_assert_eq!(t.edge_count(), edges.len());
            let degree_sum: usize = t.nodes().map(|i| t.degree(i)).sum();
            prop_assert_eq!(degree_sum, 2 * edges.len());
            for i in t.nodes() {
                for &j in t.neighbours(i) {
                    prop_assert!(
                        t.neighbours(j).contains(&i),
                        "asymmetric edge ({}, {})", i, j
                    );
                }
            }
        }
    }
}
