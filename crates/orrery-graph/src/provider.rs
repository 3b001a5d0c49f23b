//! The [`GraphProvider`] seam and bundled reference providers.
//!
//! Graph construction is delegated outward: the network engine only
//! asks a provider for a [`Topology`] once, at construction. The
//! providers here cover the demo network (Zachary's karate club) and
//! two parametric families useful in tests.

use crate::error::GraphError;
use crate::topology::Topology;

/// External collaborator that supplies a fixed graph topology.
///
/// Implementations must be deterministic: repeated `build` calls
/// return the same wiring.
pub trait GraphProvider {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Construct the topology.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] when the provider's edge data is
    /// internally inconsistent.
    fn build(&self) -> Result<Topology, GraphError>;
}

/// Zachary's karate club network: 34 nodes, 78 undirected edges.
///
/// The classic small social network used in the coupled-oscillator
/// demo. Its algebraic connectivity is λ₂ ≈ 0.4685, so linear
/// coupling with `b - a·λ₂ < 0` (e.g. `a = 2.0`, `b = 0.9`)
/// synchronizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct KarateClub;

/// Edge list of Zachary's karate club (0-indexed).
const KARATE_EDGES: [(usize, usize); 78] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (0, 5),
    (0, 6),
    (0, 7),
    (0, 8),
    (0, 10),
    (0, 11),
    (0, 12),
    (0, 13),
    (0, 17),
    (0, 19),
    (0, 21),
    (0, 31),
    (1, 2),
    (1, 3),
    (1, 7),
    (1, 13),
    (1, 17),
    (1, 19),
    (1, 21),
    (1, 30),
    (2, 3),
    (2, 7),
    (2, 8),
    (2, 9),
    (2, 13),
    (2, 27),
    (2, 28),
    (2, 32),
    (3, 7),
    (3, 12),
    (3, 13),
    (4, 6),
    (4, 10),
    (5, 6),
    (5, 10),
    (5, 16),
    (6, 16),
    (8, 30),
    (8, 32),
    (8, 33),
    (9, 33),
    (13, 33),
    (14, 32),
    (14, 33),
    (15, 32),
    (15, 33),
    (18, 32),
    (18, 33),
    (19, 33),
    (20, 32),
    (20, 33),
    (22, 32),
    (22, 33),
    (23, 25),
    (23, 27),
    (23, 29),
    (23, 32),
    (23, 33),
    (24, 25),
    (24, 27),
    (24, 31),
    (25, 31),
    (26, 29),
    (26, 33),
    (27, 33),
    (28, 31),
    (28, 33),
    (29, 32),
    (29, 33),
    (30, 32),
    (30, 33),
    (31, 32),
    (31, 33),
    (32, 33),
];

impl GraphProvider for KarateClub {
    fn name(&self) -> &str {
        "karate_club"
    }

    fn build(&self) -> Result<Topology, GraphError> {
        Topology::from_edges(34, &KARATE_EDGES)
    }
}

/// A cycle of `n` nodes: node `i` is adjacent to `i ± 1 (mod n)`.
#[derive(Debug, Clone, Copy)]
pub struct CycleGraph {
    /// Number of nodes. Must be at least 3 for a simple cycle.
    pub n: usize,
}

impl GraphProvider for CycleGraph {
    fn name(&self) -> &str {
        "cycle"
    }

    fn build(&self) -> Result<Topology, GraphError> {
        if self.n < 3 {
            return Err(GraphError::EmptyGraph);
        }
        let edges: Vec<(usize, usize)> = (0..self.n).map(|i| (i, (i + 1) % self.n)).collect();
        Topology::from_edges(self.n, &edges)
    }
}

/// The complete graph on `n` nodes.
#[derive(Debug, Clone, Copy)]
pub struct CompleteGraph {
    /// Number of nodes.
    pub n: usize,
}

impl GraphProvider for CompleteGraph {
    fn name(&self) -> &str {
        "complete"
    }

    fn build(&self) -> Result<Topology, GraphError> {
        let mut edges = Vec::with_capacity(self.n.saturating_sub(1) * self.n / 2);
        for a in 0..self.n {
            for b in (a + 1)..self.n {
                edges.push((a, b));
            }
        }
        Topology::from_edges(self.n, &edges)
    }
}
