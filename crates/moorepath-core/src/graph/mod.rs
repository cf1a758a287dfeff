/// Cost graph construction from an edge list using `petgraph`, plus the
/// shortest-path algorithms that run over it.
///
/// The graph wraps a `StableDiGraph` whose node weights are the caller's
/// [`VertexId`] values and whose edge weights are [`Arc`]s carrying the input
/// edge id and the traversal cost. Undirected input is stored as two directed
/// arcs per edge, so the solver only ever walks outgoing arcs.
///
/// # Construction
///
/// [`build_graph`] runs one pass over the edge list. Vertices are created on
/// first sight, so the vertex set is exactly the set of edge endpoints.
/// Parallel edges between the same pair of vertices are all kept: each one
/// is a distinct route with its own cost.
///
/// # Algorithms
///
/// See the [`solver`] submodule for label-correcting relaxation and the
/// [`paths`] submodule for predecessor-chain reconstruction.
pub mod paths;
pub mod solver;

pub use paths::{Path, PathStep, ReconstructError, reconstruct};
pub use solver::{Relaxation, SearchResult, SolveError, solve, solve_all};

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use thiserror::Error;

use crate::records::{EdgeId, EdgeRecord, VertexId};

/// Whether edges are one-way or traversable in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKind {
    /// Each edge yields a single `source -> target` arc.
    Directed,
    /// Each edge yields `source -> target` and `target -> source` arcs.
    Undirected,
}

impl GraphKind {
    /// Maps the boolean `directed` flag used by callers to a kind.
    pub fn from_directed(directed: bool) -> Self {
        if directed {
            GraphKind::Directed
        } else {
            GraphKind::Undirected
        }
    }
}

/// Weight stored on each petgraph edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    /// Id of the input edge this arc was created from. Both arcs of an
    /// undirected edge share it.
    pub edge_id: EdgeId,
    /// Traversal cost of this arc.
    pub cost: f64,
}

/// Errors that can occur while building a [`CostGraph`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphBuildError {
    /// The edge list was empty.
    #[error("no edges to build a graph from")]
    EmptyGraph,
    /// An edge carries a NaN or infinite cost.
    #[error("edge {edge_id} has a non-finite cost")]
    NonFiniteCost {
        /// Id of the offending edge.
        edge_id: EdgeId,
    },
}

/// A directed multigraph of weighted arcs keyed by caller vertex ids.
///
/// Indices are dense: nodes and arcs are never removed, so
/// `NodeIndex::index()` is always below [`CostGraph::vertex_count`].
#[derive(Debug)]
pub struct CostGraph {
    graph: StableDiGraph<VertexId, Arc>,
    id_to_index: HashMap<VertexId, NodeIndex>,
    kind: GraphKind,
}

impl CostGraph {
    /// Number of distinct vertices.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed arcs (twice the edge count for undirected graphs).
    pub fn arc_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The kind this graph was built as.
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Looks up the [`NodeIndex`] of a vertex id.
    pub fn node_index(&self, id: VertexId) -> Option<NodeIndex> {
        self.id_to_index.get(&id).copied()
    }

    /// Returns the vertex id stored at `idx`.
    pub fn vertex_id(&self, idx: NodeIndex) -> Option<VertexId> {
        self.graph.node_weight(idx).copied()
    }

    /// Outgoing arcs of `node` as `(head, edge_id, cost)`.
    pub fn arcs_from(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (NodeIndex, EdgeId, f64)> + '_ {
        self.graph
            .edges(node)
            .map(|e| (e.target(), e.weight().edge_id, e.weight().cost))
    }

    /// Every arc as `(tail, head, edge_id, cost)`, in insertion order.
    pub fn arcs(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, EdgeId, f64)> + '_ {
        self.graph.edge_indices().filter_map(|idx| {
            let (tail, head) = self.graph.edge_endpoints(idx)?;
            let arc = self.graph.edge_weight(idx)?;
            Some((tail, head, arc.edge_id, arc.cost))
        })
    }

    /// Summary counts used by `inspect`-style reporting.
    pub fn stats(&self) -> GraphStats {
        let mut negative_arcs = 0;
        let mut min_cost = f64::INFINITY;
        let mut max_cost = f64::NEG_INFINITY;
        for (_, _, _, cost) in self.arcs() {
            if cost < 0.0 {
                negative_arcs += 1;
            }
            min_cost = min_cost.min(cost);
            max_cost = max_cost.max(cost);
        }
        GraphStats {
            kind: self.kind,
            vertex_count: self.vertex_count(),
            arc_count: self.arc_count(),
            negative_arcs,
            min_cost,
            max_cost,
        }
    }

    fn vertex(&mut self, id: VertexId) -> NodeIndex {
        if let Some(&idx) = self.id_to_index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id);
        self.id_to_index.insert(id, idx);
        idx
    }
}

/// Size and cost summary of a [`CostGraph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphStats {
    /// Kind the graph was built as.
    pub kind: GraphKind,
    /// Number of distinct vertices.
    pub vertex_count: usize,
    /// Number of directed arcs.
    pub arc_count: usize,
    /// Number of arcs with a negative cost.
    pub negative_arcs: usize,
    /// Smallest arc cost (`+inf` for an arc-less graph).
    pub min_cost: f64,
    /// Largest arc cost (`-inf` for an arc-less graph).
    pub max_cost: f64,
}

/// Constructs a [`CostGraph`] from an edge list.
///
/// Construction is O(E). For [`GraphKind::Directed`] each edge inserts the
/// arc `source -> target` weighted `cost`. For [`GraphKind::Undirected`] it
/// additionally inserts `target -> source` weighted `reverse_cost`, falling
/// back to `cost` when the edge has none.
///
/// # Errors
///
/// - [`GraphBuildError::EmptyGraph`]: `edges` is empty.
/// - [`GraphBuildError::NonFiniteCost`]: a cost used by an arc is NaN or
///   infinite.
pub fn build_graph(edges: &[EdgeRecord], kind: GraphKind) -> Result<CostGraph, GraphBuildError> {
    if edges.is_empty() {
        return Err(GraphBuildError::EmptyGraph);
    }

    let arc_capacity = match kind {
        GraphKind::Directed => edges.len(),
        GraphKind::Undirected => edges.len() * 2,
    };
    let mut graph = CostGraph {
        graph: StableDiGraph::with_capacity(edges.len(), arc_capacity),
        id_to_index: HashMap::with_capacity(edges.len()),
        kind,
    };

    for edge in edges {
        if !edge.cost.is_finite() {
            return Err(GraphBuildError::NonFiniteCost { edge_id: edge.id });
        }
        let tail = graph.vertex(edge.source);
        let head = graph.vertex(edge.target);
        graph.graph.add_edge(
            tail,
            head,
            Arc {
                edge_id: edge.id,
                cost: edge.cost,
            },
        );

        if kind == GraphKind::Undirected {
            let reverse = edge.undirected_reverse_cost();
            if !reverse.is_finite() {
                return Err(GraphBuildError::NonFiniteCost { edge_id: edge.id });
            }
            graph.graph.add_edge(
                head,
                tail,
                Arc {
                    edge_id: edge.id,
                    cost: reverse,
                },
            );
        }
    }

    tracing::debug!(
        vertices = graph.vertex_count(),
        arcs = graph.arc_count(),
        ?kind,
        "built cost graph"
    );

    Ok(graph)
}
