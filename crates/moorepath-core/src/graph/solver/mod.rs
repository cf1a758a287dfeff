/// Single-source label-correcting relaxation with negative-cycle detection.
///
/// Both strategies compute, for one source vertex, the shortest distance and
/// the last arc of a shortest path to every vertex of a [`CostGraph`]. They
/// tolerate negative arc costs and refuse to produce labels when a
/// negative-cost cycle is reachable from the source, since predecessor chains
/// through such a cycle never terminate.
///
/// # Strategies
///
/// - [`Relaxation::Sweep`]: Bellman-Ford. Up to `|V| - 1` passes over every
///   arc in insertion order, stopping early at a fixed point, followed by one
///   verification pass. Arc order makes tie-breaking between equal-cost paths
///   deterministic: the first arc to reach a label keeps it.
/// - [`Relaxation::Queue`]: Moore's FIFO variant. Only vertices whose label
///   improved are rescanned. A label reached through `|V|` or more arcs proves
///   a negative cycle.
///
/// # Complexity
///
/// O(V·E) per source in the worst case for both strategies. Running each
/// distinct source once and sharing its [`SearchResult`] across every target
/// paired with it is what keeps multi-pair queries affordable; see
/// [`solve_all`].
use std::collections::VecDeque;

use petgraph::stable_graph::NodeIndex;
use thiserror::Error;

use crate::combinations::PairSet;
use crate::graph::CostGraph;
use crate::records::{EdgeId, VertexId};

#[cfg(test)]
mod tests;

/// Relaxation strategy used by [`solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Relaxation {
    /// Bellman-Ford passes over the full arc list.
    #[default]
    Sweep,
    /// Moore's FIFO queue of improved vertices.
    Queue,
}

/// Errors produced by the solver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// A cycle of negative total cost is reachable from `source_vid`.
    #[error("negative cycle reachable from source {source_vid}")]
    NegativeCycle {
        /// The source whose relaxation failed to converge.
        source_vid: VertexId,
    },
}

/// Last arc on the best known path to a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Predecessor {
    /// Tail of the arc.
    pub node: NodeIndex,
    /// Input edge the arc was built from.
    pub edge_id: EdgeId,
    /// Cost of the arc.
    pub cost: f64,
}

/// Distances and predecessors from one source to every vertex.
///
/// Vectors are indexed by `NodeIndex::index()`. Unreached vertices have an
/// infinite distance and no predecessor.
#[derive(Debug, Clone)]
pub struct SearchResult {
    source: VertexId,
    source_index: Option<NodeIndex>,
    distance: Vec<f64>,
    predecessor: Vec<Option<Predecessor>>,
    rounds: usize,
}

impl SearchResult {
    fn unreached(source: VertexId, source_index: Option<NodeIndex>, n: usize) -> Self {
        Self {
            source,
            source_index,
            distance: vec![f64::INFINITY; n],
            predecessor: vec![None; n],
            rounds: 0,
        }
    }

    /// The source vertex id.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Index of the source, or `None` when it is not a graph vertex.
    pub fn source_index(&self) -> Option<NodeIndex> {
        self.source_index
    }

    /// Shortest distance to `idx`; infinite when unreached.
    pub fn distance(&self, idx: NodeIndex) -> f64 {
        self.distance
            .get(idx.index())
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Shortest distance to vertex `target`, or `None` when it is unreached
    /// or not in `graph`.
    pub fn distance_to(&self, graph: &CostGraph, target: VertexId) -> Option<f64> {
        let idx = graph.node_index(target)?;
        let d = self.distance(idx);
        (d < f64::INFINITY).then_some(d)
    }

    /// Last arc of the shortest path to `idx`.
    pub fn predecessor(&self, idx: NodeIndex) -> Option<&Predecessor> {
        self.predecessor.get(idx.index()).and_then(Option::as_ref)
    }

    /// Number of vertices carrying a label.
    pub fn reached_count(&self) -> usize {
        self.distance.iter().filter(|&&d| d < f64::INFINITY).count()
    }

    /// Full passes (sweep) or vertex scans (queue) performed, excluding the
    /// verification pass.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

/// Computes shortest distances from `source` to every vertex of `graph`.
///
/// A `source` that is not a vertex of the graph reaches nothing; this is not
/// an error.
///
/// # Errors
///
/// Returns [`SolveError::NegativeCycle`] if a negative-cost cycle is
/// reachable from `source`.
pub fn solve(
    graph: &CostGraph,
    source: VertexId,
    relaxation: Relaxation,
) -> Result<SearchResult, SolveError> {
    let n = graph.vertex_count();
    let Some(src) = graph.node_index(source) else {
        tracing::trace!(source, "source is not a graph vertex");
        return Ok(SearchResult::unreached(source, None, n));
    };

    let mut result = SearchResult::unreached(source, Some(src), n);
    result.distance[src.index()] = 0.0;

    let converged = match relaxation {
        Relaxation::Sweep => sweep(graph, &mut result),
        Relaxation::Queue => scan_queue(graph, src, &mut result),
    };

    if !converged {
        tracing::warn!(source, ?relaxation, "negative cycle reachable from source");
        return Err(SolveError::NegativeCycle { source_vid: source });
    }

    tracing::trace!(
        source,
        rounds = result.rounds,
        reached = result.reached_count(),
        "relaxation converged"
    );
    Ok(result)
}

/// Solves every distinct source of `pairs`, in ascending source order.
///
/// With the `parallel` feature the sources are relaxed concurrently; each
/// relaxation owns its labels and only reads the graph.
///
/// # Errors
///
/// Returns the [`SolveError`] of a source whose relaxation failed. Without
/// the `parallel` feature this is the smallest such source.
pub fn solve_all(
    graph: &CostGraph,
    pairs: &PairSet,
    relaxation: Relaxation,
) -> Result<Vec<SearchResult>, SolveError> {
    let sources: Vec<VertexId> = pairs.sources().collect();
    solve_each(graph, &sources, relaxation)
}

#[cfg(feature = "parallel")]
fn solve_each(
    graph: &CostGraph,
    sources: &[VertexId],
    relaxation: Relaxation,
) -> Result<Vec<SearchResult>, SolveError> {
    use rayon::prelude::*;
    sources
        .par_iter()
        .map(|&source| solve(graph, source, relaxation))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn solve_each(
    graph: &CostGraph,
    sources: &[VertexId],
    relaxation: Relaxation,
) -> Result<Vec<SearchResult>, SolveError> {
    sources
        .iter()
        .map(|&source| solve(graph, source, relaxation))
        .collect()
}

/// Bellman-Ford passes. Returns `false` when the verification pass still
/// finds an improvable arc.
fn sweep(graph: &CostGraph, result: &mut SearchResult) -> bool {
    let arcs: Vec<(NodeIndex, NodeIndex, EdgeId, f64)> = graph.arcs().collect();
    let n = graph.vertex_count();

    for _ in 1..n {
        result.rounds += 1;
        let mut updated = false;
        for &(tail, head, edge_id, cost) in &arcs {
            let from = result.distance[tail.index()];
            if from == f64::INFINITY {
                continue;
            }
            let candidate = from + cost;
            if candidate < result.distance[head.index()] {
                result.distance[head.index()] = candidate;
                result.predecessor[head.index()] = Some(Predecessor {
                    node: tail,
                    edge_id,
                    cost,
                });
                updated = true;
            }
        }
        if !updated {
            break;
        }
    }

    arcs.iter().all(|&(tail, head, _, cost)| {
        let from = result.distance[tail.index()];
        from == f64::INFINITY || from + cost >= result.distance[head.index()]
    })
}

/// Moore's FIFO relaxation. Returns `false` as soon as a label is improved
/// through `|V|` or more arcs.
fn scan_queue(graph: &CostGraph, src: NodeIndex, result: &mut SearchResult) -> bool {
    let n = graph.vertex_count();
    let mut queued = vec![false; n];
    let mut hops = vec![0usize; n];
    let mut queue: VecDeque<NodeIndex> = VecDeque::with_capacity(n);

    queue.push_back(src);
    queued[src.index()] = true;

    while let Some(tail) = queue.pop_front() {
        queued[tail.index()] = false;
        result.rounds += 1;
        let from = result.distance[tail.index()];

        for (head, edge_id, cost) in graph.arcs_from(tail) {
            let candidate = from + cost;
            if candidate < result.distance[head.index()] {
                result.distance[head.index()] = candidate;
                result.predecessor[head.index()] = Some(Predecessor {
                    node: tail,
                    edge_id,
                    cost,
                });
                hops[head.index()] = hops[tail.index()] + 1;
                if hops[head.index()] >= n {
                    return false;
                }
                if !queued[head.index()] {
                    queued[head.index()] = true;
                    queue.push_back(head);
                }
            }
        }
    }

    true
}
