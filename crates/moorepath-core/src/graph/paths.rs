/// Path reconstruction from a [`SearchResult`]'s predecessor chains.
///
/// A reconstructed [`Path`] lists the steps from source to target; each step
/// names the vertex it reaches, the edge it traverses, its cost and the
/// running total. Two zero-step outcomes are distinguished by their
/// endpoints: `source == target` is the trivial path, anything else means the
/// target is unreachable.
use thiserror::Error;

use crate::graph::CostGraph;
use crate::graph::solver::SearchResult;
use crate::records::{EdgeId, VertexId};

/// Errors produced by [`reconstruct`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructError {
    /// Following predecessors from `target` did not lead back to `source`
    /// within `|V|` hops.
    #[error("predecessor chain from {target} does not lead back to source {source_vid}")]
    BrokenChain {
        /// Source of the search.
        source_vid: VertexId,
        /// Target whose chain was being followed.
        target: VertexId,
    },
}

/// One step of a reconstructed path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    /// Vertex reached by this step.
    pub node: VertexId,
    /// Edge traversed.
    pub edge: EdgeId,
    /// Cost of the traversed arc.
    pub cost: f64,
    /// Cost from the source up to and including this step.
    pub agg_cost: f64,
}

/// Shortest path for one `(source, target)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Start vertex.
    pub source: VertexId,
    /// End vertex.
    pub target: VertexId,
    /// Steps in source-to-target order.
    pub steps: Vec<PathStep>,
}

impl Path {
    /// Returns `true` for the zero-step path of a self-pair.
    pub fn is_trivial(&self) -> bool {
        self.steps.is_empty() && self.source == self.target
    }

    /// Returns `true` when no path from source to target exists.
    pub fn is_unreachable(&self) -> bool {
        self.steps.is_empty() && self.source != self.target
    }

    /// Total cost: the final aggregate, 0 for the trivial path, infinite when
    /// unreachable.
    pub fn total_cost(&self) -> f64 {
        match self.steps.last() {
            Some(step) => step.agg_cost,
            None if self.source == self.target => 0.0,
            None => f64::INFINITY,
        }
    }

    /// Vertices visited, source first. Empty when unreachable.
    pub fn vertices(&self) -> Vec<VertexId> {
        if self.is_unreachable() {
            return Vec::new();
        }
        std::iter::once(self.source)
            .chain(self.steps.iter().map(|s| s.node))
            .collect()
    }
}

/// Materializes the shortest path from `search.source()` to `target`.
///
/// # Errors
///
/// Returns [`ReconstructError::BrokenChain`] if the predecessor chain of a
/// reached target is cut short or longer than the vertex count. Neither can
/// happen for a search that converged.
pub fn reconstruct(
    graph: &CostGraph,
    search: &SearchResult,
    target: VertexId,
) -> Result<Path, ReconstructError> {
    let source = search.source();
    let unreachable = Path {
        source,
        target,
        steps: Vec::new(),
    };

    if source == target {
        return Ok(unreachable);
    }
    let (Some(src), Some(dst)) = (search.source_index(), graph.node_index(target)) else {
        return Ok(unreachable);
    };
    if search.distance(dst) == f64::INFINITY {
        return Ok(unreachable);
    }

    let broken = || ReconstructError::BrokenChain {
        source_vid: source,
        target,
    };
    let mut reversed: Vec<(VertexId, EdgeId, f64)> = Vec::new();
    let mut current = dst;

    while current != src {
        if reversed.len() >= graph.vertex_count() {
            return Err(broken());
        }
        let pred = search.predecessor(current).ok_or_else(broken)?;
        let node = graph.vertex_id(current).ok_or_else(broken)?;
        reversed.push((node, pred.edge_id, pred.cost));
        current = pred.node;
    }

    let mut agg_cost = 0.0;
    let steps = reversed
        .into_iter()
        .rev()
        .map(|(node, edge, cost)| {
            agg_cost += cost;
            PathStep {
                node,
                edge,
                cost,
                agg_cost,
            }
        })
        .collect();

    Ok(Path {
        source,
        target,
        steps,
    })
}
