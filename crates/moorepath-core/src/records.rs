/// Plain data records exchanged with the engine: input edges, query pairs,
/// and flattened output rows.
///
/// These types carry no behaviour beyond small derived accessors; the graph
/// builder, solver and flattener consume and produce them by value.
use serde::{Deserialize, Serialize};

/// Opaque 64-bit vertex identifier.
pub type VertexId = i64;

/// Opaque 64-bit edge identifier.
pub type EdgeId = i64;

/// Edge id written into rows that do not correspond to a traversed edge
/// (the trivial self-path row and unreachable sentinel rows).
pub const NO_EDGE: EdgeId = -1;

/// Whether an input edge can also be traversed from `target` to `source`
/// with its own cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    /// Only `cost` is given; undirected graphs reuse it for the reverse arc.
    OneWay,
    /// A distinct `reverse_cost` is given for the reverse arc.
    TwoWay,
}

/// One row of the input edge list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Edge identifier, echoed into output rows.
    pub id: EdgeId,
    /// Tail vertex.
    pub source: VertexId,
    /// Head vertex.
    pub target: VertexId,
    /// Cost of traversing `source -> target`. May be negative.
    pub cost: f64,
    /// Cost of traversing `target -> source` in undirected graphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_cost: Option<f64>,
}

impl EdgeRecord {
    /// Creates an edge with no reverse cost.
    pub fn new(id: EdgeId, source: VertexId, target: VertexId, cost: f64) -> Self {
        Self {
            id,
            source,
            target,
            cost,
            reverse_cost: None,
        }
    }

    /// Sets the reverse cost, consuming and returning `self`.
    #[must_use]
    pub fn with_reverse_cost(mut self, reverse_cost: f64) -> Self {
        self.reverse_cost = Some(reverse_cost);
        self
    }

    /// Returns the direction flag derived from the presence of `reverse_cost`.
    pub fn direction(&self) -> EdgeDirection {
        match self.reverse_cost {
            Some(_) => EdgeDirection::TwoWay,
            None => EdgeDirection::OneWay,
        }
    }

    /// Cost of the reverse arc used when building an undirected graph.
    pub fn undirected_reverse_cost(&self) -> f64 {
        self.reverse_cost.unwrap_or(self.cost)
    }
}

/// An explicit `(source, target)` query pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pair {
    /// Start vertex.
    pub source: VertexId,
    /// End vertex.
    pub target: VertexId,
}

impl Pair {
    /// Creates a pair.
    pub fn new(source: VertexId, target: VertexId) -> Self {
        Self { source, target }
    }
}

impl From<(VertexId, VertexId)> for Pair {
    fn from((source, target): (VertexId, VertexId)) -> Self {
        Self { source, target }
    }
}

/// One flattened path step.
///
/// Non-finite costs (the unreachable sentinel) serialize as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    /// 1-based position of the row in the whole result.
    pub seq: usize,
    /// 1-based position of the path this row belongs to.
    pub path_id: usize,
    /// 1-based position of the step within its path.
    pub path_seq: usize,
    /// Source vertex of the path.
    pub start_vid: VertexId,
    /// Target vertex of the path.
    pub end_vid: VertexId,
    /// Vertex reached by this step.
    pub node: VertexId,
    /// Edge traversed by this step, or [`NO_EDGE`].
    pub edge: EdgeId,
    /// Cost of this step.
    pub cost: f64,
    /// Cumulative cost from the source up to and including this step.
    pub agg_cost: f64,
}

impl OutputRow {
    /// Returns `true` for the sentinel row of a queried but unreachable pair.
    pub fn is_unreachable(&self) -> bool {
        self.edge == NO_EDGE && self.agg_cost == f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn direction_follows_reverse_cost_presence() {
        let one_way = EdgeRecord::new(1, 1, 2, 3.0);
        assert_eq!(one_way.direction(), EdgeDirection::OneWay);
        assert_eq!(one_way.undirected_reverse_cost(), 3.0);

        let two_way = one_way.with_reverse_cost(-1.5);
        assert_eq!(two_way.direction(), EdgeDirection::TwoWay);
        assert_eq!(two_way.undirected_reverse_cost(), -1.5);
    }

    #[test]
    fn edge_record_reverse_cost_is_optional_in_json() {
        let edge: EdgeRecord =
            serde_json::from_str(r#"{"id":7,"source":1,"target":2,"cost":-2.5}"#)
                .expect("valid edge");
        assert_eq!(edge, EdgeRecord::new(7, 1, 2, -2.5));
    }

    #[test]
    fn unreachable_row_serializes_costs_as_null() {
        let row = OutputRow {
            seq: 1,
            path_id: 1,
            path_seq: 1,
            start_vid: 3,
            end_vid: 1,
            node: 1,
            edge: NO_EDGE,
            cost: f64::INFINITY,
            agg_cost: f64::INFINITY,
        };
        assert!(row.is_unreachable());
        let json = serde_json::to_value(&row).expect("serializes");
        assert!(json["agg_cost"].is_null());
        assert_eq!(json["edge"], -1);
    }

    #[test]
    fn pair_from_tuple() {
        assert_eq!(Pair::from((4, 5)), Pair::new(4, 5));
    }
}
