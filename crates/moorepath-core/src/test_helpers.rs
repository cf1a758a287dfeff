use crate::records::{EdgeId, EdgeRecord, VertexId};

pub fn edge(id: EdgeId, source: VertexId, target: VertexId, cost: f64) -> EdgeRecord {
    EdgeRecord::new(id, source, target, cost)
}

/// `1 -> 2 (1)`, `2 -> 3 (2)`, `1 -> 3 (5)`.
pub fn sample_edges() -> Vec<EdgeRecord> {
    vec![edge(1, 1, 2, 1.0), edge(2, 2, 3, 2.0), edge(3, 1, 3, 5.0)]
}

/// `1 -> 2 (1)`, `2 -> 3 (-1)`, `3 -> 2 (-1)`.
pub fn negative_cycle_edges() -> Vec<EdgeRecord> {
    vec![edge(1, 1, 2, 1.0), edge(2, 2, 3, -1.0), edge(3, 3, 2, -1.0)]
}
