//! Post-operation invariant checkers for correctness validation.

use std::collections::{BTreeSet, HashMap};

use moorepath_core::{
    CostGraph, EdgeId, EdgeRecord, GraphKind, NO_EDGE, OutputRow, SearchResult, VertexId,
};
use petgraph::algo::bellman_ford;
use petgraph::graph::{DiGraph, NodeIndex};

/// Tolerance for comparing accumulated costs.
const EPSILON: f64 = 1e-9;

/// Verifies graph construction invariants.
pub fn check_graph_invariants(edges: &[EdgeRecord], graph: &CostGraph) -> Result<(), String> {
    let endpoints: BTreeSet<VertexId> = edges.iter().flat_map(|e| [e.source, e.target]).collect();
    if graph.vertex_count() != endpoints.len() {
        return Err(format!(
            "vertex count mismatch: graph={}, distinct endpoints={}",
            graph.vertex_count(),
            endpoints.len()
        ));
    }
    let expected_arcs = match graph.kind() {
        GraphKind::Directed => edges.len(),
        GraphKind::Undirected => edges.len() * 2,
    };
    if graph.arc_count() != expected_arcs {
        return Err(format!(
            "arc count mismatch: graph={}, expected={expected_arcs}",
            graph.arc_count()
        ));
    }
    for id in &endpoints {
        if graph.node_index(*id).is_none() {
            return Err(format!("vertex {id} not found in graph index"));
        }
    }
    Ok(())
}

/// Verifies every label of `search` against `petgraph::algo::bellman_ford`
/// run on the same arcs.
pub fn check_distances_match_reference(
    graph: &CostGraph,
    search: &SearchResult,
) -> Result<(), String> {
    let Some(src) = search.source_index() else {
        return Err(format!("source {} is not a graph vertex", search.source()));
    };

    let mut reference: DiGraph<(), f64> =
        DiGraph::with_capacity(graph.vertex_count(), graph.arc_count());
    for _ in 0..graph.vertex_count() {
        reference.add_node(());
    }
    for (from, to, _, cost) in graph.arcs() {
        reference.add_edge(
            NodeIndex::new(from.index()),
            NodeIndex::new(to.index()),
            cost,
        );
    }

    let expected = bellman_ford(&reference, NodeIndex::new(src.index()))
        .map_err(|_| "reference solver found a negative cycle".to_owned())?;

    for (i, want) in expected.distances.iter().enumerate() {
        let got = search.distance(NodeIndex::new(i));
        if !same_cost(got, *want) {
            return Err(format!("distance mismatch at index {i}: got {got}, want {want}"));
        }
    }
    Ok(())
}

/// Verifies the layout of flattened rows:
/// - `seq` counts from 1 without gaps
/// - `path_id` starts at 1 or above and increases between paths; skipped
///   unreachable pairs leave gaps
/// - `path_seq` restarts at 1 for every path
/// - each path ends at its `end_vid`
/// - every traversed edge exists, joins the previous vertex to `node`, and
///   `agg_cost` accumulates `cost`
pub fn check_rows(
    edges: &[EdgeRecord],
    kind: GraphKind,
    rows: &[OutputRow],
) -> Result<(), String> {
    let by_id: HashMap<EdgeId, &EdgeRecord> = edges.iter().map(|e| (e.id, e)).collect();

    let mut path_id = 0;
    let mut previous: Option<&OutputRow> = None;
    for (i, row) in rows.iter().enumerate() {
        if row.seq != i + 1 {
            return Err(format!("row {i}: seq {} out of order", row.seq));
        }

        let continues = previous.is_some_and(|p| p.path_id == row.path_id);
        if continues {
            let prev = previous.map_or(0, |p| p.path_seq);
            if row.path_seq != prev + 1 {
                return Err(format!("row {}: path_seq {} after {prev}", row.seq, row.path_seq));
            }
        } else {
            if let Some(prev) = previous {
                check_path_end(prev)?;
            }
            if row.path_id <= path_id || row.path_seq != 1 {
                return Err(format!(
                    "row {}: path starts as ({}, {}) after path {path_id}",
                    row.seq, row.path_id, row.path_seq
                ));
            }
            path_id = row.path_id;
        }

        if row.edge != NO_EDGE {
            let from = if continues {
                previous.map_or(row.start_vid, |p| p.node)
            } else {
                row.start_vid
            };
            check_step(&by_id, kind, from, row)?;
            let before = if continues {
                previous.map_or(0.0, |p| p.agg_cost)
            } else {
                0.0
            };
            if !same_cost(before + row.cost, row.agg_cost) {
                return Err(format!(
                    "row {}: agg_cost {} != {before} + {}",
                    row.seq, row.agg_cost, row.cost
                ));
            }
        }
        previous = Some(row);
    }
    match previous {
        Some(last) => check_path_end(last),
        None => Ok(()),
    }
}

fn check_path_end(row: &OutputRow) -> Result<(), String> {
    if row.node != row.end_vid {
        return Err(format!(
            "row {}: path {} ends at {} instead of {}",
            row.seq, row.path_id, row.node, row.end_vid
        ));
    }
    Ok(())
}

fn check_step(
    by_id: &HashMap<EdgeId, &EdgeRecord>,
    kind: GraphKind,
    from: VertexId,
    row: &OutputRow,
) -> Result<(), String> {
    let Some(edge) = by_id.get(&row.edge) else {
        return Err(format!("row {}: unknown edge {}", row.seq, row.edge));
    };
    let forward = edge.source == from && edge.target == row.node && same_cost(edge.cost, row.cost);
    let backward = kind == GraphKind::Undirected
        && edge.target == from
        && edge.source == row.node
        && same_cost(edge.undirected_reverse_cost(), row.cost);
    if forward || backward {
        Ok(())
    } else {
        Err(format!(
            "row {}: edge {} does not lead from {from} to {} at cost {}",
            row.seq, row.edge, row.node, row.cost
        ))
    }
}

/// Total cost of every path in `rows`, keyed by `(start_vid, end_vid)`.
pub fn path_totals(rows: &[OutputRow]) -> Vec<((VertexId, VertexId), f64)> {
    let mut totals: Vec<((VertexId, VertexId), f64)> = Vec::new();
    for pair in rows.chunk_by(|a, b| a.path_id == b.path_id) {
        if let Some(last) = pair.last() {
            totals.push(((last.start_vid, last.end_vid), last.agg_cost));
        }
    }
    totals
}

/// Verifies that two row sets describe the same pairs at the same costs.
///
/// Paths of equal cost may differ, so only totals are compared.
pub fn check_same_totals(left: &[OutputRow], right: &[OutputRow]) -> Result<(), String> {
    let a = path_totals(left);
    let b = path_totals(right);
    if a.len() != b.len() {
        return Err(format!("path count mismatch: {} vs {}", a.len(), b.len()));
    }
    for ((pair_a, cost_a), (pair_b, cost_b)) in a.iter().zip(&b) {
        if pair_a != pair_b || !same_cost(*cost_a, *cost_b) {
            return Err(format!(
                "path mismatch: {pair_a:?} at {cost_a} vs {pair_b:?} at {cost_b}"
            ));
        }
    }
    Ok(())
}

fn same_cost(a: f64, b: f64) -> bool {
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= EPSILON
}
