#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use super::*;
use crate::combinations::{Combinations, normalize};
use crate::graph::{GraphKind, build_graph};
use crate::records::EdgeRecord;
use crate::test_helpers::{edge, negative_cycle_edges, sample_edges};

const BOTH: [Relaxation; 2] = [Relaxation::Sweep, Relaxation::Queue];

fn graph(edges: &[EdgeRecord], kind: GraphKind) -> CostGraph {
    build_graph(edges, kind).expect("builds")
}

fn distances(g: &CostGraph, search: &SearchResult, ids: &[VertexId]) -> Vec<Option<f64>> {
    ids.iter().map(|&id| search.distance_to(g, id)).collect()
}

// ---------------------------------------------------------------------------
// Distances
// ---------------------------------------------------------------------------

/// Both strategies find `1 -> 2 -> 3` cheaper than the direct edge.
#[test]
fn test_distances_on_sample_graph() {
    let g = graph(&sample_edges(), GraphKind::Directed);
    for relaxation in BOTH {
        let search = solve(&g, 1, relaxation).expect("converges");
        assert_eq!(
            distances(&g, &search, &[1, 2, 3]),
            vec![Some(0.0), Some(1.0), Some(3.0)],
            "{relaxation:?}"
        );
        assert_eq!(search.reached_count(), 3);
    }
}

/// Negative arcs are fine as long as no cycle is negative.
#[test]
fn test_negative_arcs_without_cycle() {
    let edges = vec![
        edge(1, 1, 2, 4.0),
        edge(2, 1, 3, 5.0),
        edge(3, 3, 2, -3.0),
        edge(4, 2, 4, 1.0),
    ];
    let g = graph(&edges, GraphKind::Directed);
    for relaxation in BOTH {
        let search = solve(&g, 1, relaxation).expect("converges");
        assert_eq!(
            distances(&g, &search, &[2, 3, 4]),
            vec![Some(2.0), Some(5.0), Some(3.0)],
            "{relaxation:?}"
        );
    }
}

/// Vertices behind one-way edges stay unreached.
#[test]
fn test_unreached_vertices_have_no_label() {
    let g = graph(&sample_edges(), GraphKind::Directed);
    for relaxation in BOTH {
        let search = solve(&g, 3, relaxation).expect("converges");
        assert_eq!(search.distance_to(&g, 1), None);
        assert_eq!(search.distance_to(&g, 3), Some(0.0));
        let idx = g.node_index(1).expect("vertex 1");
        assert!(search.predecessor(idx).is_none());
        assert_eq!(search.reached_count(), 1);
    }
}

/// A source outside the graph reaches nothing and is not an error.
#[test]
fn test_source_outside_graph() {
    let g = graph(&sample_edges(), GraphKind::Directed);
    for relaxation in BOTH {
        let search = solve(&g, 42, relaxation).expect("not an error");
        assert_eq!(search.source(), 42);
        assert!(search.source_index().is_none());
        assert_eq!(search.reached_count(), 0);
    }
}

/// Undirected graphs give symmetric distances when no reverse costs differ.
#[test]
fn test_undirected_distances_are_symmetric() {
    let g = graph(&sample_edges(), GraphKind::Undirected);
    for relaxation in BOTH {
        let from_one = solve(&g, 1, relaxation).expect("converges");
        let from_three = solve(&g, 3, relaxation).expect("converges");
        assert_eq!(from_one.distance_to(&g, 3), from_three.distance_to(&g, 1));
        assert_eq!(from_three.distance_to(&g, 1), Some(3.0));
    }
}

// ---------------------------------------------------------------------------
// Negative cycles
// ---------------------------------------------------------------------------

/// A reachable negative cycle fails both strategies with the source id.
#[test]
fn test_negative_cycle_is_detected() {
    let g = graph(&negative_cycle_edges(), GraphKind::Directed);
    for relaxation in BOTH {
        let err = solve(&g, 1, relaxation).expect_err("cycle reachable");
        assert_eq!(err, SolveError::NegativeCycle { source_vid: 1 }, "{relaxation:?}");
    }
}

/// The error names the failing source and has no underlying cause.
#[test]
fn test_negative_cycle_error_message() {
    let err = SolveError::NegativeCycle { source_vid: 42 };
    assert_eq!(err.to_string(), "negative cycle reachable from source 42");
    assert!(std::error::Error::source(&err).is_none());
}

/// A cycle whose labels overflow to negative infinity is still a cycle.
#[test]
fn test_overflowing_negative_cycle_is_detected() {
    let g = graph(
        &[edge(1, 1, 2, -1e308), edge(2, 2, 1, -1e308)],
        GraphKind::Directed,
    );
    for relaxation in BOTH {
        let err = solve(&g, 1, relaxation).expect_err("cycle reachable");
        assert_eq!(err, SolveError::NegativeCycle { source_vid: 1 }, "{relaxation:?}");
    }
}

/// A negative cycle not reachable from the source does not matter.
#[test]
fn test_unreachable_negative_cycle_is_ignored() {
    let mut edges = negative_cycle_edges();
    edges.push(edge(4, 7, 8, 1.0));
    let g = graph(&edges, GraphKind::Directed);
    for relaxation in BOTH {
        let search = solve(&g, 7, relaxation).expect("cycle unreachable");
        assert_eq!(search.distance_to(&g, 8), Some(1.0));
    }
}

/// A negative self-loop is a one-vertex negative cycle.
#[test]
fn test_negative_self_loop() {
    let g = graph(&[edge(1, 5, 5, -0.5)], GraphKind::Directed);
    for relaxation in BOTH {
        assert!(matches!(
            solve(&g, 5, relaxation),
            Err(SolveError::NegativeCycle { source_vid: 5 })
        ));
    }
}

/// A zero-cost cycle converges.
#[test]
fn test_zero_cost_cycle_converges() {
    let edges = vec![edge(1, 1, 2, 1.0), edge(2, 2, 3, 0.0), edge(3, 3, 2, 0.0)];
    let g = graph(&edges, GraphKind::Directed);
    for relaxation in BOTH {
        let search = solve(&g, 1, relaxation).expect("converges");
        assert_eq!(search.distance_to(&g, 3), Some(1.0));
    }
}

/// Undirected edges with negative cost form a two-arc negative cycle.
#[test]
fn test_undirected_negative_edge_is_a_cycle() {
    let g = graph(&[edge(1, 1, 2, -1.0)], GraphKind::Undirected);
    for relaxation in BOTH {
        assert!(solve(&g, 1, relaxation).is_err());
    }
}

// ---------------------------------------------------------------------------
// Bounds and determinism
// ---------------------------------------------------------------------------

/// The sweep never runs more than `|V| - 1` passes.
#[test]
fn test_sweep_pass_bound() {
    // Arcs listed against the path direction force the worst case.
    let edges: Vec<EdgeRecord> = (1..=6).rev().map(|i| edge(i, i, i + 1, 1.0)).collect();
    let g = graph(&edges, GraphKind::Directed);
    let search = solve(&g, 1, Relaxation::Sweep).expect("converges");
    assert!(search.rounds() <= g.vertex_count() - 1);
    assert_eq!(search.distance_to(&g, 7), Some(6.0));
}

/// The sweep stops early once nothing changes.
#[test]
fn test_sweep_stops_at_fixed_point() {
    let edges: Vec<EdgeRecord> = (1..=6).map(|i| edge(i, i, i + 1, 1.0)).collect();
    let g = graph(&edges, GraphKind::Directed);
    let search = solve(&g, 1, Relaxation::Sweep).expect("converges");
    assert_eq!(search.rounds(), 2);
}

/// Equal-cost routes resolve to the same predecessor on every run.
#[test]
fn test_ties_are_deterministic() {
    let edges = vec![
        edge(1, 1, 2, 1.0),
        edge(2, 2, 4, 1.0),
        edge(3, 1, 3, 1.0),
        edge(4, 3, 4, 1.0),
    ];
    let g = graph(&edges, GraphKind::Directed);
    let four = g.node_index(4).expect("vertex 4");
    for relaxation in BOTH {
        let first = solve(&g, 1, relaxation).expect("converges");
        let edge_id = first.predecessor(four).expect("reached").edge_id;
        for _ in 0..5 {
            let again = solve(&g, 1, relaxation).expect("converges");
            assert_eq!(again.predecessor(four).map(|p| p.edge_id), Some(edge_id));
        }
    }
}

// ---------------------------------------------------------------------------
// solve_all
// ---------------------------------------------------------------------------

/// One result per distinct source, ascending.
#[test]
fn test_solve_all_runs_each_source_once() {
    let g = graph(&sample_edges(), GraphKind::Directed);
    let pairs = normalize(&Combinations::pairs([(2, 3), (1, 3), (1, 2), (2, 1)])).expect("pairs");
    for relaxation in BOTH {
        let results = solve_all(&g, &pairs, relaxation).expect("converges");
        assert_eq!(
            results.iter().map(SearchResult::source).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }
}

/// Any failing source fails the whole batch.
#[test]
fn test_solve_all_propagates_cycle() {
    let g = graph(&negative_cycle_edges(), GraphKind::Directed);
    let pairs = normalize(&Combinations::cross([3, 1], [2])).expect("pairs");
    let err = solve_all(&g, &pairs, Relaxation::Sweep).expect_err("cycle");
    match err {
        SolveError::NegativeCycle { source_vid } => assert!(source_vid == 1 || source_vid == 3),
    }
}
