//! Edge list and query construction.

use moorepath_core::{EdgeId, EdgeRecord, VertexId};
use rand::Rng;
use rand::rngs::StdRng;

use super::GeneratorConfig;

/// Builds the edge list for `config`.
///
/// Vertex `v > 1` first receives one arc from a random earlier vertex, so
/// every vertex is reachable from vertex 1. The remaining edges join random
/// distinct endpoints.
pub(super) fn build_edges(config: &GeneratorConfig, rng: &mut StdRng) -> Vec<EdgeRecord> {
    let n = config.num_vertices.max(2);
    let potentials: Vec<i64> = (0..n)
        .map(|_| rng.gen_range(0..=config.max_potential.max(0)))
        .collect();

    let mut edges = Vec::with_capacity(config.num_edges.max(n - 1) + 3);
    let mut next_id: EdgeId = 1;

    for v in 1..n {
        let u = rng.gen_range(0..v);
        edges.push(reweighted_edge(config, rng, &potentials, next_id, u, v));
        next_id += 1;
    }
    while edges.len() < config.num_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u == v {
            continue;
        }
        edges.push(reweighted_edge(config, rng, &potentials, next_id, u, v));
        next_id += 1;
    }

    if config.inject_negative_cycle {
        // 1 -> 2 -> 3 -> 2 with the back arc outweighing the forward one.
        edges.push(EdgeRecord::new(next_id, 1, 2, 1.0).with_reverse_cost(1.0));
        edges.push(EdgeRecord::new(next_id + 1, 2, 3, 1.0).with_reverse_cost(1.0));
        edges.push(EdgeRecord::new(next_id + 2, 3, 2, -3.0).with_reverse_cost(-3.0));
    }
    edges
}

fn reweighted_edge(
    config: &GeneratorConfig,
    rng: &mut StdRng,
    potentials: &[i64],
    id: EdgeId,
    u: usize,
    v: usize,
) -> EdgeRecord {
    let base = rng.gen_range(0..=config.max_base_cost.max(0));
    let cost = base + potentials[u] - potentials[v];
    let edge = EdgeRecord::new(id, vertex_id(u), vertex_id(v), cost as f64);
    if config.two_way {
        let back = rng.gen_range(0..=config.max_base_cost.max(0));
        edge.with_reverse_cost((back + potentials[v] - potentials[u]) as f64)
    } else {
        edge
    }
}

/// Picks distinct sources (vertex 1 first) and distinct targets.
pub(super) fn pick_query(
    config: &GeneratorConfig,
    rng: &mut StdRng,
) -> (Vec<VertexId>, Vec<VertexId>) {
    let n = config.num_vertices.max(2);
    let mut sources = vec![1];
    pick_distinct(rng, n, config.num_sources, &mut sources);
    let mut targets = Vec::new();
    pick_distinct(rng, n, config.num_targets, &mut targets);
    (sources, targets)
}

fn pick_distinct(rng: &mut StdRng, n: usize, want: usize, out: &mut Vec<VertexId>) {
    let want = want.min(n);
    while out.len() < want {
        let id = vertex_id(rng.gen_range(0..n));
        if !out.contains(&id) {
            out.push(id);
        }
    }
}

/// Vertex ids are 1-based.
fn vertex_id(index: usize) -> VertexId {
    VertexId::try_from(index).map_or(VertexId::MAX, |i| i + 1)
}
