//! Random cost-graph generator.
//!
//! Produces edge lists with negative costs but, unless asked otherwise, no
//! negative cycle: every arc cost is a non-negative base cost reweighted by
//! a random vertex potential, `base + p(u) - p(v)`. Around any cycle the
//! potentials cancel, so cycle costs equal the sum of their base costs.

pub mod topology;

use moorepath_core::{Combinations, EdgeRecord, VertexId};
use rand::SeedableRng;
use rand::rngs::StdRng;

use topology::{build_edges, pick_query};

/// Configuration for the workload generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of vertices, numbered `1..=num_vertices`.
    pub num_vertices: usize,
    /// Number of edges, including the spanning arcs that keep every vertex
    /// reachable from vertex 1.
    pub num_edges: usize,
    /// Base costs are drawn from `0..=max_base_cost`.
    pub max_base_cost: i64,
    /// Potentials are drawn from `0..=max_potential`. Zero yields no
    /// negative costs at all.
    pub max_potential: i64,
    /// Give every edge a `reverse_cost`, making undirected runs free of
    /// negative cycles as well.
    pub two_way: bool,
    /// Append a three-arc negative cycle reachable from vertex 1.
    pub inject_negative_cycle: bool,
    /// Number of distinct query sources.
    pub num_sources: usize,
    /// Number of distinct query targets.
    pub num_targets: usize,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// ~100 vertices, ~400 edges.
    Small,
    /// ~1K vertices, ~5K edges.
    Medium,
    /// ~5K vertices, ~25K edges.
    Large,
}

impl SizeTier {
    /// Returns the generator configuration for this tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        match self {
            SizeTier::Small => GeneratorConfig {
                seed,
                num_vertices: 100,
                num_edges: 400,
                max_base_cost: 20,
                max_potential: 30,
                two_way: true,
                inject_negative_cycle: false,
                num_sources: 4,
                num_targets: 8,
            },
            SizeTier::Medium => GeneratorConfig {
                seed,
                num_vertices: 1_000,
                num_edges: 5_000,
                max_base_cost: 50,
                max_potential: 80,
                two_way: true,
                inject_negative_cycle: false,
                num_sources: 8,
                num_targets: 16,
            },
            SizeTier::Large => GeneratorConfig {
                seed,
                num_vertices: 5_000,
                num_edges: 25_000,
                max_base_cost: 100,
                max_potential: 150,
                two_way: true,
                inject_negative_cycle: false,
                num_sources: 8,
                num_targets: 32,
            },
        }
    }
}

/// A generated edge list together with a cross-product query over it.
#[derive(Debug, Clone)]
pub struct Workload {
    /// Edge list.
    pub edges: Vec<EdgeRecord>,
    /// Query sources, vertex 1 first.
    pub sources: Vec<VertexId>,
    /// Query targets.
    pub targets: Vec<VertexId>,
}

impl Workload {
    /// The query as engine combinations.
    pub fn combinations(&self) -> Combinations {
        Combinations::cross(self.sources.iter().copied(), self.targets.iter().copied())
    }
}

/// Generates a workload from the given configuration.
///
/// All randomness is deterministic, seeded from `config.seed`.
pub fn generate_workload(config: &GeneratorConfig) -> Workload {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let edges = build_edges(config, &mut rng);
    let (sources, targets) = pick_query(config, &mut rng);
    Workload {
        edges,
        sources,
        targets,
    }
}
