#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod combinations;
pub mod engine;
pub mod flatten;
pub mod graph;
pub mod input;
pub mod records;

#[cfg(test)]
mod test_helpers;

pub use combinations::{CombinationError, Combinations, PairSet, normalize};
pub use engine::{
    EngineConfig, FailureKind, NO_EDGES_NOTICE, NO_PAIRS_NOTICE, NO_PATHS_NOTICE, Outcome,
    Request, Response, UNKNOWN_FAILURE, shortest_paths,
};
pub use flatten::{FlattenError, count_rows, flatten};
pub use graph::{
    Arc, CostGraph, GraphBuildError, GraphKind, GraphStats, Path, PathStep, ReconstructError,
    Relaxation, SearchResult, SolveError, build_graph, reconstruct, solve, solve_all,
};
pub use input::{InputError, parse_edges, parse_pairs};
pub use records::{EdgeDirection, EdgeId, EdgeRecord, NO_EDGE, OutputRow, Pair, VertexId};

/// Returns the current version of the moorepath-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
