/// Multi-pair shortest-path driver.
///
/// [`shortest_paths`] runs the full pipeline for one request:
///
/// 1. normalize the combinations into a [`PairSet`](crate::PairSet);
/// 2. build the [`CostGraph`](crate::CostGraph);
/// 3. relax every distinct source once;
/// 4. reconstruct one path per pair, source-major;
/// 5. flatten the paths into rows.
///
/// It is also the error boundary. Empty inputs and all-unreachable queries
/// are reported as notices on a successful [`Response`]; negative cycles,
/// invalid costs, broken invariants and panics become an error message on a
/// [`Response`] that carries no rows. Internal error values never leave this
/// module.
use std::panic::{AssertUnwindSafe, catch_unwind};

use thiserror::Error;

use crate::combinations::{CombinationError, Combinations, normalize};
use crate::flatten::{FlattenError, flatten};
use crate::graph::{
    GraphBuildError, GraphKind, Path, ReconstructError, Relaxation, SolveError, build_graph,
    reconstruct, solve_all,
};
use crate::records::{EdgeRecord, OutputRow, VertexId};


/// Notice attached when the combinations normalize to nothing.
pub const NO_PAIRS_NOTICE: &str = "No (source, target) pairs found";
/// Notice attached when the edge list is empty.
pub const NO_EDGES_NOTICE: &str = "No edges found";
/// Notice attached when no queried pair has a path.
pub const NO_PATHS_NOTICE: &str = "No paths found";
/// Error message for failures that were not anticipated.
pub const UNKNOWN_FAILURE: &str = "Caught unknown exception!";

/// Tunables for one engine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Relaxation strategy for every source.
    pub relaxation: Relaxation,
    /// Emit a sentinel row for each queried pair without a path.
    pub emit_unreachable: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            relaxation: Relaxation::Sweep,
            emit_unreachable: true,
        }
    }
}

/// Inputs of one engine invocation.
#[derive(Debug, Clone)]
pub struct Request {
    /// Edge list.
    pub edges: Vec<EdgeRecord>,
    /// Which pairs to answer.
    pub combinations: Combinations,
    /// Directed or undirected semantics.
    pub kind: GraphKind,
    /// Provenance of the edges, echoed to the log when they are unusable.
    pub edges_hint: Option<String>,
    /// Provenance of the combinations, echoed to the log when empty.
    pub combinations_hint: Option<String>,
}

impl Request {
    /// Creates a request without provenance hints.
    pub fn new(edges: Vec<EdgeRecord>, combinations: Combinations, kind: GraphKind) -> Self {
        Self {
            edges,
            combinations,
            kind,
            edges_hint: None,
            combinations_hint: None,
        }
    }

    /// Sets the edge provenance hint.
    #[must_use]
    pub fn with_edges_hint(mut self, hint: impl Into<String>) -> Self {
        self.edges_hint = Some(hint.into());
        self
    }

    /// Sets the combination provenance hint.
    #[must_use]
    pub fn with_combinations_hint(mut self, hint: impl Into<String>) -> Self {
        self.combinations_hint = Some(hint.into());
        self
    }
}

/// Category of a fatal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A negative cycle is reachable from a queried source.
    NegativeCycle,
    /// An internal consistency check failed.
    InternalInvariant,
    /// An edge cost is unusable.
    InvalidInput,
    /// Anything else, including panics.
    Unknown,
}

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// At least one pair has a path.
    Paths,
    /// The combinations normalized to nothing.
    NoCombinationsFound,
    /// The edge list was empty.
    NoEdgesFound,
    /// Every queried pair is unreachable.
    NoPathFound,
    /// The call failed; see [`Response::error`].
    Failed(FailureKind),
}

/// Result of one invocation: rows plus the log, notice and error channels.
///
/// A failed response never carries rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Flattened rows, source-major.
    pub rows: Vec<OutputRow>,
    /// How the call ended.
    pub outcome: Outcome,
    /// Input context worth echoing back to the caller.
    pub log: Option<String>,
    /// Non-fatal informational message.
    pub notice: Option<String>,
    /// Fatal error message.
    pub error: Option<String>,
}

impl Response {
    /// Returns `true` when no error was reported.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Number of rows.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    fn rows(rows: Vec<OutputRow>, outcome: Outcome, notice: Option<&str>) -> Self {
        Self {
            rows,
            outcome,
            log: None,
            notice: notice.map(str::to_owned),
            error: None,
        }
    }

    fn notice(outcome: Outcome, notice: &str, log: Option<String>) -> Self {
        Self {
            rows: Vec::new(),
            outcome,
            log,
            notice: Some(notice.to_owned()),
            error: None,
        }
    }

    fn failure(kind: FailureKind, message: String, log: Option<String>) -> Self {
        Self {
            rows: Vec::new(),
            outcome: Outcome::Failed(kind),
            log,
            notice: None,
            error: Some(message),
        }
    }
}

/// Fatal errors raised inside the pipeline.
#[derive(Debug, Error)]
enum EngineError {
    #[error("Invalid edge input: {0}")]
    Graph(#[from] GraphBuildError),
    #[error("Negative cycle detected from source {source_vid}")]
    NegativeCycle { source_vid: VertexId },
    #[error("Internal invariant violated: {0}")]
    Reconstruct(#[from] ReconstructError),
    #[error("Internal invariant violated: {0}")]
    Flatten(#[from] FlattenError),
}

impl From<SolveError> for EngineError {
    fn from(e: SolveError) -> Self {
        match e {
            SolveError::NegativeCycle { source_vid } => EngineError::NegativeCycle { source_vid },
        }
    }
}

impl EngineError {
    fn kind(&self) -> FailureKind {
        match self {
            EngineError::Graph(_) => FailureKind::InvalidInput,
            EngineError::NegativeCycle { .. } => FailureKind::NegativeCycle,
            EngineError::Reconstruct(_) | EngineError::Flatten(_) => {
                FailureKind::InternalInvariant
            }
        }
    }
}

/// Computes shortest paths for every requested pair.
///
/// Never panics and never returns partial rows on failure; inspect
/// [`Response::outcome`] or [`Response::error`].
pub fn shortest_paths(request: &Request, config: &EngineConfig) -> Response {
    let _span = tracing::debug_span!("shortest_paths", kind = ?request.kind).entered();
    guarded(request.edges_hint.clone(), || run_pipeline(request, config))
}

/// Runs `pipeline`, translating its errors and panics into a failed
/// [`Response`].
fn guarded<F>(log: Option<String>, pipeline: F) -> Response
where
    F: FnOnce() -> Result<Response, EngineError>,
{
    match catch_unwind(AssertUnwindSafe(pipeline)) {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "shortest path computation failed");
            Response::failure(e.kind(), e.to_string(), log)
        }
        Err(_) => {
            tracing::error!("shortest path computation panicked");
            Response::failure(FailureKind::Unknown, UNKNOWN_FAILURE.to_owned(), log)
        }
    }
}

fn run_pipeline(request: &Request, config: &EngineConfig) -> Result<Response, EngineError> {
    let pairs = match normalize(&request.combinations) {
        Ok(pairs) => pairs,
        Err(CombinationError::Empty) => {
            return Ok(Response::notice(
                Outcome::NoCombinationsFound,
                NO_PAIRS_NOTICE,
                request.combinations_hint.clone(),
            ));
        }
    };

    let graph = match build_graph(&request.edges, request.kind) {
        Ok(graph) => graph,
        Err(GraphBuildError::EmptyGraph) => {
            return Ok(Response::notice(
                Outcome::NoEdgesFound,
                NO_EDGES_NOTICE,
                request.edges_hint.clone(),
            ));
        }
        Err(e @ GraphBuildError::NonFiniteCost { .. }) => return Err(e.into()),
    };

    let searches = solve_all(&graph, &pairs, config.relaxation)?;

    let mut paths: Vec<Path> = Vec::with_capacity(pairs.pair_count());
    for search in &searches {
        for target in pairs.targets_of(search.source()) {
            paths.push(reconstruct(&graph, search, target)?);
        }
    }

    let rows = flatten(&paths, config.emit_unreachable)?;
    tracing::debug!(
        pairs = paths.len(),
        rows = rows.len(),
        "flattened shortest paths"
    );

    if paths.iter().all(Path::is_unreachable) {
        return Ok(Response::rows(rows, Outcome::NoPathFound, Some(NO_PATHS_NOTICE)));
    }
    Ok(Response::rows(rows, Outcome::Paths, None))
}
