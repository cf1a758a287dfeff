//! Implementation of `moorepath inspect <EDGES> [--undirected]`.
//!
//! Builds the cost graph from an edge list and prints its size and cost
//! range: vertex and arc counts, how many arcs are negative, and the
//! smallest and largest arc cost.
//!
//! Exit codes: 0 = success (an empty edge list prints a notice),
//! 2 = input failure.
use moorepath_core::{GraphBuildError, GraphKind, NO_EDGES_NOTICE, build_graph, parse_edges};

use crate::OutputFormat;
use crate::PathOrStdin;
use crate::error::CliError;
use crate::format::{self, FormatterConfig};
use crate::io::read_input;

/// Runs the `inspect` command.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 if the edge list cannot be read,
/// decoded, or carries a non-finite cost.
pub fn run(
    edges: &PathOrStdin,
    kind: GraphKind,
    max_file_size: u64,
    format: OutputFormat,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let text = read_input(edges, max_file_size)?;
    let records = parse_edges(&text).map_err(|e| CliError::InvalidInput {
        source: edges.label(),
        detail: e.to_string(),
    })?;

    let io_err = |e: std::io::Error| CliError::IoError {
        source: "output".to_owned(),
        detail: e.to_string(),
    };

    let graph = match build_graph(&records, kind) {
        Ok(graph) => graph,
        Err(GraphBuildError::EmptyGraph) => {
            let stderr = std::io::stderr();
            let mut err = stderr.lock();
            return format::write_notice(&mut err, NO_EDGES_NOTICE, config).map_err(io_err);
        }
        Err(e @ GraphBuildError::NonFiniteCost { .. }) => {
            return Err(CliError::InvalidInput {
                source: edges.label(),
                detail: e.to_string(),
            });
        }
    };

    let stats = graph.stats();
    tracing::info!(
        vertices = stats.vertex_count,
        arcs = stats.arc_count,
        "inspected graph"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => format::write_stats_human(&mut out, &stats, records.len()),
        OutputFormat::Json => format::write_stats_json(&mut out, &stats, records.len()),
    }
    .map_err(io_err)
}
