//! Implementation of `moorepath route <EDGES> [--from ID]... [--to ID]...`.
//!
//! Reads the edge list (and optionally an explicit pair list), runs the
//! shortest-path engine, and writes the flattened rows to stdout.
//!
//! Pairs come either from `--pairs FILE` or from the cross product of every
//! `--from` with every `--to`. Without any of them the query is empty and
//! the engine answers with a notice.
//!
//! Output (human mode): an aligned table, notices on stderr.
//! Output (JSON mode): `{"rows": [...], "count": N, "notice": .., "log": ..}`.
//!
//! Exit codes: 0 = engine succeeded (notices included), 1 = engine failure,
//! 2 = input failure.
use std::time::Instant;

use moorepath_core::{
    Combinations, EngineConfig, FailureKind, GraphKind, Outcome, Request, Response, parse_edges,
    parse_pairs, shortest_paths,
};

use crate::OutputFormat;
use crate::PathOrStdin;
use crate::error::CliError;
use crate::format::{self, FormatterConfig};
use crate::io::read_input;

/// Where the `(source, target)` pairs come from.
#[derive(Debug, Clone)]
pub enum PairSource<'a> {
    /// Cross product of `--from` and `--to`.
    Ids {
        /// `--from` values.
        from: &'a [i64],
        /// `--to` values.
        to: &'a [i64],
    },
    /// Explicit pair list read from a file or stdin.
    File(&'a PathOrStdin),
}

/// Parsed arguments of one `route` invocation.
#[derive(Debug, Clone)]
pub struct RouteArgs<'a> {
    /// Edge list source.
    pub edges: &'a PathOrStdin,
    /// Pair source.
    pub pairs: PairSource<'a>,
    /// Directed or undirected semantics.
    pub kind: GraphKind,
    /// Engine tunables.
    pub engine: EngineConfig,
}

/// Runs the `route` command.
///
/// # Errors
///
/// - [`CliError`] exit code 2 if an input cannot be read or decoded.
/// - [`CliError`] exit code 1 if the engine reports a fatal error.
pub fn run(
    args: &RouteArgs<'_>,
    max_file_size: u64,
    format: OutputFormat,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let request = build_request(args, max_file_size)?;

    let started = Instant::now();
    let response = shortest_paths(&request, &args.engine);
    let elapsed = started.elapsed();
    tracing::info!(
        outcome = ?response.outcome,
        rows = response.count(),
        ?elapsed,
        "route finished"
    );

    let stderr = std::io::stderr();
    let mut err = stderr.lock();
    let io_err = |e: std::io::Error| CliError::IoError {
        source: "output".to_owned(),
        detail: e.to_string(),
    };

    if let Some(log) = &response.log {
        format::write_log(&mut err, log, config).map_err(io_err)?;
    }
    format::write_timing_human(&mut err, "solved", elapsed, config).map_err(io_err)?;

    if let Some(failure) = failure_of(&response) {
        return Err(failure);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => {
            format::write_rows_human(&mut out, &response.rows).map_err(io_err)?;
            if let Some(notice) = &response.notice {
                format::write_notice(&mut err, notice, config).map_err(io_err)?;
            }
            format::write_summary_human(&mut err, &response.rows, config).map_err(io_err)
        }
        OutputFormat::Json => format::write_rows_json(
            &mut out,
            &response.rows,
            response.notice.as_deref(),
            response.log.as_deref(),
        )
        .map_err(io_err),
    }
}

/// Reads and decodes the inputs into an engine [`Request`].
fn build_request(args: &RouteArgs<'_>, max_file_size: u64) -> Result<Request, CliError> {
    if let PairSource::File(pairs) = &args.pairs {
        if args.edges.is_stdin() && pairs.is_stdin() {
            return Err(CliError::StdinConflict);
        }
    }

    let edges_text = read_input(args.edges, max_file_size)?;
    let edges = parse_edges(&edges_text).map_err(|e| CliError::InvalidInput {
        source: args.edges.label(),
        detail: e.to_string(),
    })?;

    let (combinations, hint) = match &args.pairs {
        PairSource::Ids { from, to } => (
            Combinations::cross(from.iter().copied(), to.iter().copied()),
            "--from/--to".to_owned(),
        ),
        PairSource::File(source) => {
            let text = read_input(source, max_file_size)?;
            let pairs = parse_pairs(&text).map_err(|e| CliError::InvalidInput {
                source: source.label(),
                detail: e.to_string(),
            })?;
            (Combinations::Explicit(pairs), source.label())
        }
    };

    Ok(Request::new(edges, combinations, args.kind)
        .with_edges_hint(args.edges.label())
        .with_combinations_hint(hint))
}

/// Maps a failed [`Response`] to the matching [`CliError`].
fn failure_of(response: &Response) -> Option<CliError> {
    let detail = response.error.clone()?;
    match response.outcome {
        Outcome::Failed(FailureKind::InvalidInput) => Some(CliError::InvalidInput {
            source: response.log.clone().unwrap_or_else(|| "edges".to_owned()),
            detail,
        }),
        Outcome::Failed(
            FailureKind::NegativeCycle | FailureKind::InternalInvariant | FailureKind::Unknown,
        )
        | Outcome::Paths
        | Outcome::NoCombinationsFound
        | Outcome::NoEdgesFound
        | Outcome::NoPathFound => Some(CliError::EngineFailure { detail }),
    }
}
