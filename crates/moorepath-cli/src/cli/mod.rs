//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use moorepath_core::{GraphKind, Relaxation};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl PathOrStdin {
    /// Label used in messages and echoed into the engine log.
    pub fn label(&self) -> String {
        match self {
            PathOrStdin::Stdin => "-".to_owned(),
            PathOrStdin::Path(path) => path.display().to_string(),
        }
    }

    /// Returns `true` for the stdin sentinel.
    pub fn is_stdin(&self) -> bool {
        matches!(self, PathOrStdin::Stdin)
    }
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` prints an aligned table to stdout and notices to stderr.
/// `Json` prints a single JSON object to stdout.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// Structured JSON output.
    Json,
}

/// Relaxation strategy selectable from the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RelaxationArg {
    /// Bellman-Ford passes over every edge (default).
    Sweep,
    /// Moore's FIFO queue of improved vertices.
    Queue,
}

impl From<RelaxationArg> for Relaxation {
    fn from(arg: RelaxationArg) -> Self {
        match arg {
            RelaxationArg::Sweep => Relaxation::Sweep,
            RelaxationArg::Queue => Relaxation::Queue,
        }
    }
}

/// All top-level subcommands exposed by the `moorepath` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Compute shortest paths for a set of (source, target) pairs.
    Route {
        /// Path to a JSON edge list, or `-` for stdin.
        #[arg(value_name = "EDGES")]
        edges: PathOrStdin,
        /// Source vertex id (repeatable); paired with every `--to`.
        #[arg(long, value_name = "ID", allow_negative_numbers = true)]
        from: Vec<i64>,
        /// Target vertex id (repeatable); paired with every `--from`.
        #[arg(long, value_name = "ID", allow_negative_numbers = true)]
        to: Vec<i64>,
        /// JSON file of explicit `{"source", "target"}` pairs, or `-` for stdin.
        #[arg(long, value_name = "FILE", conflicts_with_all = ["from", "to"])]
        pairs: Option<PathOrStdin>,
        /// Treat every edge as traversable in both directions.
        #[arg(long)]
        undirected: bool,
        /// Relaxation strategy: sweep (default) or queue.
        #[arg(long, default_value = "sweep", value_enum)]
        relaxation: RelaxationArg,
        /// Omit the sentinel row of pairs that have no path.
        #[arg(long)]
        skip_unreachable: bool,
    },

    /// Print vertex, arc and cost statistics for an edge list.
    Inspect {
        /// Path to a JSON edge list, or `-` for stdin.
        #[arg(value_name = "EDGES")]
        edges: PathOrStdin,
        /// Treat every edge as traversable in both directions.
        #[arg(long)]
        undirected: bool,
    },
}

/// Maps the `--undirected` flag to a graph kind.
pub fn graph_kind(undirected: bool) -> GraphKind {
    GraphKind::from_directed(!undirected)
}

/// Root CLI struct for the `moorepath` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "moorepath",
    version,
    about = "Multi-pair shortest paths with negative edge costs",
    long_about = "Computes shortest paths between many (source, target) pairs of a\n\
                  weighted graph read from a JSON edge list. Negative costs are\n\
                  allowed; reachable negative cycles are reported as errors."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase stderr verbosity: timing and graph size
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `MOOREPATH_MAX_FILE_SIZE` environment variable.
    /// Default: 268435456 (256 MB).
    #[arg(
        long,
        global = true,
        env = "MOOREPATH_MAX_FILE_SIZE",
        default_value = "268435456"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>: any value other than empty, `0`, `false`,
    /// `no` or `off` disables color.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,
}
