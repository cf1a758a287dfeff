use std::process::ExitCode;

use clap::Parser;
use moorepath_core::EngineConfig;
use tracing_subscriber::EnvFilter;

mod cli;
mod cmd;
mod error;
mod format;
mod io;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin};

use crate::cmd::route::{PairSource, RouteArgs};
use crate::error::CliError;
use crate::format::FormatterConfig;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "MOOREPATH_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = FormatterConfig::from_flags(cli.no_color, cli.quiet, cli.verbose);
    init_tracing(&cli, config.colors);

    match dispatch(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let stderr = std::io::stderr();
            let mut err = stderr.lock();
            format::write_error(&mut err, &e.message(), &config).ok();
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

/// Installs a stderr `fmt` subscriber.
///
/// `MOOREPATH_LOG` wins when set; otherwise the level follows `--quiet` and
/// `--verbose`.
fn init_tracing(cli: &Cli, ansi: bool) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .try_init()
        .ok();
}

fn dispatch(cli: &Cli, config: &FormatterConfig) -> Result<(), CliError> {
    match &cli.command {
        Command::Route {
            edges,
            from,
            to,
            pairs,
            undirected,
            relaxation,
            skip_unreachable,
        } => {
            let args = RouteArgs {
                edges,
                pairs: match pairs {
                    Some(source) => PairSource::File(source),
                    None => PairSource::Ids { from, to },
                },
                kind: cli::graph_kind(*undirected),
                engine: EngineConfig {
                    relaxation: (*relaxation).into(),
                    emit_unreachable: !*skip_unreachable,
                },
            };
            cmd::route::run(&args, cli.max_file_size, cli.format, config)
        }
        Command::Inspect { edges, undirected } => cmd::inspect::run(
            edges,
            cli::graph_kind(*undirected),
            cli.max_file_size,
            cli.format,
            config,
        ),
    }
}
