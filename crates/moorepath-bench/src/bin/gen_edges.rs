//! Writes a generated edge list as JSON to stdout.
//!
//! Usage: `gen-edges [small|medium|large] [SEED]`. The output is accepted
//! directly by `moorepath route` and `moorepath inspect`; the generated
//! query is reported on stderr.

use std::error::Error;
use std::io::{self, BufWriter, Write as _};

use moorepath_bench::{SizeTier, generate_workload};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let tier = match args.next().as_deref() {
        None | Some("small") => SizeTier::Small,
        Some("medium") => SizeTier::Medium,
        Some("large") => SizeTier::Large,
        Some(other) => return Err(format!("unknown tier: {other}").into()),
    };
    let seed = match args.next() {
        Some(text) => text.parse()?,
        None => 42,
    };

    let workload = generate_workload(&tier.config(seed));

    let mut err = io::stderr().lock();
    writeln!(
        err,
        "{} edges; sources {:?}; targets {:?}",
        workload.edges.len(),
        workload.sources,
        workload.targets
    )?;

    let mut out = BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut out, &workload.edges)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
