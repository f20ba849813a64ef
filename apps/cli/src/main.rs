//! # tally
//!
//! ```bash
//! # Print an invoice
//! tally invoice.toml
//!
//! # Snapshot as JSON, with an explicit config
//! tally --config ./tally.toml --json invoice.json
//!
//! # Amount in words
//! tally words 105.50
//! ```

use tally_cli::{run, Args};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    init_tracing(args.verbose);

    let output = run(&args)?;
    println!("{}", output);
    Ok(())
}

/// Logs go to stderr; stdout carries only the report.
///
/// `RUST_LOG` wins when set.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info,tally=debug,tally_core=debug,tally_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
