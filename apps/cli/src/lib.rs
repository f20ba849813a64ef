//! # tally-cli
//!
//! The `tally` binary's library half: arguments, configuration, invoice
//! documents and report output. All arithmetic lives in `tally-core`.
//!
//! ```text
//! args ──► TallyConfig::load ──► InvoiceDocument ──► InvoiceDraft + Catalog
//!                                                          │
//!                                          InvoiceSnapshot::capture
//!                                                          │
//!                                          report (text | JSON) ──► stdout
//! ```

pub mod args;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod report;

use tracing::debug;

pub use args::{Args, Command, USAGE};
pub use config::TallyConfig;
pub use error::{CliError, CliResult};

/// Runs a parsed command and returns what to print.
pub fn run(args: &Args) -> CliResult<String> {
    if args.command == Command::Help {
        return Ok(USAGE.to_string());
    }

    let config = TallyConfig::load(args.config.clone())?;
    debug!(
        currency = %config.currency.code,
        tax_mode = %config.invoice.tax_mode,
        numbering = %config.words.numbering,
        "Configuration loaded"
    );

    match &args.command {
        Command::Invoice(path) => commands::render_invoice(path, &config, args.json),
        Command::Words(amount) => commands::amount_words(amount, &config),
        Command::Help => Ok(USAGE.to_string()),
    }
}
