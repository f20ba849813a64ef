//! # Commands
//!
//! One function per `tally` subcommand. Each returns the text to print so
//! `main` owns stdout.

pub mod invoice;
pub mod words;

pub use invoice::render_invoice;
pub use words::amount_words;
