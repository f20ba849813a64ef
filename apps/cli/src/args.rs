//! # Command Line Arguments
//!
//! ```text
//! tally [--config <path>] [--json] [--verbose] <invoice-file>
//! tally [--config <path>] words <amount>
//! tally --help
//! ```

use std::path::PathBuf;

use crate::error::{CliError, CliResult};

pub const USAGE: &str = "\
Tally - invoice totals and amount in words

Usage:
  tally [OPTIONS] <invoice-file>
  tally [OPTIONS] words <amount>

Arguments:
  <invoice-file>         Invoice document (.toml or .json)
  <amount>               Non-negative decimal amount

Options:
  -c, --config <PATH>    Config file (default: platform config dir/tally.toml)
  -j, --json             Print the invoice snapshot as JSON
  -v, --verbose          Debug logging on stderr
  -h, --help             Show this help message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Invoice(PathBuf),
    Words(String),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub json: bool,
    pub verbose: bool,
    pub command: Command,
}

impl Args {
    /// Parses arguments, program name excluded.
    pub fn parse<I>(args: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = None;
        let mut json = false;
        let mut verbose = false;
        let mut positional = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args
                        .next()
                        .ok_or_else(|| CliError::Usage("--config needs a path".into()))?;
                    config = Some(PathBuf::from(path));
                }
                "--json" | "-j" => json = true,
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => {
                    return Ok(Args {
                        config,
                        json,
                        verbose,
                        command: Command::Help,
                    })
                }
                // Lets negative amounts through to `words`, where they are rejected properly.
                flag if flag.starts_with('-') && flag.parse::<f64>().is_err() => {
                    return Err(CliError::Usage(format!("Unknown option: {}", flag)));
                }
                _ => positional.push(arg),
            }
        }

        let command = match positional.as_slice() {
            [] => Command::Help,
            [word, amount] if word == "words" => Command::Words(amount.clone()),
            [word] if word == "words" => {
                return Err(CliError::Usage("words needs an amount".into()));
            }
            [path] => Command::Invoice(PathBuf::from(path)),
            _ => {
                return Err(CliError::Usage(format!(
                    "Unexpected arguments: {}",
                    positional.join(" ")
                )));
            }
        };

        Ok(Args {
            config,
            json,
            verbose,
            command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliResult<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_invoice_with_flags() {
        let args = parse(&["--json", "-c", "my.toml", "invoice.toml"]).unwrap();
        assert!(args.json);
        assert!(!args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
        assert_eq!(args.command, Command::Invoice(PathBuf::from("invoice.toml")));
    }

    #[test]
    fn test_words() {
        let args = parse(&["words", "105.50"]).unwrap();
        assert_eq!(args.command, Command::Words("105.50".to_string()));

        let args = parse(&["words", "-5"]).unwrap();
        assert_eq!(args.command, Command::Words("-5".to_string()));
    }

    #[test]
    fn test_help() {
        assert_eq!(parse(&[]).unwrap().command, Command::Help);
        assert_eq!(parse(&["-h", "invoice.toml"]).unwrap().command, Command::Help);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse(&["--bogus"]), Err(CliError::Usage(_))));
        assert!(matches!(parse(&["--config"]), Err(CliError::Usage(_))));
        assert!(matches!(parse(&["words"]), Err(CliError::Usage(_))));
        assert!(matches!(parse(&["a.toml", "b.toml"]), Err(CliError::Usage(_))));
    }
}
