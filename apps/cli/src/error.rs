//! # CLI Error Type
//!
//! Unified error type for the `tally` commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command Function ── Result<T, CliError>                                │
//! │         │                                                               │
//! │         ├── Config file?   ── toml::de::Error ──────────┐              │
//! │         ├── Invoice file?  ── io / toml / json ─────────┤              │
//! │         ├── Engine?        ── CoreError ────────────────┼──► CliError  │
//! │         └── Arguments?     ── Usage ────────────────────┘      │       │
//! │                                                                 ▼       │
//! │                                    main: "Error: ..." and exit code 1  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tally_core::CoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Bad command line.
    #[error("{0}")]
    Usage(String),

    /// Invoice file extension is neither .toml nor .json.
    #[error("Unsupported invoice format: {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// Invoice document parsed but is not usable.
    #[error("Invalid invoice document: {0}")]
    InvalidDocument(String),

    /// Argument that should be a decimal amount is not.
    #[error("Not a decimal amount: '{0}'")]
    InvalidAmount(String),

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// Computation rejected the input.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
