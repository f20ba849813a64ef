//! # Tally Configuration
//!
//! Currency labels, the default tax mode and the words numbering system.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TALLY_TAX_MODE=inclusive                                           │
//! │     TALLY_NUMBERING=indian                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/tally/tally.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.tally.tally/tally.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     USD, "$", "cents", exclusive, international                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # tally.toml
//! [currency]
//! code = "INR"
//! symbol = "₹"
//! unit_label = "rupees"
//! subunit_label = "paise"
//!
//! [invoice]
//! tax_mode = "exclusive"  # exclusive | inclusive
//!
//! [words]
//! numbering = "indian"    # international | indian
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tally_core::{AmountWordsRenderer, NumberingSystem, TaxMode};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

// =============================================================================
// Currency Settings
// =============================================================================

/// Currency labels used in the report and in words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// ISO 4217 code (e.g. "USD", "INR").
    #[serde(default = "default_currency_code")]
    pub code: String,

    /// Prefix printed before amounts in the text report.
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,

    /// Word after the whole units in words ("rupees"). Omitted when unset.
    #[serde(default)]
    pub unit_label: Option<String>,

    /// Word after the fractional part in words ("cents", "paise").
    #[serde(default = "default_subunit_label")]
    pub subunit_label: String,
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_subunit_label() -> String {
    "cents".to_string()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        CurrencyConfig {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
            unit_label: None,
            subunit_label: default_subunit_label(),
        }
    }
}

// =============================================================================
// Invoice Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSettings {
    /// Used when an invoice document does not state its own tax mode.
    #[serde(default)]
    pub tax_mode: TaxMode,
}

// =============================================================================
// Words Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordsSettings {
    #[serde(default)]
    pub numbering: NumberingSystem,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete `tally` configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyConfig {
    #[serde(default)]
    pub currency: CurrencyConfig,

    #[serde(default)]
    pub invoice: InvoiceSettings,

    #[serde(default)]
    pub words: WordsSettings,
}

impl TallyConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (tally.toml)
    /// 3. Environment variables
    ///
    /// An explicitly given path that does not exist is an error; a missing
    /// file at the default location is not.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading tally config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else if explicit {
                return Err(CliError::InvalidConfig(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file body.
    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CliResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CliError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Tally config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.currency.code.trim().is_empty() {
            return Err(CliError::InvalidConfig(
                "currency.code must not be empty".into(),
            ));
        }

        if self.currency.subunit_label.trim().is_empty() {
            return Err(CliError::InvalidConfig(
                "currency.subunit_label must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    ///
    /// ## Supported Variables
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `TALLY_TAX_MODE` | exclusive or inclusive |
    /// | `TALLY_CURRENCY_CODE` | ISO currency code |
    /// | `TALLY_CURRENCY_SYMBOL` | Report prefix |
    /// | `TALLY_UNIT_LABEL` | Whole-unit word |
    /// | `TALLY_SUBUNIT_LABEL` | Fraction word |
    /// | `TALLY_NUMBERING` | international or indian |
    pub fn apply_env_overrides(&mut self) -> CliResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("TALLY_TAX_MODE") {
            self.invoice.tax_mode = mode.parse().map_err(CliError::InvalidConfig)?;
            debug!(tax_mode = %self.invoice.tax_mode, "Override from TALLY_TAX_MODE");
        }

        if let Some(code) = lookup("TALLY_CURRENCY_CODE") {
            self.currency.code = code.trim().to_uppercase();
            debug!(code = %self.currency.code, "Override from TALLY_CURRENCY_CODE");
        }

        if let Some(symbol) = lookup("TALLY_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(label) = lookup("TALLY_UNIT_LABEL") {
            let label = label.trim().to_string();
            self.currency.unit_label = (!label.is_empty()).then_some(label);
        }

        if let Some(label) = lookup("TALLY_SUBUNIT_LABEL") {
            self.currency.subunit_label = label.trim().to_string();
        }

        if let Some(numbering) = lookup("TALLY_NUMBERING") {
            self.words.numbering = numbering.parse().map_err(CliError::InvalidConfig)?;
            debug!(numbering = %self.words.numbering, "Override from TALLY_NUMBERING");
        }

        Ok(())
    }

    /// Returns the default config file path for the current platform.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "tally")
            .map(|dirs| dirs.config_dir().join("tally.toml"))
    }

    /// Words renderer matching the currency and numbering settings.
    pub fn renderer(&self) -> AmountWordsRenderer {
        let renderer = AmountWordsRenderer::new()
            .with_subunit_label(self.currency.subunit_label.as_str())
            .with_numbering(self.words.numbering);

        match &self.currency.unit_label {
            Some(unit) => renderer.with_unit_label(unit.as_str()),
            None => renderer,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
