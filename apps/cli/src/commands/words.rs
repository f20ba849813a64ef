//! `tally words <amount>`: print an amount in words.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::TallyConfig;
use crate::error::{CliError, CliResult};

/// Renders `amount` with the configured labels and numbering system.
///
/// The amount is taken as written; it is not rounded first.
pub fn amount_words(amount: &str, config: &TallyConfig) -> CliResult<String> {
    let amount = Decimal::from_str(amount.trim())
        .map_err(|_| CliError::InvalidAmount(amount.to_string()))?;
    Ok(config.renderer().render(amount)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{CoreError, NumberingSystem};

    #[test]
    fn test_words_default_config() {
        let config = TallyConfig::default();
        assert_eq!(amount_words("0", &config).unwrap(), "Zero");
        assert_eq!(
            amount_words("105.50", &config).unwrap(),
            "One hundred five and fifty cents"
        );
    }

    #[test]
    fn test_words_indian() {
        let mut config = TallyConfig::default();
        config.currency.unit_label = Some("rupees".to_string());
        config.currency.subunit_label = "paise".to_string();
        config.words.numbering = NumberingSystem::Indian;

        assert_eq!(
            amount_words("1500000", &config).unwrap(),
            "Fifteen lakh rupees"
        );
    }

    #[test]
    fn test_words_rejects_bad_input() {
        let config = TallyConfig::default();
        assert!(matches!(
            amount_words("ten", &config),
            Err(CliError::InvalidAmount(_))
        ));
        assert!(matches!(
            amount_words("-1", &config),
            Err(CliError::Core(CoreError::InvalidAmount { .. }))
        ));
    }
}
