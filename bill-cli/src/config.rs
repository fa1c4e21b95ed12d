//! `billswift.toml`: per-installation settings.
//!
//! Every section is optional. A missing file means built-in defaults.
//!
//! ```toml
//! [issuer]
//! company_name = "UNARCH & BUILD"
//! company_email = "accounts@example.com"
//!
//! [bank]
//! bank_name = "Axis Bank"
//! account_number = "924020003854618"
//! ifsc = "UTIB0000624"
//!
//! [rates]
//! cgst_percent = 9
//! sgst_percent = 9
//!
//! [logging]
//! level = "info"
//! file = "billswift.log"
//! ```

use std::path::{Path, PathBuf};

use bill_core::Issuer;
use bill_core::samples::{STANDARD_HALF_RATE, default_issuer};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "billswift.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fills issuer fields an invoice leaves blank.
    pub issuer: Issuer,
    pub bank: BankDetails,
    pub rates: RateDefaults,
    pub logging: LoggingConfig,
}

/// Account printed in the invoice footer for IMPS/NEFT/RTGS payments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BankDetails {
    pub bank_name: String,
    /// Falls back to the issuer's company name when absent.
    pub merchant_name: Option<String>,
    pub account_number: String,
    pub ifsc: String,
}

/// GST rates for a new invoice and for `totals` when none are given.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RateDefaults {
    pub cgst_percent: Decimal,
    pub sgst_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins over this.
    pub level: String,
    /// Log records are appended here as well as to stderr.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            bank: BankDetails::default(),
            rates: RateDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for BankDetails {
    fn default() -> Self {
        Self {
            bank_name: "Axis Bank".to_string(),
            merchant_name: None,
            account_number: "924020003854618".to_string(),
            ifsc: "UTIB0000624".to_string(),
        }
    }
}

impl Default for RateDefaults {
    fn default() -> Self {
        Self {
            cgst_percent: STANDARD_HALF_RATE,
            sgst_percent: STANDARD_HALF_RATE,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Parses a config document. Issuer fields the document leaves out keep
    /// their built-in values.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(input)?;
        fill_issuer(&mut config.issuer, &default_issuer());
        Ok(config)
    }

    /// Loads `path`, or [`DEFAULT_CONFIG_FILE`] if it exists, or the
    /// defaults. Returns the config and the file it came from.
    ///
    /// An explicitly named file that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    return Ok((Self::default(), None));
                }
                fallback
            }
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok((Self::from_toml_str(&contents)?, Some(path)))
    }

    /// Name printed as the payee in the bank footer.
    pub fn merchant_name(&self) -> &str {
        self.bank
            .merchant_name
            .as_deref()
            .or(self.issuer.company_name.as_deref())
            .unwrap_or_default()
    }
}

/// Copies each field of `defaults` into `target` where `target` has none.
pub fn fill_issuer(
    target: &mut Issuer,
    defaults: &Issuer,
) {
    let pairs = [
        (&mut target.company_name, &defaults.company_name),
        (&mut target.company_address, &defaults.company_address),
        (&mut target.company_gstin, &defaults.company_gstin),
        (&mut target.company_state, &defaults.company_state),
        (&mut target.company_email, &defaults.company_email),
    ];
    for (field, default) in pairs {
        if field.is_none() {
            field.clone_from(default);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_document_is_the_default() {
        let config = AppConfig::from_toml_str("").expect("empty config is valid");

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.rates.cgst_percent, dec!(9));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[bank]
bank_name = "State Bank of India"

[rates]
cgst_percent = 6
sgst_percent = "6"

[logging]
file = "billswift.log"
"#,
        )
        .expect("should parse");

        assert_eq!(config.bank.bank_name, "State Bank of India");
        assert_eq!(config.bank.ifsc, "UTIB0000624");
        assert_eq!(config.rates.cgst_percent, dec!(6));
        assert_eq!(config.rates.sgst_percent, dec!(6));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.file, Some(PathBuf::from("billswift.log")));
    }

    #[test]
    fn partial_issuer_is_filled_from_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[issuer]
company_email = "accounts@unarch.example"
"#,
        )
        .expect("should parse");

        assert_eq!(config.issuer.company_email.as_deref(), Some("accounts@unarch.example"));
        assert_eq!(config.issuer.company_name.as_deref(), Some("UNARCH & BUILD"));
    }

    #[test]
    fn merchant_name_falls_back_to_company() {
        let mut config = AppConfig::default();
        assert_eq!(config.merchant_name(), "UNARCH & BUILD");

        config.bank.merchant_name = Some("Unarch Payments".to_string());
        assert_eq!(config.merchant_name(), "Unarch Payments");
    }

    #[test]
    fn fill_issuer_keeps_existing_values() {
        let mut issuer = Issuer {
            company_name: Some("Sharma Builders".to_string()),
            ..Issuer::default()
        };

        fill_issuer(&mut issuer, &default_issuer());

        assert_eq!(issuer.company_name.as_deref(), Some("Sharma Builders"));
        assert_eq!(issuer.company_gstin, default_issuer().company_gstin);
    }

    #[test]
    fn malformed_document_is_rejected() {
        let result = AppConfig::from_toml_str("[rates]\ncgst_percent = [1, 2]\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/no/such/billswift.toml")));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
