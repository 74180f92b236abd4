//! Business configuration loading from config.toml
//!
//! Holds the invoice issuer identity and console settings. A missing file is
//! not fatal: the built-in defaults are used and a warning is logged.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Issuer identity printed on invoices
    #[serde(default)]
    pub business: BusinessConfig,
    /// Console presentation settings
    #[serde(default)]
    pub console: ConsoleConfig,
}

/// Identity of the rental company, shown in invoice headers
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessConfig {
    /// Trading name
    pub name: String,
    /// Postal address, one line
    #[serde(default)]
    pub address: String,
    /// Contact phone shown on invoices
    #[serde(default)]
    pub phone: String,
    /// Contact email shown on invoices
    #[serde(default)]
    pub email: String,
    /// Dialing code that replaces a local trunk `0` when sharing invoices
    #[serde(default = "default_country_code")]
    pub country_code: String,
    /// Prefix of every invoice number
    #[serde(default = "default_invoice_prefix")]
    pub invoice_prefix: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "Rental Desk Event Equipment".to_string(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            country_code: default_country_code(),
            invoice_prefix: default_invoice_prefix(),
        }
    }
}

/// Console settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsoleConfig {
    /// Base URL of the web editor; when empty, detail panels point at `/booking edit`
    #[serde(default)]
    pub editor_base_url: String,
}

fn default_country_code() -> String {
    "62".to_string()
}

fn default_invoice_prefix() -> String {
    "INV-".to_string()
}

/// Loads business configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads ./config.toml, using defaults when the file does not exist.
///
/// # Errors
/// Returns an error only when the file exists but cannot be parsed.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new("config.toml");
    if !path.exists() {
        warn!("config.toml not found; using built-in business defaults");
        return Ok(Config::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_business_config() {
        let toml_str = r#"
            [business]
            name = "Gema Sound & Light"
            address = "Jl. Merdeka 10, Bandung"
            phone = "+62 22 123 456"
            email = "hello@gema.example"

            [console]
            editor_base_url = "https://admin.gema.example"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.business.name, "Gema Sound & Light");
        assert_eq!(config.business.country_code, "62");
        assert_eq!(config.business.invoice_prefix, "INV-");
        assert_eq!(config.console.editor_base_url, "https://admin.gema.example");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.business.country_code, "62");
        assert!(config.console.editor_base_url.is_empty());
    }
}
