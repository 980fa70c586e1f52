//! # Register Configuration
//!
//! Configuration for one register, loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLY_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no locking is needed. If hot
//! reloading is ever added, wrap in `RwLock` then.

use serde::{Deserialize, Serialize};

use tally_core::TaxRate;

/// Default tax rate: 10%, in basis points.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1000;

/// Per-register configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterConfig {
    /// Store name (for receipts and transaction sinks).
    pub store_name: String,

    /// Currency symbol (for display).
    pub currency_symbol: String,

    /// Number of decimal places for currency display.
    pub currency_decimals: u8,

    /// Tax rate in basis points, e.g. 1000 = 10%.
    pub tax_rate_bps: u32,
}

impl Default for RegisterConfig {
    /// Defaults suitable for development: USD formatting, 10% tax.
    fn default() -> Self {
        RegisterConfig {
            store_name: "Tally POS Store".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
        }
    }
}

impl RegisterConfig {
    /// Creates a RegisterConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TALLY_STORE_NAME`: Override store name
    /// - `TALLY_TAX_RATE`: Override tax rate as a percentage (e.g. "8.25")
    pub fn from_env() -> Self {
        let mut config = RegisterConfig::default();

        if let Ok(store_name) = std::env::var("TALLY_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(tax_rate_str) = std::env::var("TALLY_TAX_RATE") {
            if let Ok(rate) = tax_rate_str.parse::<f64>() {
                config.tax_rate_bps = (rate * 100.0).round() as u32;
            }
        }

        config
    }

    /// The configured tax rate as the core type.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use tally_register::config::RegisterConfig;
    ///
    /// let config = RegisterConfig::default();
    /// assert_eq!(config.format_currency(148_203), "$1482.03");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tax_rate_is_ten_percent() {
        let config = RegisterConfig::default();
        assert_eq!(config.tax_rate_bps, 1000);
        assert!((config.tax_rate().percentage() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_format_currency_positive() {
        let config = RegisterConfig::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(100), "$1.00");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = RegisterConfig::default();
        assert_eq!(config.format_currency(-1234), "-$12.34");
    }

    #[test]
    fn test_format_currency_no_decimals() {
        let config = RegisterConfig {
            currency_decimals: 0,
            ..RegisterConfig::default()
        };
        assert_eq!(config.format_currency(1234), "$1234");
    }
}
