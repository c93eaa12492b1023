//! Storefront configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable               | Default                |
//! |------------------------|------------------------|
//! | `STOREFRONT_PORT`      | `3000`                 |
//! | `DATABASE_PATH`        | `./dailydose.db`       |
//! | `SESSION_SECRET`       | development secret     |
//! | `STORE_NAME`           | `Daily Dose`           |
//! | `SHIPPING_FEE`         | `3.99`                 |
//! | `TAX_RATE_BPS`         | `800`                  |
//! | `CHECKOUT_LINE_POLICY` | `skip-and-continue`    |

use std::env;
use std::str::FromStr;

use dailydose_core::{
    Money, PricingPolicy, TaxRate, DEFAULT_SHIPPING_MINOR, DEFAULT_TAX_RATE_BPS,
};

use crate::checkout::LinePolicy;

/// Secret used when `SESSION_SECRET` is unset. Local development only.
pub const DEV_SESSION_SECRET: &str = "dailydose-dev-secret-change-in-production";

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Shared HS256 secret of the auth provider
    pub session_secret: String,

    /// Logged at startup
    pub store_name: String,

    /// Flat shipping fee per order
    pub shipping: Money,

    /// Sales tax
    pub tax_rate: TaxRate,

    /// What the stock stage does when a line fails
    pub line_policy: LinePolicy,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_shipping = Money::from_minor(DEFAULT_SHIPPING_MINOR).to_string();

        let config = StorefrontConfig {
            port: lookup("STOREFRONT_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_PORT".to_string()))?,

            database_path: lookup("DATABASE_PATH")
                .unwrap_or_else(|| "./dailydose.db".to_string()),

            session_secret: lookup("SESSION_SECRET")
                .unwrap_or_else(|| DEV_SESSION_SECRET.to_string()),

            store_name: lookup("STORE_NAME").unwrap_or_else(|| "Daily Dose".to_string()),

            shipping: Money::from_str(
                lookup("SHIPPING_FEE")
                    .unwrap_or(default_shipping)
                    .trim()
                    .trim_start_matches('$'),
            )
            .map_err(|_| ConfigError::InvalidValue("SHIPPING_FEE".to_string()))?,

            tax_rate: TaxRate::from_bps(
                lookup("TAX_RATE_BPS")
                    .unwrap_or_else(|| DEFAULT_TAX_RATE_BPS.to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("TAX_RATE_BPS".to_string()))?,
            ),

            line_policy: lookup("CHECKOUT_LINE_POLICY")
                .map(|raw| raw.parse())
                .transpose()
                .map_err(|_| ConfigError::InvalidValue("CHECKOUT_LINE_POLICY".to_string()))?
                .unwrap_or_default(),
        };

        if config.shipping.is_negative() {
            return Err(ConfigError::InvalidValue("SHIPPING_FEE".to_string()));
        }
        if config.session_secret.trim().is_empty() {
            return Err(ConfigError::MissingRequired("SESSION_SECRET".to_string()));
        }

        Ok(config)
    }

    /// The checkout price policy built from the shipping and tax settings.
    pub fn pricing(&self) -> PricingPolicy {
        PricingPolicy::new(self.shipping, self.tax_rate)
    }

    /// Whether the built-in development secret is in use.
    pub fn uses_dev_secret(&self) -> bool {
        self.session_secret == DEV_SESSION_SECRET
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.database_path, "./dailydose.db");
        assert_eq!(config.store_name, "Daily Dose");
        assert_eq!(config.shipping, Money::from_minor(399));
        assert_eq!(config.tax_rate, TaxRate::from_bps(800));
        assert_eq!(config.line_policy, LinePolicy::SkipAndContinue);
        assert!(config.uses_dev_secret());
        assert_eq!(config.pricing(), PricingPolicy::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_PORT", "8080"),
            ("SHIPPING_FEE", "$4.50"),
            ("TAX_RATE_BPS", "725"),
            ("CHECKOUT_LINE_POLICY", "abort-all"),
            ("SESSION_SECRET", "s3cret"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.shipping, Money::from_minor(450));
        assert_eq!(config.tax_rate.bps(), 725);
        assert_eq!(config.line_policy, LinePolicy::AbortAll);
        assert!(!config.uses_dev_secret());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("STOREFRONT_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "STOREFRONT_PORT"
        ));
        assert!(matches!(
            load(&[("SHIPPING_FEE", "-1")]),
            Err(ConfigError::InvalidValue(key)) if key == "SHIPPING_FEE"
        ));
        assert!(matches!(
            load(&[("CHECKOUT_LINE_POLICY", "retry")]),
            Err(ConfigError::InvalidValue(key)) if key == "CHECKOUT_LINE_POLICY"
        ));
        assert!(matches!(
            load(&[("SESSION_SECRET", "  ")]),
            Err(ConfigError::MissingRequired(_))
        ));
    }
}
