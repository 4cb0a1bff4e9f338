//! Checkout configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `WOOCOMMERCE_STORE_URL` - Base URL of the WooCommerce store
//! - `WOOCOMMERCE_CONSUMER_KEY` - REST API consumer key
//! - `WOOCOMMERCE_CONSUMER_SECRET` - REST API consumer secret
//! - `RAZORPAY_KEY_ID` - Payment provider key id (safe to expose in browser)
//! - `RAZORPAY_KEY_SECRET` - Payment provider key secret (server-side only)
//!
//! ## Optional
//! - `CHECKOUT_CURRENCY` - ISO 4217 currency code (default: INR)
//! - `CHECKOUT_STORE_NAME` - Display name in payment descriptions (default: Covercraft)
//! - `CHECKOUT_COD_SURCHARGE` - Cash-on-delivery surcharge (default: 50)
//! - `CHECKOUT_COUPON_CODE` - Coupon code (default: CASE10)
//! - `CHECKOUT_COUPON_RATE` - Coupon rate as a fraction (default: 0.10)
//! - `CHECKOUT_COUPON_MIN_SUBTOTAL` - Coupon gate (default: 499)
//! - `CHECKOUT_CART_DIR` - Directory for cart snapshots (default: .covercraft)

use std::path::PathBuf;

use covercraft_core::parse_amount;
use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

use crate::coupon::CouponRule;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Checkout application configuration.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Order-management API configuration.
    pub order_api: OrderApiConfig,
    /// Payment provider configuration.
    pub payment: PaymentProviderConfig,
    /// The configured coupon rule.
    pub coupon: CouponRule,
    /// Surcharge applied to cash-on-delivery orders.
    pub cod_surcharge: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Store display name used in payment descriptions.
    pub store_name: String,
    /// Directory holding the persisted cart snapshot.
    pub cart_dir: PathBuf,
}

/// WooCommerce REST API configuration.
///
/// Implements `Debug` manually to redact the consumer secret.
#[derive(Clone)]
pub struct OrderApiConfig {
    /// Base URL of the store (e.g. <https://shop.covercraft.in>).
    pub store_url: String,
    /// REST API consumer key.
    pub consumer_key: String,
    /// REST API consumer secret.
    pub consumer_secret: SecretString,
}

impl std::fmt::Debug for OrderApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderApiConfig")
            .field("store_url", &self.store_url)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}

/// Payment provider credentials.
///
/// The key id is embedded in the browser SDK options; the secret stays
/// server-side for callback signature verification.
#[derive(Clone)]
pub struct PaymentProviderConfig {
    pub key_id: String,
    pub key_secret: SecretString,
}

impl std::fmt::Debug for PaymentProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentProviderConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .finish()
    }
}

impl CheckoutConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let order_api = OrderApiConfig::from_env()?;
        let payment = PaymentProviderConfig::from_env()?;

        let coupon = CouponRule {
            code: get_env_or_default("CHECKOUT_COUPON_CODE", "CASE10"),
            rate: get_decimal_or_default("CHECKOUT_COUPON_RATE", "0.10")?,
            min_subtotal: get_decimal_or_default("CHECKOUT_COUPON_MIN_SUBTOTAL", "499")?,
        };

        Ok(Self {
            order_api,
            payment,
            coupon,
            cod_surcharge: get_decimal_or_default("CHECKOUT_COD_SURCHARGE", "50")?,
            currency: get_env_or_default("CHECKOUT_CURRENCY", "INR"),
            store_name: get_env_or_default("CHECKOUT_STORE_NAME", "Covercraft"),
            cart_dir: PathBuf::from(get_env_or_default("CHECKOUT_CART_DIR", ".covercraft")),
        })
    }
}

impl OrderApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let store_url = get_required_env("WOOCOMMERCE_STORE_URL")?;
        validate_store_url(&store_url)?;

        Ok(Self {
            store_url,
            consumer_key: get_required_env("WOOCOMMERCE_CONSUMER_KEY")?,
            consumer_secret: get_required_secret("WOOCOMMERCE_CONSUMER_SECRET")?,
        })
    }
}

impl PaymentProviderConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            key_id: get_required_env("RAZORPAY_KEY_ID")?,
            key_secret: get_required_secret("RAZORPAY_KEY_SECRET")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable as a non-negative decimal amount, falling
/// back to a default.
fn get_decimal_or_default(key: &str, default: &str) -> Result<Decimal, ConfigError> {
    let raw = get_env_or_default(key, default);
    parse_amount(&raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Validate that the store URL parses as an absolute http(s) URL.
fn validate_store_url(store_url: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(store_url).map_err(|e| {
        ConfigError::InvalidEnvVar("WOOCOMMERCE_STORE_URL".to_string(), e.to_string())
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "WOOCOMMERCE_STORE_URL".to_string(),
            format!("unsupported scheme: {}", parsed.scheme()),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_store_url() {
        assert!(validate_store_url("https://shop.covercraft.in").is_ok());
        assert!(validate_store_url("http://localhost:8080").is_ok());
        assert!(validate_store_url("not a url").is_err());
        assert!(validate_store_url("ftp://shop.covercraft.in").is_err());
    }

    #[test]
    fn test_decimal_env_rejects_bad_amounts() {
        // The key is unset, so the default is what gets parsed.
        let key = "COVERCRAFT_TEST_UNSET_DECIMAL";
        assert_eq!(
            get_decimal_or_default(key, "50").unwrap(),
            Decimal::from(50)
        );
        assert_eq!(
            get_decimal_or_default(key, "0.10").unwrap(),
            "0.10".parse::<Decimal>().unwrap()
        );
        assert!(get_decimal_or_default(key, "-5").is_err());
        assert!(get_decimal_or_default(key, "ten").is_err());
        assert!(get_decimal_or_default(key, "").is_err());
    }

    #[test]
    fn test_order_api_debug_redacts_secret() {
        let config = OrderApiConfig {
            store_url: "https://shop.covercraft.in".to_owned(),
            consumer_key: "ck_visible".to_owned(),
            consumer_secret: SecretString::from("cs_very_secret"),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("ck_visible"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("cs_very_secret"));
    }

    #[test]
    fn test_payment_debug_redacts_secret() {
        let config = PaymentProviderConfig {
            key_id: "rzp_test_key".to_owned(),
            key_secret: SecretString::from("rzp_secret_value"),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("rzp_test_key"));
        assert!(!debug_output.contains("rzp_secret_value"));
    }
}
