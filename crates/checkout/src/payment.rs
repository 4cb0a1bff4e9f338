//! Payment-provider seam.
//!
//! This crate never processes payments itself: the provider's browser SDK
//! collects the payment and reports back through one of three callbacks.
//! [`PaymentGateway`] models that contract as a single async call returning
//! a closed [`PaymentOutcome`], so the pipeline can be driven by the real
//! provider wiring in production and by a scripted gateway in tests.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while handing the payment off to the provider.
///
/// These are initialization failures (SDK not reachable, rejected key,
/// malformed request) - a declined or abandoned payment is not an error but
/// a [`PaymentOutcome`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The provider could not be initialized or reached.
    #[error("payment provider error: {0}")]
    Provider(String),
}

/// Customer details prefilled into the provider's payment UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentPrefill {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Everything the provider needs to collect one payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    /// Amount in the provider's minor currency unit (paise for INR).
    pub amount_minor: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Human-readable description shown in the payment UI.
    pub description: String,
    /// Merchant-side reference, the remote order id.
    pub receipt: String,
    pub prefill: PaymentPrefill,
}

/// The provider's three callbacks as a closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Payment captured; identifiers are attached to the remote order.
    Captured {
        payment_id: String,
        provider_order_id: Option<String>,
        signature: Option<String>,
    },
    /// The provider reported a failed payment.
    Failed {
        code: Option<String>,
        description: String,
    },
    /// The customer dismissed the payment UI without paying.
    Dismissed,
}

/// Seam between the checkout pipeline and the payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Present the payment UI for `request` and resolve with the provider's
    /// callback.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError`] only when the provider could not be
    /// initialized; declined and abandoned payments resolve as outcomes.
    async fn collect(&self, request: &PaymentRequest) -> Result<PaymentOutcome, PaymentError>;
}
