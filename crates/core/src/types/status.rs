//! Status enums for orders and payments.

use serde::{Deserialize, Serialize};

/// Order status.
///
/// Maps to the WooCommerce order status vocabulary. The checkout pipeline
/// only moves orders through `Pending`, `Processing`, `Failed` and
/// `Cancelled`; the remaining values show up when reading orders back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
}

impl OrderStatus {
    /// The wire value the order API expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
            Self::Failed => "failed",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Online payment through the payment provider.
    Online,
    /// Cash on delivery; no provider round trip, a surcharge applies.
    CashOnDelivery,
}

impl PaymentMethod {
    /// The `payment_method` identifier the order API expects.
    #[must_use]
    pub const fn wire_id(self) -> &'static str {
        match self {
            Self::Online => "razorpay",
            Self::CashOnDelivery => "cod",
        }
    }

    /// Human-readable title stored alongside the order.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Online => "Online Payment (Razorpay)",
            Self::CashOnDelivery => "Cash on Delivery",
        }
    }
}
