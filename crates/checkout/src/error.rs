//! Umbrella error for the checkout crate.

use thiserror::Error;

use covercraft_core::AmountError;

use crate::checkout::FieldErrors;
use crate::coupon::CouponError;
use crate::payment::PaymentError;
use crate::woocommerce::WooError;

/// Anything that can stop an order from being placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The form failed validation; no remote call was made.
    #[error("form validation failed")]
    Validation(FieldErrors),

    /// The cart has no items to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A coupon code was rejected.
    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// The order API call failed.
    #[error(transparent)]
    Orders(#[from] WooError),

    /// The payment provider could not be started.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// A monetary amount could not be converted for the provider.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

impl CheckoutError {
    /// A short message suitable for showing to the customer.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => "Please fix the highlighted fields".to_owned(),
            Self::EmptyCart => "Your cart is empty".to_owned(),
            Self::Coupon(e) => e.to_string(),
            Self::Orders(_) | Self::Amount(_) => {
                "Could not place the order. Please try again.".to_owned()
            }
            Self::Payment(_) => "Could not start the payment. Please try again.".to_owned(),
        }
    }
}
