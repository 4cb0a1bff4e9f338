//! Coupon rules and the apply/remove protocol.
//!
//! Rules are configuration data, not code: the shipped configuration has a
//! single percentage coupon gated on a minimum subtotal, but the protocol
//! (validate, apply, report, remove) is the same for any number of rules.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced when a coupon code is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CouponError {
    /// The code does not match any configured rule.
    #[error("coupon {code:?} is not valid")]
    Unknown { code: String },
    /// The cart subtotal is below the rule's gate.
    #[error("coupon requires a minimum order of {min}")]
    BelowMinimum { min: Decimal },
    /// The same code is already applied to this checkout.
    #[error("coupon {code:?} is already applied")]
    AlreadyApplied { code: String },
}

/// One configured coupon: a code granting a percentage discount, gated on a
/// minimum subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponRule {
    pub code: String,
    /// Discount rate as a fraction (0.10 = 10% off).
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    /// Minimum subtotal required before the coupon is accepted.
    #[serde(with = "rust_decimal::serde::str")]
    pub min_subtotal: Decimal,
}

/// The set of configured coupon rules.
#[derive(Debug, Clone, Default)]
pub struct CouponBook {
    rules: Vec<CouponRule>,
}

/// A coupon accepted against the current checkout.
///
/// Carries the rate rather than a frozen discount so the amount tracks the
/// cart if it changes between apply and order placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCoupon {
    code: String,
    rate: Decimal,
}

impl AppliedCoupon {
    /// The applied code, normalized to the configured spelling.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The discount this coupon grants against `subtotal`, rounded to whole
    /// currency units (midpoint away from zero).
    #[must_use]
    pub fn discount_for(&self, subtotal: Decimal) -> Decimal {
        (subtotal * self.rate).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl CouponBook {
    #[must_use]
    pub fn new(rules: Vec<CouponRule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[CouponRule] {
        &self.rules
    }

    /// Validate `code` against the configured rules and the current
    /// subtotal.
    ///
    /// Matching is case-insensitive on a trimmed code. Removing a coupon is
    /// simply dropping the returned [`AppliedCoupon`]; re-applying the code
    /// already held in `current` is rejected as [`CouponError::AlreadyApplied`].
    ///
    /// # Errors
    ///
    /// Returns [`CouponError`] when the code is unknown, already applied, or
    /// the subtotal is below the rule's minimum.
    pub fn apply(
        &self,
        code: &str,
        subtotal: Decimal,
        current: Option<&AppliedCoupon>,
    ) -> Result<AppliedCoupon, CouponError> {
        let entered = code.trim();

        let rule = self
            .rules
            .iter()
            .find(|rule| rule.code.eq_ignore_ascii_case(entered))
            .ok_or_else(|| CouponError::Unknown {
                code: entered.to_owned(),
            })?;

        if let Some(applied) = current
            && applied.code.eq_ignore_ascii_case(entered)
        {
            return Err(CouponError::AlreadyApplied {
                code: rule.code.clone(),
            });
        }

        if subtotal < rule.min_subtotal {
            return Err(CouponError::BelowMinimum {
                min: rule.min_subtotal,
            });
        }

        Ok(AppliedCoupon {
            code: rule.code.clone(),
            rate: rule.rate,
        })
    }
}
