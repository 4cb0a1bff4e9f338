//! Order placement: from a validated form and a priced cart to a remote
//! order, through the payment provider when the customer pays online.
//!
//! The pipeline owns the sequencing rules:
//!
//! - Cash on delivery creates the order directly in `processing`.
//! - Online payment creates a `pending` order first, hands off to the
//!   provider, then settles the order to `processing`, `failed`, or
//!   `cancelled` depending on the outcome.
//! - Post-payment status updates are best effort: the payment already
//!   happened (or didn't), so a failing update is logged, not surfaced.

use std::sync::Arc;

use chrono::Utc;
use covercraft_core::{
    OrderId, OrderStatus, PaymentMethod, format_amount, to_minor_units, variation_or_zero,
};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use super::form::CheckoutForm;
use super::quote::OrderQuote;
use crate::cart::{CartAction, CartStore, LineItem};
use crate::config::CheckoutConfig;
use crate::coupon::{AppliedCoupon, CouponBook, CouponError};
use crate::error::CheckoutError;
use crate::payment::{PaymentGateway, PaymentOutcome, PaymentPrefill, PaymentRequest};
use crate::woocommerce::{
    Address, FeeLine, MetaData, OrderBackend, OrderLineItem, OrderRequest, OrderUpdate,
    ShippingLine,
};

/// Knobs the pipeline reads from configuration.
#[derive(Debug, Clone)]
pub struct CheckoutOptions {
    /// ISO 4217 currency code for payments.
    pub currency: String,
    /// Store display name used in payment descriptions.
    pub store_name: String,
    /// Surcharge added to cash-on-delivery orders.
    pub cod_surcharge: Decimal,
}

impl Default for CheckoutOptions {
    fn default() -> Self {
        Self {
            currency: "INR".to_owned(),
            store_name: "Covercraft".to_owned(),
            cod_surcharge: Decimal::from(50),
        }
    }
}

impl CheckoutOptions {
    #[must_use]
    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self {
            currency: config.currency.clone(),
            store_name: config.store_name.clone(),
            cod_surcharge: config.cod_surcharge,
        }
    }
}

/// How an order placement attempt ended.
///
/// Both variants carry the remote order id: even a failed online payment
/// leaves an order record behind, marked `failed` or `cancelled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The order is placed; the cart has been cleared.
    Success {
        order_id: OrderId,
        /// Provider payment id for online payments, absent for COD.
        payment_id: Option<String>,
    },
    /// The payment did not complete; the cart is untouched.
    Failure {
        order_id: OrderId,
        reason: String,
        /// True when the customer dismissed the payment UI rather than the
        /// provider reporting a failure.
        cancelled: bool,
    },
}

/// The checkout orchestrator. Cheap to clone; collaborators are injected.
#[derive(Clone)]
pub struct CheckoutPipeline {
    cart: CartStore,
    orders: Arc<dyn OrderBackend>,
    gateway: Arc<dyn PaymentGateway>,
    coupons: CouponBook,
    options: CheckoutOptions,
}

impl std::fmt::Debug for CheckoutPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutPipeline")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl CheckoutPipeline {
    #[must_use]
    pub fn new(
        cart: CartStore,
        orders: Arc<dyn OrderBackend>,
        gateway: Arc<dyn PaymentGateway>,
        coupons: CouponBook,
        options: CheckoutOptions,
    ) -> Self {
        Self {
            cart,
            orders,
            gateway,
            coupons,
            options,
        }
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Validate a coupon code against the current cart subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError`] when the code is unknown, already applied,
    /// or the cart is below the rule's minimum.
    pub fn apply_coupon(
        &self,
        code: &str,
        current: Option<&AppliedCoupon>,
    ) -> Result<AppliedCoupon, CouponError> {
        self.coupons.apply(code, self.cart.subtotal(), current)
    }

    /// Price the current cart under the selected payment method.
    #[must_use]
    pub fn quote(&self, coupon: Option<&AppliedCoupon>, method: PaymentMethod) -> OrderQuote {
        OrderQuote::build(&self.cart.items(), coupon, method, self.options.cod_surcharge)
    }

    /// Place an order for the current cart contents.
    ///
    /// On success the cart is cleared. A failed or dismissed online payment
    /// returns [`CheckoutOutcome::Failure`] with the cart intact so the
    /// customer can retry.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError`] when validation fails, the cart is empty,
    /// the order cannot be created, or the payment provider cannot start.
    #[instrument(skip(self, form, coupon), fields(method = ?method))]
    pub async fn place_order(
        &self,
        form: &CheckoutForm,
        coupon: Option<&AppliedCoupon>,
        method: PaymentMethod,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        form.validate().map_err(CheckoutError::Validation)?;

        let items = self.cart.items();
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let quote = OrderQuote::build(&items, coupon, method, self.options.cod_surcharge);
        let request = build_order_request(form, &items, &quote, coupon, method);

        let order = self.orders.create_order(&request).await?;
        info!(order_id = %order.id, status = %order.status, "order created");

        match method {
            PaymentMethod::CashOnDelivery => {
                self.cart.dispatch(CartAction::Clear);
                Ok(CheckoutOutcome::Success {
                    order_id: order.id,
                    payment_id: None,
                })
            }
            PaymentMethod::Online => self.collect_online_payment(form, &quote, order.id).await,
        }
    }

    async fn collect_online_payment(
        &self,
        form: &CheckoutForm,
        quote: &OrderQuote,
        order_id: OrderId,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let request = PaymentRequest {
            amount_minor: to_minor_units(quote.total)?,
            currency: self.options.currency.clone(),
            description: format!("{} order #{order_id}", self.options.store_name),
            receipt: order_id.to_string(),
            prefill: PaymentPrefill {
                name: form.name.trim().to_owned(),
                email: form.email.trim().to_owned(),
                phone: form.phone.trim().to_owned(),
            },
        };

        // A provider startup failure propagates: the pending order stays
        // behind, but the customer lands back on the form to retry.
        let outcome = self.gateway.collect(&request).await?;

        match outcome {
            PaymentOutcome::Captured {
                payment_id,
                provider_order_id,
                signature,
            } => {
                let mut meta = vec![
                    MetaData::new("razorpay_payment_id", payment_id.clone()),
                    MetaData::new("paid_at", Utc::now().to_rfc3339()),
                ];
                if let Some(provider_order_id) = provider_order_id {
                    meta.push(MetaData::new("razorpay_order_id", provider_order_id));
                }
                if let Some(signature) = signature {
                    meta.push(MetaData::new("razorpay_signature", signature));
                }
                self.best_effort_update(
                    order_id,
                    &OrderUpdate {
                        status: Some(OrderStatus::Processing),
                        meta_data: meta,
                    },
                    "mark paid order processing",
                )
                .await;

                self.cart.dispatch(CartAction::Clear);
                Ok(CheckoutOutcome::Success {
                    order_id,
                    payment_id: Some(payment_id),
                })
            }
            PaymentOutcome::Failed { code, description } => {
                let mut meta = vec![MetaData::new("payment_error", description.clone())];
                if let Some(code) = code {
                    meta.push(MetaData::new("payment_error_code", code));
                }
                self.best_effort_update(
                    order_id,
                    &OrderUpdate {
                        status: Some(OrderStatus::Failed),
                        meta_data: meta,
                    },
                    "mark order failed",
                )
                .await;

                Ok(CheckoutOutcome::Failure {
                    order_id,
                    reason: description,
                    cancelled: false,
                })
            }
            PaymentOutcome::Dismissed => {
                self.best_effort_update(
                    order_id,
                    &OrderUpdate {
                        status: Some(OrderStatus::Cancelled),
                        meta_data: vec![],
                    },
                    "mark abandoned order cancelled",
                )
                .await;

                Ok(CheckoutOutcome::Failure {
                    order_id,
                    reason: "Payment cancelled by user".to_owned(),
                    cancelled: true,
                })
            }
        }
    }

    /// Apply a post-payment status update, logging instead of failing.
    ///
    /// By this point the payment outcome is already settled; a failed
    /// update leaves the order record stale but must not change what the
    /// customer is told.
    async fn best_effort_update(&self, order_id: OrderId, update: &OrderUpdate, context: &str) {
        if let Err(e) = self.orders.update_order(order_id, update).await {
            warn!(order_id = %order_id, error = %e, "failed to {context}");
        }
    }
}

/// Assemble the order creation payload.
fn build_order_request(
    form: &CheckoutForm,
    items: &[LineItem],
    quote: &OrderQuote,
    coupon: Option<&AppliedCoupon>,
    method: PaymentMethod,
) -> OrderRequest {
    let (first_name, last_name) = form.split_name();

    let billing = Address {
        first_name,
        last_name,
        address_1: form.address.trim().to_owned(),
        city: form.city.trim().to_owned(),
        state: form.state.trim().to_owned(),
        postcode: form.pincode.trim().to_owned(),
        country: "IN".to_owned(),
        email: Some(form.email.trim().to_owned()),
        phone: Some(form.phone.trim().to_owned()),
    };
    let shipping = Address {
        email: None,
        phone: None,
        ..billing.clone()
    };

    let line_items = items
        .iter()
        .map(|item| OrderLineItem {
            product_id: item.product_id.as_i64(),
            variation_id: variation_or_zero(item.variation_id),
            quantity: item.quantity,
        })
        .collect();

    // The discount rides as a negative fee so the store's own totals stay
    // consistent with what the customer was shown.
    let fee_lines = coupon
        .filter(|_| quote.coupon_discount > Decimal::ZERO)
        .map(|applied| {
            vec![FeeLine {
                name: format!("Coupon {}", applied.code()),
                total: format_amount(-quote.coupon_discount),
            }]
        })
        .unwrap_or_default();

    let shipping_lines = match method {
        PaymentMethod::CashOnDelivery => vec![ShippingLine {
            method_id: "cod_fee".to_owned(),
            method_title: "Cash on Delivery Charges".to_owned(),
            total: format_amount(quote.cod_surcharge),
        }],
        PaymentMethod::Online => vec![],
    };

    let mut meta_data = vec![
        MetaData::new("whatsapp_number", form.whatsapp.trim()),
        MetaData::new("full_address", form.full_address()),
        MetaData::new("user_type", "guest"),
    ];
    if let Some(applied) = coupon {
        meta_data.push(MetaData::new("coupon_code", applied.code()));
        meta_data.push(MetaData::new(
            "coupon_discount",
            format_amount(quote.coupon_discount),
        ));
    }
    if method == PaymentMethod::CashOnDelivery {
        meta_data.push(MetaData::new(
            "cod_charges",
            format_amount(quote.cod_surcharge),
        ));
    }

    OrderRequest {
        payment_method: method.wire_id().to_owned(),
        payment_method_title: method.title().to_owned(),
        // COD needs no payment step, so the order starts in fulfillment.
        status: match method {
            PaymentMethod::Online => OrderStatus::Pending,
            PaymentMethod::CashOnDelivery => OrderStatus::Processing,
        },
        billing,
        shipping,
        line_items,
        fee_lines,
        shipping_lines,
        meta_data,
        customer_note: None,
    }
}
