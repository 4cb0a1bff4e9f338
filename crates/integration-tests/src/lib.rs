//! Test doubles and builders for driving the checkout pipeline end to end.
//!
//! The pipeline takes its collaborators by injection, so the tests swap the
//! HTTP order client for [`RecordingBackend`] and the payment provider for
//! [`ScriptedGateway`] and assert on the exact calls the pipeline makes.

// Test support code; unwraps abort the test run, which is the point.
#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use covercraft_checkout::cart::{CartAction, CartStore, MemoryStorage, NewItem};
use covercraft_checkout::checkout::{CheckoutForm, CheckoutOptions, CheckoutPipeline};
use covercraft_checkout::coupon::{CouponBook, CouponRule};
use covercraft_checkout::payment::{PaymentError, PaymentGateway, PaymentOutcome, PaymentRequest};
use covercraft_checkout::woocommerce::{
    OrderBackend, OrderRequest, OrderResponse, OrderUpdate, WooError,
};
use covercraft_core::{OrderId, ProductId, VariationId};
use rust_decimal::Decimal;

/// First order id handed out by [`RecordingBackend`].
pub const FIRST_ORDER_ID: i64 = 7000;

/// Install a test-writer tracing subscriber once per process.
///
/// Honors `RUST_LOG`; pipeline warnings (best-effort update failures and
/// the like) show up in failing test output.
pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .init();
    });
}

/// In-memory order backend that records every call.
pub struct RecordingBackend {
    created: Mutex<Vec<OrderRequest>>,
    updates: Mutex<Vec<(OrderId, OrderUpdate)>>,
    fail_create: AtomicBool,
    fail_update: AtomicBool,
    next_id: AtomicI64,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
            fail_create: AtomicBool::new(false),
            fail_update: AtomicBool::new(false),
            next_id: AtomicI64::new(FIRST_ORDER_ID),
        }
    }
}

impl RecordingBackend {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent `create_order` call fail.
    pub fn fail_creates(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    /// Make every subsequent `update_order` call fail.
    pub fn fail_updates(&self) {
        self.fail_update.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn created(&self) -> Vec<OrderRequest> {
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn updates(&self) -> Vec<(OrderId, OrderUpdate)> {
        self.updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl OrderBackend for RecordingBackend {
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResponse, WooError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(WooError::Api("injected create failure".to_owned()));
        }
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order.clone());
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(OrderResponse {
            id: OrderId::new(id),
            status: order.status,
            total: "0.00".to_owned(),
            currency: "INR".to_owned(),
        })
    }

    async fn update_order(
        &self,
        order_id: OrderId,
        update: &OrderUpdate,
    ) -> Result<OrderResponse, WooError> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(WooError::Api("injected update failure".to_owned()));
        }
        self.updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((order_id, update.clone()));
        Ok(OrderResponse {
            id: order_id,
            status: update.status.unwrap_or_default(),
            total: "0.00".to_owned(),
            currency: "INR".to_owned(),
        })
    }
}

/// Payment gateway that records requests and resolves with a preset result.
pub struct ScriptedGateway {
    result: Result<PaymentOutcome, PaymentError>,
    requests: Mutex<Vec<PaymentRequest>>,
}

impl ScriptedGateway {
    fn with(result: Result<PaymentOutcome, PaymentError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Gateway whose payment UI always captures the payment.
    #[must_use]
    pub fn captured(payment_id: &str) -> Arc<Self> {
        Self::with(Ok(PaymentOutcome::Captured {
            payment_id: payment_id.to_owned(),
            provider_order_id: Some(format!("order_{payment_id}")),
            signature: Some("sig_test".to_owned()),
        }))
    }

    /// Gateway whose provider reports a failed payment.
    #[must_use]
    pub fn failed(code: Option<&str>, description: &str) -> Arc<Self> {
        Self::with(Ok(PaymentOutcome::Failed {
            code: code.map(str::to_owned),
            description: description.to_owned(),
        }))
    }

    /// Gateway whose payment UI is dismissed by the customer.
    #[must_use]
    pub fn dismissed() -> Arc<Self> {
        Self::with(Ok(PaymentOutcome::Dismissed))
    }

    /// Gateway that cannot start at all.
    #[must_use]
    pub fn unavailable(message: &str) -> Arc<Self> {
        Self::with(Err(PaymentError::Provider(message.to_owned())))
    }

    #[must_use]
    pub fn requests(&self) -> Vec<PaymentRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn collect(&self, request: &PaymentRequest) -> Result<PaymentOutcome, PaymentError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.result.clone()
    }
}

/// The coupon configuration the storefront ships with.
#[must_use]
pub fn default_coupons() -> CouponBook {
    CouponBook::new(vec![CouponRule {
        code: "CASE10".to_owned(),
        rate: dec("0.10"),
        min_subtotal: dec("499"),
    }])
}

/// A pipeline over a fresh in-memory cart and the given fakes.
#[must_use]
pub fn pipeline(backend: Arc<RecordingBackend>, gateway: Arc<ScriptedGateway>) -> CheckoutPipeline {
    let cart = CartStore::open(Arc::new(MemoryStorage::new()));
    CheckoutPipeline::new(
        cart,
        backend,
        gateway,
        default_coupons(),
        CheckoutOptions::default(),
    )
}

/// Add one phone case to the cart at quantity 1.
pub fn add_case(cart: &CartStore, product_id: i64, variation_id: Option<i64>, price: &str) {
    cart.dispatch(CartAction::Add(NewItem {
        product_id: ProductId::new(product_id),
        variation_id: variation_id.map(VariationId::new),
        name: format!("Case {product_id}"),
        unit_price: dec(price),
        regular_price: dec(price),
        images: vec![],
        attributes: vec![],
    }));
}

/// A form that passes validation.
#[must_use]
pub fn valid_form() -> CheckoutForm {
    CheckoutForm {
        name: "Asha Verma".to_owned(),
        email: "asha@example.com".to_owned(),
        phone: "9876543210".to_owned(),
        whatsapp: "9876543210".to_owned(),
        address: "14 MG Road".to_owned(),
        pincode: "560001".to_owned(),
        city: "Bengaluru".to_owned(),
        state: "Karnataka".to_owned(),
    }
}

/// Parse a decimal literal.
#[must_use]
pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}
