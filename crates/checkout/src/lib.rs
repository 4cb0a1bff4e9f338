//! Covercraft checkout core.
//!
//! This crate is the engine behind the Covercraft storefront's cart and
//! checkout: an in-memory, reducer-driven cart store with key-value
//! persistence, and a sequential order-assembly pipeline that talks to a
//! WooCommerce-style order API and a Razorpay-style payment provider.
//!
//! The UI layer is an external collaborator: it dispatches [`cart::CartAction`]s
//! into the [`cart::CartStore`], hands a filled [`checkout::CheckoutForm`] to the
//! [`checkout::CheckoutPipeline`], and renders whatever
//! [`checkout::CheckoutOutcome`] comes back.
//!
//! # Architecture
//!
//! - Cart mutations are synchronous reductions over a closed action set
//! - Persistence is best-effort: storage failures are logged, never surfaced
//! - Remote calls are strictly sequential, one attempt per step, no retries
//! - Cleanup status updates are best-effort and never block the user-facing
//!   outcome

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod coupon;
pub mod error;
pub mod payment;
pub mod woocommerce;

pub use error::CheckoutError;
