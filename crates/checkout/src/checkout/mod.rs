//! The checkout surface: form validation, pricing, and order placement.

pub mod form;
pub mod pipeline;
pub mod quote;

pub use form::{CheckoutForm, FieldErrors, FormField, INDIAN_STATES};
pub use pipeline::{CheckoutOptions, CheckoutOutcome, CheckoutPipeline};
pub use quote::OrderQuote;
