//! WooCommerce order-management API client.
//!
//! # Architecture
//!
//! - REST over Basic Auth (consumer key/secret) against `/wp-json/wc/v3`
//! - The store is source of truth for orders - no local sync, direct calls
//! - The pipeline talks to the [`OrderBackend`] trait so tests can swap the
//!   HTTP client for an in-memory fake

pub mod client;
pub mod types;

pub use client::WooClient;
pub use types::{
    Address, FeeLine, MetaData, OrderLineItem, OrderRequest, OrderResponse, OrderUpdate,
    ShippingLine,
};

use async_trait::async_trait;
use covercraft_core::OrderId;
use thiserror::Error;

/// Errors that can occur when talking to the order API.
#[derive(Debug, Error)]
pub enum WooError {
    /// HTTP request failed before a response arrived.
    #[error("order API request failed: {0}")]
    Request(String),

    /// The response body could not be parsed.
    #[error("order API response error: {0}")]
    Response(String),

    /// The API returned an error payload.
    #[error("order API error: {0}")]
    Api(String),

    /// Credentials were rejected.
    #[error("order API rejected the credentials; check the consumer key and secret")]
    Unauthorized,

    /// The endpoint does not exist.
    #[error("order API endpoint not found; check the store URL")]
    NotFound,
}

/// Seam between the checkout pipeline and the order-management API.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Create a new order record.
    ///
    /// # Errors
    ///
    /// Returns [`WooError`] if the request fails or the API rejects it.
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResponse, WooError>;

    /// Update an existing order's status and/or metadata.
    ///
    /// # Errors
    ///
    /// Returns [`WooError`] if the request fails or the API rejects it.
    async fn update_order(
        &self,
        order_id: OrderId,
        update: &OrderUpdate,
    ) -> Result<OrderResponse, WooError>;
}
