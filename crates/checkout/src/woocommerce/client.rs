//! HTTP implementation of the order API.

use async_trait::async_trait;
use covercraft_core::OrderId;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, instrument};

use super::types::{ApiErrorBody, OrderRequest, OrderResponse, OrderUpdate};
use super::{OrderBackend, WooError};
use crate::config::OrderApiConfig;

/// How much of an unparseable error body to keep in the error message.
const ERROR_EXCERPT_LEN: usize = 200;

/// Client for the WooCommerce REST v3 orders endpoint.
#[derive(Clone)]
pub struct WooClient {
    client: Client,
    orders_endpoint: String,
    consumer_key: String,
    consumer_secret: SecretString,
}

impl std::fmt::Debug for WooClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooClient")
            .field("orders_endpoint", &self.orders_endpoint)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl WooClient {
    /// Create a new order API client.
    #[must_use]
    pub fn new(config: &OrderApiConfig) -> Self {
        Self {
            client: Client::new(),
            orders_endpoint: orders_endpoint(&config.store_url),
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
        }
    }

    async fn send_json(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<OrderResponse, WooError> {
        let response = request
            .basic_auth(&self.consumer_key, Some(self.consumer_secret.expose_secret()))
            .send()
            .await
            .map_err(|e| WooError::Request(e.to_string()))?;

        let status = response.status();

        // 401/404 are configuration problems, not order problems; map them
        // to messages a store operator can act on.
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(WooError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(WooError::NotFound);
        }

        // Read the body as text first for better error diagnostics.
        let body = response
            .text()
            .await
            .map_err(|e| WooError::Response(e.to_string()))?;

        if !status.is_success() {
            error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "order API returned non-success status"
            );
            let message = serde_json::from_str::<ApiErrorBody>(&body).map_or_else(
                |_| {
                    format!(
                        "HTTP {status}: {}",
                        body.chars().take(ERROR_EXCERPT_LEN).collect::<String>()
                    )
                },
                |api_error| api_error.message,
            );
            return Err(WooError::Api(message));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse order API response"
            );
            WooError::Response(e.to_string())
        })
    }
}

#[async_trait]
impl OrderBackend for WooClient {
    #[instrument(skip(self, order), fields(status = %order.status))]
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResponse, WooError> {
        let created = self
            .send_json(self.client.post(&self.orders_endpoint).json(order))
            .await?;
        debug!(order_id = %created.id, "remote order created");
        Ok(created)
    }

    #[instrument(skip(self, update), fields(order_id = %order_id))]
    async fn update_order(
        &self,
        order_id: OrderId,
        update: &OrderUpdate,
    ) -> Result<OrderResponse, WooError> {
        let url = format!("{}/{order_id}", self.orders_endpoint);
        let updated = self.send_json(self.client.put(url).json(update)).await?;
        debug!(order_id = %updated.id, status = %updated.status, "remote order updated");
        Ok(updated)
    }
}

/// Build the orders endpoint from the configured store URL.
fn orders_endpoint(store_url: &str) -> String {
    format!("{}/wp-json/wc/v3/orders", store_url.trim_end_matches('/'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_endpoint_trims_trailing_slash() {
        assert_eq!(
            orders_endpoint("https://shop.covercraft.in/"),
            "https://shop.covercraft.in/wp-json/wc/v3/orders"
        );
        assert_eq!(
            orders_endpoint("https://shop.covercraft.in"),
            "https://shop.covercraft.in/wp-json/wc/v3/orders"
        );
    }

    #[test]
    fn test_debug_redacts_consumer_secret() {
        let client = WooClient::new(&OrderApiConfig {
            store_url: "https://shop.covercraft.in".to_owned(),
            consumer_key: "ck_test".to_owned(),
            consumer_secret: SecretString::from("cs_super_secret"),
        });
        let debug_output = format!("{client:?}");
        assert!(debug_output.contains("ck_test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("cs_super_secret"));
    }
}
