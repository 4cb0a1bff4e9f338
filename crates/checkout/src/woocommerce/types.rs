//! Wire types mirroring the WooCommerce REST v3 order schema.
//!
//! Only the fields this storefront reads and writes are modeled; the API
//! tolerates the rest being absent. Monetary fields are decimal strings on
//! the wire, produced via [`covercraft_core::format_amount`].

use covercraft_core::{OrderId, OrderStatus};
use serde::{Deserialize, Serialize};

/// A billing or shipping address block.
///
/// WooCommerce only stores `email`/`phone` on the billing copy; the
/// shipping copy leaves them off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub address_1: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// One purchasable line on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_id: i64,
    /// 0 for simple products, per the API's convention.
    pub variation_id: i64,
    pub quantity: u32,
}

/// An arbitrary fee; the coupon discount rides as a negative total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLine {
    pub name: String,
    pub total: String,
}

/// A shipping line; the COD surcharge is modeled as one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingLine {
    pub method_id: String,
    pub method_title: String,
    pub total: String,
}

/// Free-form order metadata entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaData {
    pub key: String,
    pub value: String,
}

impl MetaData {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub payment_method: String,
    pub payment_method_title: String,
    pub status: OrderStatus,
    pub billing: Address,
    pub shipping: Address,
    pub line_items: Vec<OrderLineItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fee_lines: Vec<FeeLine>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shipping_lines: Vec<ShippingLine>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,
}

/// Body of `PUT /orders/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
}

/// The slice of the order the API echoes back that this storefront uses.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total: String,
    pub currency: String,
}

/// WooCommerce's structured error payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_request_wire_shape() {
        let request = OrderRequest {
            payment_method: "razorpay".to_owned(),
            payment_method_title: "Online Payment (Razorpay)".to_owned(),
            status: OrderStatus::Pending,
            billing: Address {
                first_name: "Asha".to_owned(),
                last_name: "Verma".to_owned(),
                address_1: "14 MG Road".to_owned(),
                city: "Bengaluru".to_owned(),
                state: "Karnataka".to_owned(),
                postcode: "560001".to_owned(),
                country: "IN".to_owned(),
                email: Some("asha@example.com".to_owned()),
                phone: Some("9876543210".to_owned()),
            },
            shipping: Address::default(),
            line_items: vec![OrderLineItem {
                product_id: 1,
                variation_id: 0,
                quantity: 2,
            }],
            fee_lines: vec![FeeLine {
                name: "Coupon CASE10".to_owned(),
                total: "-100.00".to_owned(),
            }],
            shipping_lines: vec![],
            meta_data: vec![MetaData::new("whatsapp_number", "9876543210")],
            customer_note: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["line_items"][0]["variation_id"], 0);
        assert_eq!(json["fee_lines"][0]["total"], "-100.00");
        assert!(json.get("shipping_lines").is_none());
        assert!(json.get("customer_note").is_none());
    }

    #[test]
    fn test_order_update_skips_absent_fields() {
        let update = OrderUpdate {
            status: Some(OrderStatus::Processing),
            meta_data: vec![],
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["status"], "processing");
        assert!(json.get("meta_data").is_none());
    }

    #[test]
    fn test_order_response_parses_api_payload() {
        let raw = r#"{
            "id": 7214,
            "status": "pending",
            "currency": "INR",
            "total": "1050.00",
            "payment_method": "cod",
            "date_created": "2025-02-03T10:15:00"
        }"#;
        let order: OrderResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(order.id, OrderId::new(7214));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, "1050.00");
        assert_eq!(order.currency, "INR");
    }
}
