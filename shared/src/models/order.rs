//! Order Model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Order workflow status
///
/// Every transition among the three states is allowed; `delivered` can be
/// reverted by staff as an administrative correction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [Self::Pending, Self::Preparing, Self::Delivered];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Delivered => "delivered",
        }
    }

    /// Exact, case-sensitive match against the stored names.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Requests
// =============================================================================

/// One requested line: product code + quantity
///
/// `quantity` stays a raw JSON value so that non-integral or non-numeric
/// input is reported as an order validation error instead of a body
/// rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub quantity: Value,
}

/// POST /pedidos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<OrderLineRequest>,
    pub comment: Option<String>,
}

/// PATCH /pedidos/{id}/items/{item_id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItemQuantityRequest {
    #[serde(default)]
    pub quantity: Value,
}

/// PATCH /pedidos/{id}/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Value,
}

/// GET /pedidos query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub ok: bool,
    pub order_id: i64,
    pub total: f64,
    pub status: OrderStatus,
    pub user_id: Option<String>,
}

/// Order header as stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i64,
    pub user_id: Option<String>,
    pub status: OrderStatus,
    pub total: f64,
    pub comment: Option<String>,
    pub created_at: String,
}

/// Order line
///
/// `product_name` / `product_info` are only filled by the details endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_code: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub subtotal: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_info: Option<String>,
}

/// Order with its lines and the display name of the ordering client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub client_name: String,
    pub items: Vec<OrderItem>,
}

/// Staff listing: `{ data, total, page, per_page }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub data: Vec<OrderDetail>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemQuantity {
    pub id: i64,
    pub quantity: i32,
    pub subtotal: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItemQuantityResponse {
    pub ok: bool,
    pub item: ItemQuantity,
    #[serde(rename = "orderTotal")]
    pub order_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusResponse {
    pub ok: bool,
    pub pedido: Order,
}

/// Row of "my orders" in the account area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: i64,
    pub created_at: String,
    pub total: f64,
    pub status: OrderStatus,
    pub items_count: i64,
}

/// Line of one of the caller's own orders, with product name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountOrderItem {
    pub id: i64,
    pub product_code: String,
    pub name: Option<String>,
    pub info_tecnica: Option<String>,
    pub quantity: i32,
    pub price: f64,
    pub subtotal: f64,
}
