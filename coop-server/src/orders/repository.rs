//! Storage seams for the order subsystem
//!
//! `OrderRepository` is the only writer of orders and order items. Every
//! mutating method is a single storage transaction: callers never see an
//! order header without its lines or a total that disagrees with them.

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::OrderStatus;

use super::error::OrderError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type RepoResult<T> = Result<T, BoxError>;

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub user_id: Option<String>,
    pub status: OrderStatus,
    /// Always the sum of the item subtotals
    pub total: Decimal,
    pub comment: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_code: String,
    pub quantity: i32,
    /// Price captured at creation; never refreshed from the catalog
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// A priced line ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub product_code: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Option<String>,
    pub comment: Option<String>,
    pub total: Decimal,
    pub lines: Vec<PricedLine>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ListOrders {
    pub user_id: Option<String>,
    pub status: Option<OrderStatus>,
    pub limit: i64,
    pub offset: i64,
}

/// Result of a quantity change: the rewritten item and the resummed total
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityChange {
    pub item: OrderItem,
    pub order_total: Decimal,
}

/// What the order subsystem needs to know about a catalog product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub code: String,
    pub price: Decimal,
    pub is_active: bool,
    pub in_stock: bool,
    /// Declared stock; `None` means not tracked
    pub stock: Option<i32>,
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Store header and lines atomically.
    async fn insert(&self, order: NewOrder) -> RepoResult<OrderWithItems>;

    async fn find(&self, order_id: i64) -> RepoResult<Option<OrderWithItems>>;

    /// Newest first (`created_at DESC, id DESC`).
    async fn list(&self, query: &ListOrders) -> RepoResult<Vec<OrderWithItems>>;

    /// Number of orders matching the filters of `query` (paging ignored).
    async fn count(&self, query: &ListOrders) -> RepoResult<i64>;

    /// Change one line's quantity and resum the order total from every line.
    ///
    /// One transaction holds the order row lock and a share lock on the
    /// line's product, so the live product checked by
    /// [`check_quantity`](super::pricing::check_quantity) is the one in force
    /// at commit. `ItemNotFound` when the item is not part of the order.
    async fn set_item_quantity(
        &self,
        order_id: i64,
        item_id: i64,
        quantity: i32,
    ) -> Result<QuantityChange, OrderError>;

    async fn set_status(&self, order_id: i64, status: OrderStatus) -> RepoResult<Option<Order>>;

    /// Remove lines and header together. `false` when the order did not exist.
    async fn delete(&self, order_id: i64) -> RepoResult<bool>;
}

/// Read-only view of the catalog used for pricing and stock checks
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Active products among `codes`, in one lookup.
    async fn find_active(&self, codes: &[String]) -> RepoResult<Vec<ProductSnapshot>>;
}
