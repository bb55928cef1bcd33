//! Order lifecycle: create, quantity changes, status changes, deletion

use std::sync::Arc;

use shared::models::{CreateOrderRequest, OrderStatus};
use shared::util::now_millis;

use super::error::OrderError;
use super::pricing;
use super::repository::{
    ListOrders, NewOrder, Order, OrderRepository, OrderWithItems, ProductCatalog, QuantityChange,
};

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    catalog: Arc<dyn ProductCatalog>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { orders, catalog }
    }

    /// Validate, price and store a new order in `pending`.
    ///
    /// `acting_user` is recorded as the owner when present.
    pub async fn create(
        &self,
        request: &CreateOrderRequest,
        acting_user: Option<&str>,
    ) -> Result<OrderWithItems, OrderError> {
        let lines = pricing::validate_lines(&request.items)?;
        let priced = pricing::resolve(self.catalog.as_ref(), &lines).await?;

        let created = self
            .orders
            .insert(NewOrder {
                user_id: acting_user.map(str::to_string),
                comment: normalize_comment(request.comment.as_deref()),
                total: priced.total,
                lines: priced.lines,
                created_at: now_millis(),
            })
            .await?;

        tracing::info!(
            order_id = created.order.id,
            user_id = ?created.order.user_id,
            total = %created.order.total,
            items = created.items.len(),
            "Order created"
        );
        Ok(created)
    }

    /// Change one line's quantity and resum the order total.
    ///
    /// The line keeps its snapshot unit price; the live product is only
    /// consulted for availability and declared stock.
    pub async fn update_item_quantity(
        &self,
        order_id: i64,
        item_id: i64,
        quantity: i64,
    ) -> Result<QuantityChange, OrderError> {
        let quantity = i32::try_from(quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or(OrderError::InvalidQuantity)?;

        let change = self
            .orders
            .set_item_quantity(order_id, item_id, quantity)
            .await?;

        tracing::info!(
            order_id,
            item_id,
            quantity,
            subtotal = %change.item.subtotal,
            order_total = %change.order_total,
            "Order item quantity updated"
        );
        Ok(change)
    }

    /// Move the order to any of the three states, backwards included.
    pub async fn update_status(&self, order_id: i64, raw_status: &str) -> Result<Order, OrderError> {
        let status = OrderStatus::parse(raw_status)
            .ok_or_else(|| OrderError::InvalidStatus(raw_status.to_string()))?;

        let order = self
            .orders
            .set_status(order_id, status)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;

        tracing::info!(order_id, status = %status, "Order status updated");
        Ok(order)
    }

    pub async fn delete(&self, order_id: i64) -> Result<(), OrderError> {
        if !self.orders.delete(order_id).await? {
            return Err(OrderError::OrderNotFound(order_id));
        }
        tracing::info!(order_id, "Order deleted");
        Ok(())
    }

    pub async fn get(&self, order_id: i64) -> Result<OrderWithItems, OrderError> {
        self.orders
            .find(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))
    }

    /// One page of orders plus the number of orders matching the filters.
    pub async fn list(&self, query: &ListOrders) -> Result<(Vec<OrderWithItems>, i64), OrderError> {
        let orders = self.orders.list(query).await?;
        let total = self.orders.count(query).await?;
        Ok((orders, total))
    }
}

fn normalize_comment(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}
