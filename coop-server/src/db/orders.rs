//! PostgreSQL order repository
//!
//! Every write runs in one transaction; quantity changes lock the order row
//! so concurrent edits of the same order serialize on the total.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::OrderStatus;
use sqlx::PgPool;

use super::{BoxError, products};
use crate::orders::OrderError;
use crate::orders::pricing::check_quantity;
use crate::orders::repository::{
    ListOrders, NewOrder, Order, OrderItem, OrderRepository, OrderWithItems, QuantityChange,
    RepoResult,
};

impl From<sqlx::Error> for OrderError {
    fn from(e: sqlx::Error) -> Self {
        OrderError::StorageFailure(e.into())
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: Option<String>,
    status: String,
    total: Decimal,
    comment: Option<String>,
    created_at: i64,
}

impl TryFrom<OrderRow> for Order {
    type Error = BoxError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::parse(&row.status)
            .ok_or_else(|| format!("order {} has unknown status '{}'", row.id, row.status))?;
        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            status,
            total: row.total,
            comment: row.comment,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    order_id: i64,
    product_code: String,
    quantity: i32,
    unit_price: Decimal,
    subtotal: Decimal,
}

impl From<ItemRow> for OrderItem {
    fn from(row: ItemRow) -> Self {
        OrderItem {
            id: row.id,
            order_id: row.order_id,
            product_code: row.product_code,
            quantity: row.quantity,
            unit_price: row.unit_price,
            subtotal: row.subtotal,
        }
    }
}

const ORDER_COLUMNS: &str = "id, user_id, status, total, comment, created_at";
const ITEM_COLUMNS: &str = "id, order_id, product_code, quantity, unit_price, subtotal";

#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Items of many orders in one query, grouped by order id
    async fn items_by_order(&self, order_ids: &[i64]) -> RepoResult<HashMap<i64, Vec<OrderItem>>> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ANY($1) ORDER BY order_id, id"
        ))
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for row in rows {
            grouped.entry(row.order_id).or_default().push(row.into());
        }
        Ok(grouped)
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn insert(&self, new: NewOrder) -> RepoResult<OrderWithItems> {
        let mut tx = self.pool.begin().await?;

        let row: OrderRow = sqlx::query_as(&format!(
            "INSERT INTO orders (user_id, status, total, comment, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(&new.user_id)
        .bind(OrderStatus::Pending.as_str())
        .bind(new.total)
        .bind(&new.comment)
        .bind(new.created_at)
        .fetch_one(&mut *tx)
        .await?;
        let order = Order::try_from(row)?;

        let codes: Vec<String> = new.lines.iter().map(|l| l.product_code.clone()).collect();
        let quantities: Vec<i32> = new.lines.iter().map(|l| l.quantity).collect();
        let unit_prices: Vec<Decimal> = new.lines.iter().map(|l| l.unit_price).collect();
        let subtotals: Vec<Decimal> = new.lines.iter().map(|l| l.subtotal).collect();

        // WITH ORDINALITY keeps the request order in the generated ids
        let mut items: Vec<OrderItem> = sqlx::query_as::<_, ItemRow>(&format!(
            "INSERT INTO order_items (order_id, product_code, quantity, unit_price, subtotal)
             SELECT $1::bigint, t.code, t.quantity, t.unit_price, t.subtotal
             FROM UNNEST($2::text[], $3::integer[], $4::numeric[], $5::numeric[])
                  WITH ORDINALITY AS t(code, quantity, unit_price, subtotal, n)
             ORDER BY t.n
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(order.id)
        .bind(&codes)
        .bind(&quantities)
        .bind(&unit_prices)
        .bind(&subtotals)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();
        items.sort_by_key(|i| i.id);

        tx.commit().await?;
        Ok(OrderWithItems { order, items })
    }

    async fn find(&self, order_id: i64) -> RepoResult<Option<OrderWithItems>> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
                .bind(order_id)
                .fetch_optional(&self.pool)
                .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let order = Order::try_from(row)?;

        let items: Vec<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id"
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(OrderWithItems {
            order,
            items: items.into_iter().map(OrderItem::from).collect(),
        }))
    }

    async fn list(&self, query: &ListOrders) -> RepoResult<Vec<OrderWithItems>> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE ($1::text IS NULL OR user_id = $1)
               AND ($2::text IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(&query.user_id)
        .bind(query.status.map(|s| s.as_str()))
        .bind(query.limit.max(0))
        .bind(query.offset.max(0))
        .fetch_all(&self.pool)
        .await?;

        let orders = rows
            .into_iter()
            .map(Order::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        let mut items = self.items_by_order(&ids).await?;

        Ok(orders
            .into_iter()
            .map(|order| OrderWithItems {
                items: items.remove(&order.id).unwrap_or_default(),
                order,
            })
            .collect())
    }

    async fn count(&self, query: &ListOrders) -> RepoResult<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM orders
             WHERE ($1::text IS NULL OR user_id = $1)
               AND ($2::text IS NULL OR status = $2)",
        )
        .bind(&query.user_id)
        .bind(query.status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn set_item_quantity(
        &self,
        order_id: i64,
        item_id: i64,
        quantity: i32,
    ) -> Result<QuantityChange, OrderError> {
        let not_found = || OrderError::ItemNotFound { order_id, item_id };
        let mut tx = self.pool.begin().await?;

        let (order_total,): (Decimal,) =
            sqlx::query_as("SELECT total FROM orders WHERE id = $1 FOR UPDATE")
                .bind(order_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(not_found)?;

        let item: OrderItem = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE id = $2 AND order_id = $1"
        ))
        .bind(order_id)
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await?
        .map(OrderItem::from)
        .ok_or_else(not_found)?;

        let product = products::snapshot_for_share(&mut *tx, &item.product_code).await?;
        let subtotal = check_quantity(&item, product.as_ref(), quantity, order_total)?;

        let item: ItemRow = sqlx::query_as(&format!(
            "UPDATE order_items
             SET quantity = $3, subtotal = $4
             WHERE id = $2 AND order_id = $1
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(order_id)
        .bind(item_id)
        .bind(quantity)
        .bind(subtotal)
        .fetch_one(&mut *tx)
        .await?;

        let (order_total,): (Decimal,) = sqlx::query_as(
            "UPDATE orders
             SET total = (SELECT COALESCE(SUM(subtotal), 0) FROM order_items WHERE order_id = $1)
             WHERE id = $1
             RETURNING total",
        )
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(QuantityChange {
            item: item.into(),
            order_total,
        })
    }

    async fn set_status(&self, order_id: i64, status: OrderStatus) -> RepoResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Order::try_from).transpose()
    }

    async fn delete(&self, order_id: i64) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }
}
