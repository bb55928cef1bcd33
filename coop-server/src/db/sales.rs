//! Sales report over delivered orders

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::BoxError;

/// Only delivered orders count as sales.
const SALES_FILTER: &str = "status = 'delivered'
    AND ($1::bigint IS NULL OR created_at >= $1)
    AND ($2::bigint IS NULL OR created_at <= $2)";

/// Inclusive creation-time bounds in epoch millis; `None` is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesRange {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub orders: i64,
    pub revenue: Decimal,
}

/// Best day of the range, `YYYY-MM-DD` (UTC)
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TopDay {
    pub day: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SaleRow {
    pub id: i64,
    pub user_id: Option<String>,
    pub created_at: i64,
    pub total: Decimal,
}

pub async fn totals(pool: &PgPool, range: SalesRange) -> Result<Totals, BoxError> {
    let (orders, revenue): (i64, Decimal) = sqlx::query_as(&format!(
        "SELECT COUNT(*), COALESCE(SUM(total), 0) FROM orders WHERE {SALES_FILTER}"
    ))
    .bind(range.from)
    .bind(range.to)
    .fetch_one(pool)
    .await?;
    Ok(Totals { orders, revenue })
}

pub async fn top_day(pool: &PgPool, range: SalesRange) -> Result<Option<TopDay>, BoxError> {
    let row: Option<TopDay> = sqlx::query_as(&format!(
        "SELECT to_char(to_timestamp(created_at::double precision / 1000) AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS day,
                SUM(total) AS amount
         FROM orders
         WHERE {SALES_FILTER}
         GROUP BY 1
         ORDER BY amount DESC, day ASC
         LIMIT 1"
    ))
    .bind(range.from)
    .bind(range.to)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Newest first
pub async fn page(
    pool: &PgPool,
    range: SalesRange,
    limit: i64,
    offset: i64,
) -> Result<Vec<SaleRow>, BoxError> {
    let rows: Vec<SaleRow> = sqlx::query_as(&format!(
        "SELECT id, user_id, created_at, total FROM orders
         WHERE {SALES_FILTER}
         ORDER BY created_at DESC, id DESC
         LIMIT $3 OFFSET $4"
    ))
    .bind(range.from)
    .bind(range.to)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
