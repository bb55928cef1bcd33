//! Catalog queries and the order subsystem's product lookups

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::RubroCount;
use sqlx::{PgConnection, PgPool};

use super::{BoxError, like_pattern};
use crate::orders::repository::{ProductCatalog, ProductSnapshot, RepoResult};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub code: String,
    pub articulo: Option<String>,
    pub rubro: Option<String>,
    pub motor: Option<String>,
    pub nro_fabrica: Option<String>,
    pub info_tecnica: Option<String>,
    pub mv: Option<String>,
    pub price: Decimal,
    pub stock: Option<i32>,
    pub in_stock: bool,
    pub is_active: bool,
}

/// Name and technical info shown next to order lines
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductLabel {
    pub code: String,
    pub articulo: Option<String>,
    pub info_tecnica: Option<String>,
}

/// Filters shared by the listing and the per-rubro counts
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// One `%word%` pattern per search word; a product must match all
    pub patterns: Vec<String>,
    pub only_stock: bool,
    pub motor: Option<String>,
    pub rubro: Option<String>,
}

impl CatalogFilter {
    pub fn new(q: Option<&str>, only_stock: bool, motor: Option<&str>, rubro: Option<&str>) -> Self {
        let non_empty = |s: Option<&str>| s.map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        Self {
            patterns: q
                .unwrap_or_default()
                .split_whitespace()
                .map(like_pattern)
                .collect(),
            only_stock,
            motor: non_empty(motor),
            rubro: non_empty(rubro),
        }
    }
}

/// Binds: $1 patterns, $2 only_stock, $3 motor, $4 rubro
const FILTER_SQL: &str = "is_active
    AND (NOT $2::bool OR in_stock)
    AND ($3::text IS NULL OR motor = $3)
    AND ($4::text IS NULL OR rubro = $4)
    AND NOT EXISTS (
        SELECT 1 FROM UNNEST($1::text[]) AS w(pattern)
        WHERE concat_ws(' ', articulo, rubro, motor, code, nro_fabrica, info_tecnica, mv)
              NOT ILIKE w.pattern
    )";

const PRODUCT_COLUMNS: &str =
    "id, code, articulo, rubro, motor, nro_fabrica, info_tecnica, mv, price, stock, in_stock, is_active";

/// One page of active products ordered by articulo, rubro; plus the match count.
pub async fn search(
    pool: &PgPool,
    filter: &CatalogFilter,
    limit: i64,
    offset: i64,
) -> Result<(Vec<ProductRow>, i64), BoxError> {
    let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM products WHERE {FILTER_SQL}"))
        .bind(&filter.patterns)
        .bind(filter.only_stock)
        .bind(&filter.motor)
        .bind(&filter.rubro)
        .fetch_one(pool)
        .await?;

    let rows: Vec<ProductRow> = sqlx::query_as(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE {FILTER_SQL}
         ORDER BY articulo ASC NULLS LAST, rubro ASC NULLS LAST, id ASC
         LIMIT $5 OFFSET $6"
    ))
    .bind(&filter.patterns)
    .bind(filter.only_stock)
    .bind(&filter.motor)
    .bind(&filter.rubro)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((rows, total))
}

/// Distinct motors and rubros among active products, sorted
pub async fn filters(pool: &PgPool) -> Result<(Vec<String>, Vec<String>), BoxError> {
    let motors: Vec<(String,)> = sqlx::query_as(
        "SELECT DISTINCT motor FROM products
         WHERE is_active AND motor IS NOT NULL AND motor <> ''
         ORDER BY motor",
    )
    .fetch_all(pool)
    .await?;
    let rubros: Vec<(String,)> = sqlx::query_as(
        "SELECT DISTINCT rubro FROM products
         WHERE is_active AND rubro IS NOT NULL AND rubro <> ''
         ORDER BY rubro",
    )
    .fetch_all(pool)
    .await?;

    Ok((
        motors.into_iter().map(|(m,)| m).collect(),
        rubros.into_iter().map(|(r,)| r).collect(),
    ))
}

/// Matching product count per rubro. `filter.rubro` is ignored.
pub async fn rubro_counts(pool: &PgPool, filter: &CatalogFilter) -> Result<Vec<RubroCount>, BoxError> {
    let rows: Vec<(String, i64)> = sqlx::query_as(&format!(
        "SELECT rubro, COUNT(*) FROM products
         WHERE {FILTER_SQL} AND rubro IS NOT NULL AND rubro <> ''
         GROUP BY rubro
         ORDER BY rubro"
    ))
    .bind(&filter.patterns)
    .bind(filter.only_stock)
    .bind(&filter.motor)
    .bind(None::<String>)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(rubro, total)| RubroCount { rubro, total })
        .collect())
}

/// Labels for order lines, keyed by code; unknown codes are absent
pub async fn labels_by_code(
    pool: &PgPool,
    codes: &[String],
) -> Result<HashMap<String, ProductLabel>, BoxError> {
    if codes.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<ProductLabel> =
        sqlx::query_as("SELECT code, articulo, info_tecnica FROM products WHERE code = ANY($1)")
            .bind(codes)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|r| (r.code.clone(), r)).collect())
}

#[derive(sqlx::FromRow)]
struct SnapshotRow {
    code: String,
    price: Decimal,
    is_active: bool,
    in_stock: bool,
    stock: Option<i32>,
}

impl From<SnapshotRow> for ProductSnapshot {
    fn from(row: SnapshotRow) -> Self {
        ProductSnapshot {
            code: row.code,
            price: row.price,
            is_active: row.is_active,
            in_stock: row.in_stock,
            stock: row.stock,
        }
    }
}

/// Live product state under a share lock, regardless of activity.
///
/// Held until the caller's transaction ends, so stock and availability
/// cannot change between the check and the commit.
pub async fn snapshot_for_share(
    conn: &mut PgConnection,
    code: &str,
) -> Result<Option<ProductSnapshot>, sqlx::Error> {
    let row: Option<SnapshotRow> = sqlx::query_as(
        "SELECT code, price, is_active, in_stock, stock FROM products WHERE code = $1 FOR SHARE",
    )
    .bind(code)
    .fetch_optional(conn)
    .await?;
    Ok(row.map(ProductSnapshot::from))
}

/// [`ProductCatalog`] over the `products` table
#[derive(Clone)]
pub struct PgProductCatalog {
    pool: PgPool,
}

impl PgProductCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductCatalog for PgProductCatalog {
    async fn find_active(&self, codes: &[String]) -> RepoResult<Vec<ProductSnapshot>> {
        let rows: Vec<SnapshotRow> = sqlx::query_as(
            "SELECT code, price, is_active, in_stock, stock FROM products
             WHERE code = ANY($1) AND is_active",
        )
        .bind(codes)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ProductSnapshot::from).collect())
    }
}
