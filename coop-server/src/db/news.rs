//! Home page news

use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NewsRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

const NEWS_COLUMNS: &str =
    "id, title, content, image_url, display_order, is_active, created_at, updated_at";

/// Numbered items first (1 = first), then by age.
const NEWS_ORDER: &str = "display_order ASC NULLS LAST, created_at ASC, id ASC";

/// Validated fields of a news item
#[derive(Debug, Clone)]
pub struct NewsFields {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: bool,
}

pub async fn list_active(pool: &PgPool) -> Result<Vec<NewsRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {NEWS_COLUMNS} FROM news WHERE is_active ORDER BY {NEWS_ORDER}"
    ))
    .fetch_all(pool)
    .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<NewsRow>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {NEWS_COLUMNS} FROM news ORDER BY {NEWS_ORDER}"))
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<NewsRow>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {NEWS_COLUMNS} FROM news WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, fields: &NewsFields, now: i64) -> Result<NewsRow, sqlx::Error> {
    sqlx::query_as(&format!(
        "INSERT INTO news (title, content, image_url, display_order, is_active, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $6)
         RETURNING {NEWS_COLUMNS}"
    ))
    .bind(&fields.title)
    .bind(&fields.content)
    .bind(&fields.image_url)
    .bind(fields.display_order)
    .bind(fields.is_active)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    fields: &NewsFields,
    now: i64,
) -> Result<Option<NewsRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        "UPDATE news SET
            title = $2, content = $3, image_url = $4,
            display_order = $5, is_active = $6, updated_at = $7
         WHERE id = $1
         RETURNING {NEWS_COLUMNS}"
    ))
    .bind(id)
    .bind(&fields.title)
    .bind(&fields.content)
    .bind(&fields.image_url)
    .bind(fields.display_order)
    .bind(fields.is_active)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM news WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
