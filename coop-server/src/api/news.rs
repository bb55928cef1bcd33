//! Home page news (`/news`)

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{News, NewsCreate, NewsUpdate};

use crate::db;
use crate::db::news::{NewsFields, NewsRow};
use crate::error::ServiceResult;
use crate::state::AppState;

/// GET /news
pub async fn list_active(State(state): State<AppState>) -> ServiceResult<Json<Vec<News>>> {
    let rows = db::news::list_active(&state.pool).await?;
    Ok(Json(rows.into_iter().map(News::from).collect()))
}

/// GET /news/all
pub async fn list_all(State(state): State<AppState>) -> ServiceResult<Json<Vec<News>>> {
    let rows = db::news::list_all(&state.pool).await?;
    Ok(Json(rows.into_iter().map(News::from).collect()))
}

/// POST /news
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewsCreate>,
) -> ServiceResult<(StatusCode, Json<News>)> {
    let fields = validate(NewsFields {
        title: req.title,
        content: req.content,
        image_url: req.image_url,
        display_order: req.display_order,
        is_active: req.is_active.unwrap_or(true),
    })?;

    let row = db::news::create(&state.pool, &fields, shared::util::now_millis()).await?;
    tracing::info!(news_id = row.id, "News created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// PUT /news/{id}
///
/// Absent fields keep their current value.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<NewsUpdate>,
) -> ServiceResult<Json<News>> {
    let current = db::news::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NewsNotFound))?;

    let fields = validate(merge(current, req))?;
    let row = db::news::update(&state.pool, id, &fields, shared::util::now_millis())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NewsNotFound))?;

    tracing::info!(news_id = id, "News updated");
    Ok(Json(row.into()))
}

/// DELETE /news/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServiceResult<ApiResponse> {
    if !db::news::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::NewsNotFound).into());
    }
    tracing::info!(news_id = id, "News deleted");
    Ok(ApiResponse::ok_with_message("News deleted"))
}

fn merge(current: NewsRow, update: NewsUpdate) -> NewsFields {
    NewsFields {
        title: update.title.unwrap_or(current.title),
        content: update.content.unwrap_or(current.content),
        image_url: update.image_url.or(current.image_url),
        display_order: update.display_order.or(current.display_order),
        is_active: update.is_active.unwrap_or(current.is_active),
    }
}

/// Title and content are required; an empty image URL means none.
fn validate(mut fields: NewsFields) -> Result<NewsFields, AppError> {
    fields.title = fields.title.trim().to_string();
    fields.content = fields.content.trim().to_string();
    if fields.title.is_empty() || fields.content.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "title and content are required",
        ));
    }
    fields.image_url = fields
        .image_url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());
    Ok(fields)
}
