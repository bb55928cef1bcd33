//! Member administration (`/usuarios`)

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    AdminPage, DisableUserRequest, UserCreate, UserInfo, UserListQuery, UserUpdate, clamp_page,
    clamp_per_page, page_offset,
};

use crate::db::{self, is_unique_violation};
use crate::db::users::{NewUser, UserChanges};
use crate::error::{ServiceError, ServiceResult};
use crate::state::AppState;
use crate::util::{detect_role_from_id, normalize_email, normalize_id, normalize_phone};

/// GET /usuarios?page&pageSize&search
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> ServiceResult<Json<AdminPage<UserInfo>>> {
    let page = clamp_page(query.page);
    let page_size = clamp_per_page(query.page_size, 20, 1, 200);
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let (rows, total) =
        db::users::list(&state.pool, search, page_size, page_offset(page, page_size)).await?;

    Ok(Json(AdminPage {
        page,
        page_size,
        total,
        items: rows.into_iter().map(UserInfo::from).collect(),
    }))
}

/// GET /usuarios/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<UserInfo>> {
    let row = db::users::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(row.into()))
}

/// POST /usuarios
///
/// The role defaults from the first digit of the id.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<UserCreate>,
) -> ServiceResult<(StatusCode, Json<UserInfo>)> {
    let id = normalize_id(req.id.as_deref().unwrap_or_default());
    if id.is_empty() {
        return Err(AppError::with_message(ErrorCode::RequiredField, "id is required").into());
    }
    let role = req
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
        .unwrap_or_else(|| detect_role_from_id(&id).to_string());

    let new_user = NewUser {
        name: req.name.as_deref().unwrap_or_default().trim().to_string(),
        role,
        email: normalize_email(req.email.as_deref()),
        phone: normalize_phone(req.phone.as_deref()),
        id,
    };

    let now = shared::util::now_millis();
    let row = db::users::create(&state.pool, &new_user, now)
        .await
        .map_err(|e| conflict_or_db(e, "A user with that id, email or phone already exists"))?;

    tracing::info!(user_id = %row.id, role = %row.role, "User created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// PUT /usuarios/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UserUpdate>,
) -> ServiceResult<Json<UserInfo>> {
    let changes = UserChanges {
        name: req.name.map(|n| n.trim().to_string()),
        role: req.role.map(|r| r.trim().to_string()).filter(|r| !r.is_empty()),
        email: normalize_email(req.email.as_deref()),
        phone: normalize_phone(req.phone.as_deref()),
        is_disabled: req.is_disabled,
    };

    let now = shared::util::now_millis();
    let row = db::users::update(&state.pool, &id, &changes, now)
        .await
        .map_err(|e| conflict_or_db(e, "Email or phone already in use"))?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    tracing::info!(user_id = %row.id, "User updated");
    Ok(Json(row.into()))
}

/// PATCH /usuarios/{id}/disable
pub async fn set_disabled(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<DisableUserRequest>,
) -> ServiceResult<Json<UserInfo>> {
    let is_disabled = req.is_disabled.ok_or_else(|| {
        AppError::with_message(ErrorCode::InvalidFormat, "is_disabled must be a boolean")
    })?;

    let changes = UserChanges {
        is_disabled: Some(is_disabled),
        ..Default::default()
    };
    let now = shared::util::now_millis();
    let row = db::users::update(&state.pool, &id, &changes, now)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    tracing::info!(user_id = %row.id, is_disabled, "User disabled flag changed");
    Ok(Json(row.into()))
}

fn conflict_or_db(e: sqlx::Error, message: &str) -> ServiceError {
    if is_unique_violation(&e) {
        AppError::with_message(ErrorCode::UserAlreadyExists, message).into()
    } else {
        e.into()
    }
}
