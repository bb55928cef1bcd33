//! Session endpoints (`/auth`)

use axum::{Extension, Json, extract::State};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{AccountProfile, LoginRequest, LoginResponse, SetPasswordRequest};

use crate::auth::CurrentUser;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;
use crate::util::{hash_password, normalize_id, verify_password};

const MIN_PASSWORD_LEN: usize = 8;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ServiceResult<Json<LoginResponse>> {
    let id = normalize_id(&req.id);
    if id.is_empty() || req.password.is_empty() {
        return Err(AppError::new(ErrorCode::InvalidCredentials).into());
    }

    let user = db::users::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials))?;

    // Accounts without a password yet cannot sign in
    let verified = user
        .password_hash
        .as_deref()
        .is_some_and(|hash| verify_password(&req.password, hash));
    if !verified {
        tracing::warn!(user_id = %id, "Login failed");
        return Err(AppError::new(ErrorCode::InvalidCredentials).into());
    }
    if user.is_disabled {
        return Err(AppError::new(ErrorCode::AccountDisabled).into());
    }

    let token = state
        .jwt
        .issue(&user.id, &user.name, &user.role)
        .map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    tracing::info!(user_id = %user.id, role = %user.role, "Login");
    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// POST /auth/set-password
pub async fn set_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<SetPasswordRequest>,
) -> ServiceResult<ApiResponse> {
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort).into());
    }

    let hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let now = shared::util::now_millis();
    if !db::users::set_password(&state.pool, &user.id, &hash, now).await? {
        return Err(AppError::new(ErrorCode::UserNotFound).into());
    }

    tracing::info!(user_id = %user.id, "Password set");
    Ok(ApiResponse::ok_with_message("Password updated"))
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ServiceResult<Json<AccountProfile>> {
    let row = db::users::find_by_id(&state.pool, &user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(row.into()))
}
