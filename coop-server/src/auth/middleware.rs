//! Route guards
//!
//! `require_auth` validates the bearer token and injects [`CurrentUser`];
//! `require_roles` must run after it.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::{AppError, ErrorCode};

use super::{CurrentUser, JwtError, JwtService};
use crate::state::AppState;

/// Require a valid `Authorization: Bearer <token>` header.
///
/// | Failure               | Response                |
/// |-----------------------|-------------------------|
/// | no header             | 401 NotAuthenticated    |
/// | malformed header      | 401 TokenInvalid        |
/// | expired token         | 401 TokenExpired        |
/// | bad signature/claims  | 401 TokenInvalid        |
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => return Err(AppError::not_authenticated()),
    };

    match state.jwt.validate(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(error = %e, uri = %req.uri(), "Authentication failed");
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Require one of `allowed` roles.
///
/// ```ignore
/// Router::new()
///     .route("/pedidos", get(orders::list))
///     .route_layer(middleware::from_fn(require_roles(roles::STAFF)));
/// ```
pub fn require_roles(
    allowed: &'static [&'static str],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::not_authenticated)?;

            if !user.has_any_role(allowed) {
                tracing::warn!(
                    user_id = %user.id,
                    role = %user.role,
                    required = ?allowed,
                    "Role required"
                );
                return Err(AppError::new(ErrorCode::RoleRequired));
            }

            Ok(next.run(req).await)
        })
    }
}
