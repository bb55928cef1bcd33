//! Own account (`/account`)

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    AccountOrderItem, AccountOrdersQuery, AccountProfile, OrderSummary, Page,
    UpdateAccountRequest, clamp_page, clamp_per_page, page_offset,
};

use super::convert::money;
use crate::auth::CurrentUser;
use crate::db;
use crate::error::ServiceResult;
use crate::orders::ListOrders;
use crate::state::AppState;
use crate::util::{normalize_email, normalize_phone};

/// GET /account
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ServiceResult<Json<AccountProfile>> {
    let row = db::users::find_by_id(&state.pool, &user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(row.into()))
}

/// PATCH /account
///
/// Replaces both contact fields; an absent field is cleared.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<UpdateAccountRequest>,
) -> ServiceResult<Json<AccountProfile>> {
    let email = normalize_email(req.email.as_deref());
    let phone = normalize_phone(req.phone.as_deref());

    if let Some(email) = &email {
        if !email.contains('@') {
            return Err(AppError::with_message(ErrorCode::ValidationFailed, "Invalid email").into());
        }
        if db::users::email_taken(&state.pool, email, &user.id).await? {
            return Err(AppError::new(ErrorCode::EmailInUse).into());
        }
    }
    if let Some(phone) = &phone {
        if db::users::phone_taken(&state.pool, phone, &user.id).await? {
            return Err(AppError::new(ErrorCode::PhoneInUse).into());
        }
    }

    let now = shared::util::now_millis();
    let row = db::users::set_contact(&state.pool, &user.id, email.as_deref(), phone.as_deref(), now)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    tracing::info!(user_id = %user.id, "Account contact updated");
    Ok(Json(row.into()))
}

/// GET /account/orders?page&per
pub async fn my_orders(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<AccountOrdersQuery>,
) -> ServiceResult<Json<Page<OrderSummary>>> {
    let per_page = clamp_per_page(query.per, 10, 5, 20);
    let page = clamp_page(query.page);

    let (orders, total) = state
        .orders
        .list(&ListOrders {
            user_id: Some(user.id.clone()),
            status: None,
            limit: per_page,
            offset: page_offset(page, per_page),
        })
        .await
        .map_err(AppError::from)?;

    let summaries = orders
        .into_iter()
        .map(|o| OrderSummary {
            id: o.order.id,
            created_at: shared::util::millis_to_rfc3339(o.order.created_at),
            total: money(o.order.total),
            status: o.order.status,
            items_count: o.items.len() as i64,
        })
        .collect();

    Ok(Json(Page::new(summaries, page, per_page, total)))
}

/// GET /account/orders/{id}/items
///
/// Only the caller's own orders; anything else is reported as not found.
pub async fn my_order_items(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(order_id): Path<i64>,
) -> ServiceResult<Json<Vec<AccountOrderItem>>> {
    let order = match state.orders.get(order_id).await {
        Ok(order) if order.order.user_id.as_deref() == Some(user.id.as_str()) => order,
        Ok(_) => return Err(AppError::new(ErrorCode::OrderNotFound).into()),
        Err(e) => return Err(AppError::from(e).into()),
    };

    let codes: Vec<String> = order.items.iter().map(|i| i.product_code.clone()).collect();
    let labels = db::products::labels_by_code(&state.pool, &codes).await?;

    Ok(Json(
        order
            .items
            .into_iter()
            .map(|item| {
                let label = labels.get(&item.product_code);
                AccountOrderItem {
                    id: item.id,
                    name: label.and_then(|l| l.articulo.clone()),
                    info_tecnica: label.and_then(|l| l.info_tecnica.clone()),
                    product_code: item.product_code,
                    quantity: item.quantity,
                    price: money(item.unit_price),
                    subtotal: money(item.subtotal),
                }
            })
            .collect(),
    ))
}
